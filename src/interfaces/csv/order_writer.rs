use crate::domain::payment::OrderSnapshot;
use crate::error::Result;
use std::io::Write;

/// Renders an order snapshot as CSV: one row per line, then a summary row.
///
/// Prices are written in their 4-digit display form.
pub struct OrderWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OrderWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_snapshot(&mut self, snapshot: &OrderSnapshot) -> Result<()> {
        self.writer.write_record(["line", "item", "price"])?;
        for line in &snapshot.lines {
            self.writer.write_record([
                line.line_id.to_string(),
                line.name.clone(),
                line.unit_price.display(),
            ])?;
        }

        self.writer.write_record([
            "subtotal",
            "tip",
            "total",
            "payment",
            "last_paid",
            "last_tx",
        ])?;
        self.writer.write_record([
            snapshot.subtotal.display(),
            snapshot.tip.to_string(),
            snapshot.total.display(),
            snapshot.payment_status.to_string(),
            snapshot
                .last_paid_total
                .map(|p| p.display())
                .unwrap_or_default(),
            snapshot
                .last_receipt
                .as_ref()
                .map(|r| r.tx_hash.clone())
                .unwrap_or_default(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::{MenuCatalog, MenuEntry};
    use crate::domain::order::OrderState;
    use crate::domain::payment::{PaymentState, PaymentStatus, Receipt};
    use crate::domain::tip::TipSelection;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_snapshot() {
        let menu = MenuCatalog::new([MenuEntry::new("Aloo Paratha", dec!(0.002))]).unwrap();
        let mut order = OrderState::new();
        order.add(&menu.list()[0]);
        order.set_tip(TipSelection::Excellent);
        let snapshot = OrderSnapshot::capture(&order, &PaymentState::default(), None);

        let mut out = Vec::new();
        OrderWriter::new(&mut out).write_snapshot(&snapshot).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "line,item,price\n0,Aloo Paratha,0.0020\nsubtotal,tip,total,payment,last_paid,last_tx\n0.0020,excellent,0.0022,initial,,\n"
        );
    }

    #[test]
    fn test_write_snapshot_after_payment() {
        let payment = PaymentState {
            status: PaymentStatus::Initial,
            last_paid_total: Some(crate::domain::money::Price::new(dec!(0.0022)).unwrap()),
            last_receipt: Some(Receipt {
                tx_hash: "0xabc".to_string(),
                block_number: 1,
                from: "0x01".to_string(),
                amount: 2_200_000_000_000_000,
            }),
        };
        let snapshot = OrderSnapshot::capture(&OrderState::new(), &payment, None);

        let mut out = Vec::new();
        OrderWriter::new(&mut out).write_snapshot(&snapshot).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.ends_with("0.0000,none,0.0000,initial,0.0022,0xabc\n"));
    }
}
