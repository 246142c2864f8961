use super::menu::{MenuItem, MenuItemId};
use super::money::Price;
use super::tip::TipSelection;
use crate::error::{OrderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequence number identifying one line of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for LineId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(LineId)
    }
}

/// One ordered instance of a menu item.
///
/// Name and price are copied from the catalog when the line is created, so
/// the line keeps displaying what the customer actually picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub line_id: LineId,
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: Price,
}

/// Lines and tip of the order being assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderState {
    lines: Vec<OrderLine>,
    tip: TipSelection,
    next_line_id: u64,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn tip(&self) -> TipSelection {
        self.tip
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, item: &MenuItem) -> &OrderLine {
        let line_id = LineId(self.next_line_id);
        self.next_line_id += 1;
        self.lines.push(OrderLine {
            line_id,
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.unit_price,
        });
        &self.lines[self.lines.len() - 1]
    }

    pub fn remove(&mut self, line_id: LineId) -> Result<OrderLine> {
        let index = self
            .lines
            .iter()
            .position(|line| line.line_id == line_id)
            .ok_or(OrderError::LineNotFound(line_id))?;
        Ok(self.lines.remove(index))
    }

    pub fn set_tip(&mut self, tip: TipSelection) {
        self.tip = tip;
    }

    /// Recomputed on every call from the lines themselves.
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(|line| line.unit_price).sum()
    }

    pub fn total(&self) -> Price {
        self.subtotal().with_percent(self.tip.percent())
    }

    /// Drops all lines and the tip. Line ids keep counting up so an id handed
    /// out before the reset can never match a later line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.tip = TipSelection::None;
    }
}
