use crate::config::NetworkConfig;
use crate::domain::menu::{MenuCatalog, MenuItemId};
use crate::domain::money::Price;
use crate::domain::order::{LineId, OrderState};
use crate::domain::payment::{
    OrderSnapshot, PaymentOutcome, PaymentState, PaymentStatus, Receipt, Signer, WalletHandle,
};
use crate::domain::ports::{GatewayBox, GatewayError};
use crate::domain::tip::TipSelection;
use crate::error::{OrderError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::instrument;

#[derive(Debug, Default)]
struct Session {
    order: OrderState,
    payment: PaymentState,
    wallet: Option<WalletHandle>,
}

impl Session {
    fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::capture(&self.order, &self.payment, self.wallet.as_ref())
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.payment.status == PaymentStatus::Pending {
            Err(OrderError::PaymentPending)
        } else {
            Ok(())
        }
    }
}

/// Owns one customer's order and payment state.
///
/// Every presentation intent goes through this type. Session state sits behind
/// a mutex that is never held across an `.await`, so the controller can be
/// shared through an `Arc` while a payment settles. The `Pending` status is the
/// in-flight guard: it is checked and set under the lock, so at most one
/// gateway submission exists per session.
pub struct OrderController {
    catalog: Arc<MenuCatalog>,
    gateway: GatewayBox,
    network: NetworkConfig,
    session: Mutex<Session>,
}

impl OrderController {
    /// Creates a controller with an empty order.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The menu items can be ordered from.
    /// * `gateway` - The wallet used to pay.
    /// * `network` - The chain payments must be made on.
    pub fn new(catalog: Arc<MenuCatalog>, gateway: GatewayBox, network: NetworkConfig) -> Self {
        Self {
            catalog,
            gateway,
            network,
            session: Mutex::new(Session::default()),
        }
    }

    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        self.session().snapshot()
    }

    /// Appends a new line for `item_id` at its current catalog price.
    pub fn add_item(&self, item_id: MenuItemId) -> Result<OrderSnapshot> {
        let item = self
            .catalog
            .get(item_id)
            .ok_or_else(|| OrderError::InvalidItem(item_id.to_string()))?;

        let mut session = self.session();
        session.ensure_editable()?;
        let line_id = session.order.add(item).line_id;
        tracing::debug!(%line_id, item = %item.name, price = %item.unit_price, "Line added");
        Ok(session.snapshot())
    }

    pub fn remove_line(&self, line_id: LineId) -> Result<OrderSnapshot> {
        let mut session = self.session();
        session.ensure_editable()?;
        let removed = session.order.remove(line_id)?;
        tracing::debug!(%line_id, item = %removed.name, "Line removed");
        Ok(session.snapshot())
    }

    pub fn set_tip(&self, tip: TipSelection) -> Result<OrderSnapshot> {
        let mut session = self.session();
        session.ensure_editable()?;
        session.order.set_tip(tip);
        tracing::debug!(%tip, "Tip selected");
        Ok(session.snapshot())
    }

    /// Connects the wallet and remembers it for display.
    pub async fn connect_wallet(&self) -> Result<WalletHandle> {
        let wallet = self.gateway.connect().await.map_err(translate)?;
        self.check_network(&wallet)?;
        tracing::info!(address = %wallet.address, chain_id = wallet.chain_id, "Wallet connected");
        self.session().wallet = Some(wallet.clone());
        Ok(wallet)
    }

    /// Pays the current total through the gateway.
    ///
    /// Returns [`PaymentOutcome::AlreadyPending`] without touching the gateway
    /// when a payment is in flight. On success the order is reset and the paid
    /// total kept in `last_paid_total`; on failure the order is left as it was
    /// and the status becomes `Failed` so the caller can retry.
    #[instrument(skip(self))]
    pub async fn initiate_payment(&self) -> Result<PaymentOutcome> {
        let total = {
            let mut session = self.session();
            if session.payment.status == PaymentStatus::Pending {
                tracing::debug!("Payment already pending, ignoring");
                return Ok(PaymentOutcome::AlreadyPending);
            }
            if session.order.is_empty() {
                return Err(OrderError::EmptyOrder);
            }
            session.payment.status = PaymentStatus::Pending;
            session.order.total()
        };

        let mut pending = PendingPayment {
            session: &self.session,
            armed: true,
        };
        let settled = self.settle(total).await;
        pending.disarm();

        match settled {
            Ok(receipt) => {
                let mut session = self.session();
                session.payment.status = PaymentStatus::Success;
                session.payment.last_paid_total = Some(total);
                session.payment.last_receipt = Some(receipt.clone());
                session.order.clear();
                session.payment.status = PaymentStatus::Initial;
                tracing::info!(%total, tx_hash = %receipt.tx_hash, "Payment settled");
                Ok(PaymentOutcome::Paid { total, receipt })
            }
            Err(e) => {
                self.session().payment.status = PaymentStatus::Failed;
                tracing::warn!(%total, error = %e, "Payment failed");
                Err(e)
            }
        }
    }

    /// Total the connected customer has paid the restaurant so far.
    pub async fn customer_spend(&self) -> Result<Price> {
        let wallet = self.gateway.connect().await.map_err(translate)?;
        let signer = self.gateway.signer(&wallet).await.map_err(translate)?;
        let paid = self
            .gateway
            .amount_paid_by(&signer)
            .await
            .map_err(translate)?;
        Price::from_base_units(paid, self.network.base_unit_decimals)
    }

    async fn settle(&self, total: Price) -> Result<Receipt> {
        let amount = total.to_base_units(self.network.base_unit_decimals)?;
        let wallet = self.gateway.connect().await.map_err(translate)?;
        self.check_network(&wallet)?;
        self.session().wallet = Some(wallet.clone());

        let signer: Signer = self.gateway.signer(&wallet).await.map_err(translate)?;
        tracing::info!(from = %signer.address, amount, "Submitting payment");
        self.gateway
            .submit_payment(&signer, amount)
            .await
            .map_err(translate)
    }

    fn check_network(&self, wallet: &WalletHandle) -> Result<()> {
        if wallet.chain_id != self.network.chain_id {
            tracing::warn!(
                expected = self.network.chain_id,
                actual = wallet.chain_id,
                "Change network to {}",
                self.network.name
            );
            return Err(OrderError::WrongNetwork {
                expected: self.network.chain_id,
                actual: wallet.chain_id,
            });
        }
        Ok(())
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        // Mutations finish before the guard drops, so a poisoned session is
        // still consistent.
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Moves a `Pending` status to `Failed` when the payment future is dropped
/// before settlement resolves, so a cancelled payment cannot lock the order.
struct PendingPayment<'a> {
    session: &'a Mutex<Session>,
    armed: bool,
}

impl PendingPayment<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingPayment<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if session.payment.status == PaymentStatus::Pending {
            session.payment.status = PaymentStatus::Failed;
            tracing::warn!("Payment abandoned before settlement");
        }
    }
}

fn translate(error: GatewayError) -> OrderError {
    match error {
        GatewayError::Connection(reason) => OrderError::Connection(reason),
        GatewayError::Rejected(reason) => OrderError::PaymentFailed(reason),
        GatewayError::Timeout => OrderError::PaymentFailed(error.to_string()),
    }
}
