use super::money::Price;
use super::order::{OrderLine, OrderState};
use super::tip::TipSelection;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Initial,
    Pending,
    Success,
    Failed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::Initial => "initial",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A wallet the gateway connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletHandle {
    pub address: String,
    pub chain_id: u64,
}

/// Signing capability obtained from a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub address: String,
}

/// Settlement proof returned once the payment transaction is mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: String,
    pub block_number: u64,
    pub from: String,
    pub amount: u128,
}

/// Payment side of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentState {
    pub status: PaymentStatus,
    pub last_paid_total: Option<Price>,
    pub last_receipt: Option<Receipt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Paid { total: Price, receipt: Receipt },
    /// A payment was already in flight, nothing was submitted.
    AlreadyPending,
}

/// Everything the presentation layer needs to render the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub lines: Vec<OrderLine>,
    pub subtotal: Price,
    pub tip: TipSelection,
    pub total: Price,
    pub payment_status: PaymentStatus,
    pub last_paid_total: Option<Price>,
    pub last_receipt: Option<Receipt>,
    pub wallet: Option<WalletHandle>,
}

impl OrderSnapshot {
    pub fn capture(order: &OrderState, payment: &PaymentState, wallet: Option<&WalletHandle>) -> Self {
        Self {
            lines: order.lines().to_vec(),
            subtotal: order.subtotal(),
            tip: order.tip(),
            total: order.total(),
            payment_status: payment.status,
            last_paid_total: payment.last_paid_total,
            last_receipt: payment.last_receipt.clone(),
            wallet: wallet.cloned(),
        }
    }
}
