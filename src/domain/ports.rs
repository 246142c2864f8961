use super::payment::{Receipt, Signer, WalletHandle};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by the wallet/contract layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("wallet unavailable: {0}")]
    Connection(String),
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("settlement timed out")]
    Timeout,
}

/// The external wallet and restaurant contract.
///
/// Implementations sign and broadcast the payment and wait for it to settle.
#[async_trait]
pub trait WalletGateway: Send + Sync {
    async fn connect(&self) -> Result<WalletHandle, GatewayError>;
    async fn signer(&self, wallet: &WalletHandle) -> Result<Signer, GatewayError>;
    /// Sends `amount` base units to the restaurant contract and resolves once
    /// the transaction settles.
    async fn submit_payment(&self, signer: &Signer, amount: u128) -> Result<Receipt, GatewayError>;
    /// Cumulative base units the contract has received from this customer.
    async fn amount_paid_by(&self, signer: &Signer) -> Result<u128, GatewayError>;
}

pub type GatewayBox = Box<dyn WalletGateway>;
