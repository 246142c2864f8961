use crate::domain::payment::{Receipt, Signer, WalletHandle};
use crate::domain::ports::{GatewayError, WalletGateway};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Default account exposed by the simulated wallet.
pub const DEFAULT_ADDRESS: &str = "0x5c1a0b5e1f1c0ffee0ddba11c0ffee0ddba11c0f";

/// How the simulated network answers a payment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettlementBehavior {
    /// The transaction is mined.
    #[default]
    Confirm,
    /// The user or the contract rejects the transaction.
    Decline(String),
    /// No wallet provider can be reached.
    Unreachable,
    /// The transaction never settles.
    Stall,
}

/// A submission the simulated wallet has received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub from: String,
    pub amount: u128,
}

#[derive(Debug, Default)]
struct Ledger {
    submissions: Vec<Submission>,
    paid_by: HashMap<String, u128>,
    block_number: u64,
}

/// An in-process stand-in for a browser wallet talking to the restaurant
/// contract.
///
/// Clones share the same ledger, so a test can keep a handle to inspect
/// submissions after boxing the wallet into a controller.
#[derive(Debug, Clone)]
pub struct SimulatedWallet {
    chain_id: u64,
    address: String,
    latency: Duration,
    behavior: Arc<RwLock<SettlementBehavior>>,
    ledger: Arc<RwLock<Ledger>>,
}

impl SimulatedWallet {
    /// Creates a wallet connected to `chain_id` that confirms every payment.
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            address: DEFAULT_ADDRESS.to_string(),
            latency: Duration::ZERO,
            behavior: Arc::default(),
            ledger: Arc::default(),
        }
    }

    pub fn with_behavior(self, behavior: SettlementBehavior) -> Self {
        Self {
            behavior: Arc::new(RwLock::new(behavior)),
            ..self
        }
    }

    /// Time the simulated network takes to settle a submission.
    pub fn with_latency(self, latency: Duration) -> Self {
        Self { latency, ..self }
    }

    pub fn with_address(self, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..self
        }
    }

    pub async fn set_behavior(&self, behavior: SettlementBehavior) {
        *self.behavior.write().await = behavior;
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.ledger.read().await.submissions.clone()
    }
}

#[async_trait]
impl WalletGateway for SimulatedWallet {
    async fn connect(&self) -> Result<WalletHandle, GatewayError> {
        if *self.behavior.read().await == SettlementBehavior::Unreachable {
            return Err(GatewayError::Connection(
                "no wallet provider found".to_string(),
            ));
        }
        Ok(WalletHandle {
            address: self.address.clone(),
            chain_id: self.chain_id,
        })
    }

    async fn signer(&self, wallet: &WalletHandle) -> Result<Signer, GatewayError> {
        if wallet.address != self.address {
            return Err(GatewayError::Connection(format!(
                "account {} is not managed by this wallet",
                wallet.address
            )));
        }
        Ok(Signer {
            address: wallet.address.clone(),
        })
    }

    async fn submit_payment(&self, signer: &Signer, amount: u128) -> Result<Receipt, GatewayError> {
        let behavior = self.behavior.read().await.clone();
        match behavior {
            SettlementBehavior::Decline(reason) => {
                tracing::debug!(from = %signer.address, amount, %reason, "Simulated wallet declined");
                return Err(GatewayError::Rejected(reason));
            }
            SettlementBehavior::Unreachable => {
                return Err(GatewayError::Connection(
                    "no wallet provider found".to_string(),
                ));
            }
            SettlementBehavior::Stall => {
                tokio::time::sleep(self.latency).await;
                return Err(GatewayError::Timeout);
            }
            SettlementBehavior::Confirm => {}
        }

        // Submission is recorded on broadcast, before it is mined
        let block_number = {
            let mut ledger = self.ledger.write().await;
            ledger.submissions.push(Submission {
                from: signer.address.clone(),
                amount,
            });
            ledger.block_number += 1;
            ledger.block_number
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut ledger = self.ledger.write().await;
        *ledger.paid_by.entry(signer.address.clone()).or_default() += amount;
        let tx_hash = format!("0x{:064x}", ledger.submissions.len());
        tracing::debug!(%tx_hash, block_number, amount, "Simulated payment mined");

        Ok(Receipt {
            tx_hash,
            block_number,
            from: signer.address.clone(),
            amount,
        })
    }

    async fn amount_paid_by(&self, signer: &Signer) -> Result<u128, GatewayError> {
        let ledger = self.ledger.read().await;
        Ok(ledger.paid_by.get(&signer.address).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_confirmed_payment_is_recorded() {
        let wallet = SimulatedWallet::new(4);
        let handle = wallet.connect().await.unwrap();
        assert_eq!(handle.chain_id, 4);

        let signer = wallet.signer(&handle).await.unwrap();
        let receipt = wallet.submit_payment(&signer, 500).await.unwrap();
        assert_eq!(receipt.amount, 500);
        assert_eq!(receipt.block_number, 1);
        assert_eq!(receipt.tx_hash.len(), 66);

        assert_eq!(wallet.submissions().await.len(), 1);
        assert_eq!(wallet.amount_paid_by(&signer).await.unwrap(), 500);
    }

    #[tokio::test]
    async fn test_declined_payment_is_not_recorded() {
        let wallet =
            SimulatedWallet::new(4).with_behavior(SettlementBehavior::Decline("denied".into()));
        let signer = Signer {
            address: DEFAULT_ADDRESS.to_string(),
        };

        let result = wallet.submit_payment(&signer, 500).await;
        assert_eq!(result, Err(GatewayError::Rejected("denied".to_string())));
        assert!(wallet.submissions().await.is_empty());
        assert_eq!(wallet.amount_paid_by(&signer).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_stalled_payment_times_out() {
        let wallet = SimulatedWallet::new(4).with_behavior(SettlementBehavior::Stall);
        let signer = Signer {
            address: DEFAULT_ADDRESS.to_string(),
        };
        assert_eq!(
            wallet.submit_payment(&signer, 1).await,
            Err(GatewayError::Timeout)
        );
    }

    #[tokio::test]
    async fn test_foreign_account_cannot_sign() {
        let wallet = SimulatedWallet::new(4);
        let foreign = WalletHandle {
            address: "0xdeadbeef".to_string(),
            chain_id: 4,
        };
        assert!(matches!(
            wallet.signer(&foreign).await,
            Err(GatewayError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_ledger() {
        let wallet = SimulatedWallet::new(4).with_address("0x01");
        let observer = wallet.clone();
        let signer = Signer {
            address: "0x01".to_string(),
        };
        wallet.submit_payment(&signer, 7).await.unwrap();
        assert_eq!(observer.submissions().await[0].amount, 7);
    }
}
