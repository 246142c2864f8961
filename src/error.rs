use crate::domain::order::LineId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid item selected: {0}")]
    InvalidItem(String),
    #[error("Order line {0} not found")]
    LineNotFound(LineId),
    #[error("Invalid tip selection: {0}")]
    InvalidTip(String),
    #[error("Order is empty, nothing to pay")]
    EmptyOrder,
    #[error("A payment is already pending")]
    PaymentPending,
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),
    #[error("Wallet connection error: {0}")]
    Connection(String),
    #[error("Wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrderError>;
