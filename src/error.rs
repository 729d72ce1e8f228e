use crate::domain::payment_method::PaymentMethodId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Payment method `{0}` is already registered")]
    DuplicateIdError(PaymentMethodId),
    #[error("Payment method `{0}` is not registered")]
    NotFoundError(PaymentMethodId),
    #[error("Store namespace `{0}` is already registered")]
    DuplicateStoreError(String),
    #[error("Store namespace `{0}` is not registered")]
    StoreNotFoundError(String),
    #[error("Field `{field}` does not exist in store `{namespace}`")]
    UnknownFieldError { namespace: String, field: String },
    #[error("Invalid transaction transition from {from} on {event}")]
    InvalidTransitionError { from: String, event: String },
    #[error("{0}")]
    TransactionError(String),
    #[error("Cart total overflows at item `{0}`")]
    AmountOverflow(String),
    #[error("No payment method selected")]
    NoMethodSelected,
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
