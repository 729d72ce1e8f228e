use super::line_item::{LineItem, Total};
use super::payment_method::PaymentMethodId;
use super::store::{MethodStore, MethodStoreState, StoreAction, ValidationOutcome};
use super::transaction::{TransactionStatus, TransactionTracker};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Credentials handed to the transaction processor with every request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorCredentials {
    pub publishable_key: String,
    #[serde(default)]
    pub account: Option<String>,
}

/// Everything the processor needs for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub payment_method_id: PaymentMethodId,
    pub credentials: ProcessorCredentials,
    pub customer_fields: BTreeMap<String, String>,
    pub items: Vec<LineItem>,
    pub total: Total,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[async_trait]
pub trait TransactionProcessor: Send + Sync {
    async fn submit(&self, request: PaymentRequest) -> Result<ProcessorResponse>;
}

/// Holds every method store under its namespace key.
#[async_trait]
pub trait StateContainer: Send + Sync {
    async fn register(&self, store: MethodStore) -> Result<()>;
    async fn dispatch(&self, namespace: &str, action: StoreAction) -> Result<()>;
    async fn get_state(&self, namespace: &str) -> Result<MethodStoreState>;
    async fn validate_and_touch(&self, namespace: &str) -> Result<ValidationOutcome>;
}

pub trait Translate: Send + Sync {
    fn translate(&self, key: &str) -> String;

    /// Translates `key` and substitutes each `%s` with the next argument.
    fn translate_with(&self, key: &str, args: &[&str]) -> String {
        let mut args = args.iter();
        self.translate(key)
            .split("%s")
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    return part.to_string();
                }
                match args.next() {
                    Some(arg) => format!("{}{}", arg, part),
                    None => format!("%s{}", part),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutEvent {
    RedirectTransactionBegin { payment_method_id: PaymentMethodId },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: CheckoutEvent);
}

/// Collaborators a submit action needs for one attempt.
pub struct SubmitContext<'a> {
    pub processor: &'a dyn TransactionProcessor,
    pub stores: &'a dyn StateContainer,
    pub tracker: &'a TransactionTracker,
    pub events: &'a dyn EventSink,
    pub translator: &'a dyn Translate,
    pub items: &'a [LineItem],
    pub total: &'a Total,
}

/// Submit action bound to a payment method descriptor.
///
/// Implementations convert processor failures into a failed status; an `Err`
/// is only returned for wiring mistakes such as a missing store.
#[async_trait]
pub trait PaymentSubmitter: Send + Sync {
    async fn submit(&self, ctx: &SubmitContext<'_>) -> Result<TransactionStatus>;
}

pub type TransactionProcessorBox = Arc<dyn TransactionProcessor>;
pub type StateContainerBox = Arc<dyn StateContainer>;
pub type TranslateBox = Arc<dyn Translate>;
pub type EventSinkBox = Arc<dyn EventSink>;
