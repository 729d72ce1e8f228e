use super::registry::PaymentMethodRegistry;
use crate::domain::line_item::{LineItem, Total};
use crate::domain::payment_method::{PaymentMethodDescriptor, PaymentMethodId};
use crate::domain::ports::{
    EventSinkBox, StateContainerBox, SubmitContext, TransactionProcessorBox, Translate,
    TranslateBox,
};
use crate::domain::store::{MethodStoreState, StoreAction};
use crate::domain::transaction::{FormStatus, TransactionStatus, TransactionTracker};
use crate::error::{CheckoutError, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A user interaction with the checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutCommand {
    Select(PaymentMethodId),
    SetField {
        method: PaymentMethodId,
        field: String,
        value: String,
    },
    TouchField {
        method: PaymentMethodId,
        field: String,
    },
    Submit(PaymentMethodId),
}

/// Outcome of one submit command, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRecord {
    pub attempt: u32,
    pub method: PaymentMethodId,
    pub status: String,
    pub detail: String,
}

impl SubmissionRecord {
    fn new(attempt: u32, method: PaymentMethodId, status: &TransactionStatus) -> Self {
        Self {
            attempt,
            method,
            status: status.name().to_string(),
            detail: status.detail().unwrap_or_default().to_string(),
        }
    }
}

/// One customer's checkout: the offered methods, their stores, the cart and
/// the status of the current payment attempt.
///
/// All methods take `&self`, so a session can be shared between tasks; the
/// transaction tracker keeps concurrent submits down to one attempt.
pub struct CheckoutSession {
    registry: Arc<PaymentMethodRegistry>,
    stores: StateContainerBox,
    processor: TransactionProcessorBox,
    events: EventSinkBox,
    translator: TranslateBox,
    items: Vec<LineItem>,
    total: Total,
    tracker: TransactionTracker,
    selected: RwLock<Option<PaymentMethodId>>,
}

impl CheckoutSession {
    /// Creates a new `CheckoutSession`.
    ///
    /// # Arguments
    ///
    /// * `registry` - The payment methods on offer, already loaded.
    /// * `stores` - The container holding each method's store.
    /// * `processor` - The external transaction processor.
    /// * `events` - Receiver of checkout events.
    /// * `translator` - Display string provider.
    /// * `items` - The cart contents; `total` is their sum.
    pub fn new(
        registry: Arc<PaymentMethodRegistry>,
        stores: StateContainerBox,
        processor: TransactionProcessorBox,
        events: EventSinkBox,
        translator: TranslateBox,
        items: Vec<LineItem>,
        total: Total,
    ) -> Self {
        Self {
            registry,
            stores,
            processor,
            events,
            translator,
            items,
            total,
            tracker: TransactionTracker::new(),
            selected: RwLock::new(None),
        }
    }

    pub fn registry(&self) -> &PaymentMethodRegistry {
        &self.registry
    }

    pub fn translator(&self) -> &dyn Translate {
        self.translator.as_ref()
    }

    pub fn total(&self) -> &Total {
        &self.total
    }

    pub async fn status(&self) -> TransactionStatus {
        self.tracker.status().await
    }

    pub async fn form_status(&self) -> FormStatus {
        self.tracker.form_status().await
    }

    pub async fn set_form_status(&self, form_status: FormStatus) {
        self.tracker.set_form_status(form_status).await;
    }

    pub async fn history(&self) -> Vec<TransactionStatus> {
        self.tracker.history().await
    }

    pub async fn selected(&self) -> Option<PaymentMethodId> {
        self.selected.read().await.clone()
    }

    pub async fn select_method(&self, id: &PaymentMethodId) -> Result<()> {
        self.registry.get(id)?;
        *self.selected.write().await = Some(id.clone());
        Ok(())
    }

    /// State of a method's store. Placeholder methods have none.
    pub async fn method_state(&self, id: &PaymentMethodId) -> Result<MethodStoreState> {
        self.registry.get(id)?;
        self.stores.get_state(id.as_str()).await
    }

    pub async fn set_field(&self, id: &PaymentMethodId, field: &str, value: &str) -> Result<()> {
        self.registry.get(id)?;
        self.stores
            .dispatch(id.as_str(), StoreAction::set(field, value))
            .await
    }

    pub async fn touch_field(&self, id: &PaymentMethodId, field: &str) -> Result<()> {
        self.registry.get(id)?;
        self.stores
            .dispatch(id.as_str(), StoreAction::touch(field))
            .await
    }

    /// Submits the selected payment method.
    pub async fn submit(&self) -> Result<TransactionStatus> {
        let id = self
            .selected()
            .await
            .ok_or(CheckoutError::NoMethodSelected)?;
        let descriptor = Arc::clone(self.registry.get(&id)?);
        self.submit_descriptor(&descriptor).await
    }

    async fn submit_descriptor(
        &self,
        descriptor: &PaymentMethodDescriptor,
    ) -> Result<TransactionStatus> {
        let Some(submitter) = &descriptor.submitter else {
            tracing::warn!(method = %descriptor.id, "payment method has no submit action");
            return Ok(self.status().await);
        };
        let ctx = SubmitContext {
            processor: self.processor.as_ref(),
            stores: self.stores.as_ref(),
            tracker: &self.tracker,
            events: self.events.as_ref(),
            translator: self.translator.as_ref(),
            items: &self.items,
            total: &self.total,
        };
        submitter.submit(&ctx).await
    }

    /// Applies one command; submits produce a record of their outcome.
    pub async fn handle(&self, command: CheckoutCommand) -> Result<Option<SubmissionRecord>> {
        match command {
            CheckoutCommand::Select(id) => self.select_method(&id).await.map(|_| None),
            CheckoutCommand::SetField {
                method,
                field,
                value,
            } => self.set_field(&method, &field, &value).await.map(|_| None),
            CheckoutCommand::TouchField { method, field } => {
                self.touch_field(&method, &field).await.map(|_| None)
            }
            CheckoutCommand::Submit(id) => {
                self.select_method(&id).await?;
                let before = self.tracker.attempts().await;
                let status = self.submit().await?;
                // Attempt 0 marks a submit that never reached the processor.
                let attempt = match self.tracker.attempts().await {
                    after if after > before => after,
                    _ => 0,
                };
                Ok(Some(SubmissionRecord::new(attempt, id, &status)))
            }
        }
    }
}
