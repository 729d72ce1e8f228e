use crate::domain::payment_method::PaymentMethodId;
use crate::domain::ports::{
    CheckoutEvent, PaymentRequest, PaymentSubmitter, ProcessorCredentials, ProcessorResponse,
    SubmitContext,
};
use crate::domain::transaction::{GENERIC_PROCESSING_ERROR, TransactionEvent, TransactionStatus};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;

/// Submit action for methods that confirm payment on a third-party page.
///
/// One call drives at most one attempt: it validates the method's store,
/// moves the checkout to pending, calls the processor once and settles on
/// `Redirecting` or `Failed`.
#[derive(Debug, Clone)]
pub struct RedirectSubmitter {
    method_id: PaymentMethodId,
    namespace: String,
    credentials: ProcessorCredentials,
}

impl RedirectSubmitter {
    pub fn new(
        method_id: PaymentMethodId,
        namespace: impl Into<String>,
        credentials: ProcessorCredentials,
    ) -> Self {
        Self {
            method_id,
            namespace: namespace.into(),
            credentials,
        }
    }

    fn outcome_event(
        &self,
        result: Result<ProcessorResponse>,
        ctx: &SubmitContext<'_>,
    ) -> TransactionEvent {
        match result {
            Ok(response) => match response.redirect_url {
                Some(url) => {
                    tracing::debug!(method = %self.method_id, %url, "transaction requires redirect");
                    TransactionEvent::Redirect(url)
                }
                None => TransactionEvent::Fail(ctx.translator.translate(GENERIC_PROCESSING_ERROR)),
            },
            Err(CheckoutError::TransactionError(message)) => TransactionEvent::Fail(message),
            Err(other) => TransactionEvent::Fail(other.to_string()),
        }
    }
}

#[async_trait]
impl PaymentSubmitter for RedirectSubmitter {
    async fn submit(&self, ctx: &SubmitContext<'_>) -> Result<TransactionStatus> {
        if !ctx.tracker.can_submit().await {
            tracing::debug!(method = %self.method_id, "submit ignored, form is busy");
            return Ok(ctx.tracker.status().await);
        }
        ctx.tracker.reset().await;

        let validation = ctx.stores.validate_and_touch(&self.namespace).await?;
        if !validation.is_valid {
            tracing::debug!(
                method = %self.method_id,
                fields = ?validation.invalid_fields,
                "submit blocked by empty required fields"
            );
            return Ok(ctx.tracker.status().await);
        }

        let Some(attempt) = ctx.tracker.begin().await else {
            return Ok(ctx.tracker.status().await);
        };
        tracing::debug!(method = %self.method_id, attempt, "submitting payment");
        ctx.events.emit(CheckoutEvent::RedirectTransactionBegin {
            payment_method_id: self.method_id.clone(),
        });

        let customer_fields = validation
            .state
            .into_iter()
            .map(|(name, field)| (name, field.value))
            .collect();
        let request = PaymentRequest {
            payment_method_id: self.method_id.clone(),
            credentials: self.credentials.clone(),
            customer_fields,
            items: ctx.items.to_vec(),
            total: ctx.total.clone(),
        };

        let result = ctx.processor.submit(request).await;
        let status = ctx.tracker.finish(self.outcome_event(result, ctx)).await?;
        tracing::info!(method = %self.method_id, attempt, %status, "transaction settled");
        Ok(status)
    }
}
