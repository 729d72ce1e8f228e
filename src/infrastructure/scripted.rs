use crate::domain::ports::{PaymentRequest, ProcessorResponse, TransactionProcessor};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Canned processor answer for one payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedResponse {
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// When set, the processor rejects with this message.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

/// A transaction processor that answers from a per-method script.
///
/// Methods without a script get an empty response, which the submit path
/// treats as a processing failure.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProcessor {
    responses: HashMap<String, ScriptedResponse>,
}

impl ScriptedProcessor {
    pub fn new(responses: HashMap<String, ScriptedResponse>) -> Self {
        Self { responses }
    }
}

#[async_trait]
impl TransactionProcessor for ScriptedProcessor {
    async fn submit(&self, request: PaymentRequest) -> Result<ProcessorResponse> {
        let script = self
            .responses
            .get(request.payment_method_id.as_str())
            .cloned()
            .unwrap_or_default();

        tracing::debug!(
            method = %request.payment_method_id,
            total = %request.total.display_value,
            "scripted processor received request"
        );

        if let Some(delay) = script.delay_ms {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        match script.error {
            Some(message) => Err(CheckoutError::TransactionError(message)),
            None => Ok(ProcessorResponse {
                redirect_url: script.redirect_url,
            }),
        }
    }
}
