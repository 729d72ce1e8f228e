use crate::error::{CheckoutError, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shown when the processor answers without a redirect URL.
pub const GENERIC_PROCESSING_ERROR: &str =
    "There was an error processing your payment. Please try again or contact support.";

/// Status of the current submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Idle,
    Pending,
    Redirecting(String),
    Succeeded,
    Failed(String),
}

/// Inputs that move a [`TransactionStatus`] forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionEvent {
    Begin,
    Redirect(String),
    Complete,
    Fail(String),
    /// Clears a settled `Failed` or `Succeeded` attempt before the next one.
    Reset,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Redirecting(_)
                | TransactionStatus::Succeeded
                | TransactionStatus::Failed(_)
        )
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }

    /// Short name used in logs and CSV output.
    pub fn name(&self) -> &'static str {
        match self {
            TransactionStatus::Idle => "idle",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Redirecting(_) => "redirecting",
            TransactionStatus::Succeeded => "succeeded",
            TransactionStatus::Failed(_) => "failed",
        }
    }

    /// Redirect URL or failure message, if the status carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            TransactionStatus::Redirecting(url) => Some(url),
            TransactionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Computes the next status. A new attempt may begin from idle or any
    /// terminal status; outcomes are only accepted while pending.
    /// `Failed` and `Succeeded` may be reset to idle.
    pub fn transition(&self, event: TransactionEvent) -> Result<TransactionStatus> {
        match (self, event) {
            (status, TransactionEvent::Begin) if !status.is_pending() => {
                Ok(TransactionStatus::Pending)
            }
            (TransactionStatus::Pending, TransactionEvent::Redirect(url)) => {
                Ok(TransactionStatus::Redirecting(url))
            }
            (TransactionStatus::Pending, TransactionEvent::Complete) => {
                Ok(TransactionStatus::Succeeded)
            }
            (TransactionStatus::Pending, TransactionEvent::Fail(message)) => {
                Ok(TransactionStatus::Failed(message))
            }
            (
                TransactionStatus::Failed(_) | TransactionStatus::Succeeded,
                TransactionEvent::Reset,
            ) => Ok(TransactionStatus::Idle),
            (status, event) => Err(CheckoutError::InvalidTransitionError {
                from: status.name().to_string(),
                event: format!("{:?}", event),
            }),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}({})", self.name(), detail),
            None => f.write_str(self.name()),
        }
    }
}

/// Coarse readiness of the checkout form. Submit is only accepted in `Ready`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Loading,
    #[default]
    Ready,
    Submitting,
    Complete,
}

impl FormStatus {
    /// Form status that accompanies a transaction status.
    pub fn for_transaction(status: &TransactionStatus) -> Self {
        match status {
            TransactionStatus::Idle | TransactionStatus::Failed(_) => FormStatus::Ready,
            TransactionStatus::Pending | TransactionStatus::Redirecting(_) => {
                FormStatus::Submitting
            }
            TransactionStatus::Succeeded => FormStatus::Complete,
        }
    }
}

#[derive(Debug, Default)]
struct TrackerState {
    status: TransactionStatus,
    form_status: FormStatus,
    attempts: u32,
    history: Vec<TransactionStatus>,
}

/// Shared holder of the checkout's transaction and form status.
///
/// The lock is never held across the processor call; [`begin`] is the single
/// check-and-set that admits an attempt.
///
/// [`begin`]: TransactionTracker::begin
#[derive(Debug, Clone, Default)]
pub struct TransactionTracker {
    inner: Arc<Mutex<TrackerState>>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn status(&self) -> TransactionStatus {
        self.inner.lock().await.status.clone()
    }

    pub async fn form_status(&self) -> FormStatus {
        self.inner.lock().await.form_status
    }

    pub async fn set_form_status(&self, form_status: FormStatus) {
        self.inner.lock().await.form_status = form_status;
    }

    /// Number of attempts that reached pending.
    pub async fn attempts(&self) -> u32 {
        self.inner.lock().await.attempts
    }

    /// Every status entered since the tracker was created, oldest first.
    pub async fn history(&self) -> Vec<TransactionStatus> {
        self.inner.lock().await.history.clone()
    }

    pub async fn can_submit(&self) -> bool {
        let state = self.inner.lock().await;
        state.form_status == FormStatus::Ready && !state.status.is_pending()
    }

    /// Returns a settled `Failed` or `Succeeded` checkout to `Idle` so the
    /// next submit starts fresh. Does nothing unless the form is ready.
    pub async fn reset(&self) -> TransactionStatus {
        let mut state = self.inner.lock().await;
        if state.form_status != FormStatus::Ready {
            return state.status.clone();
        }
        if let Ok(next) = state.status.transition(TransactionEvent::Reset) {
            state.history.push(next.clone());
            state.status = next;
        }
        state.status.clone()
    }

    /// Starts a new attempt, returning its number, or `None` if the form is
    /// not ready or another attempt is in flight.
    pub async fn begin(&self) -> Option<u32> {
        let mut state = self.inner.lock().await;
        if state.form_status != FormStatus::Ready {
            return None;
        }
        let next = state.status.transition(TransactionEvent::Begin).ok()?;
        state.attempts += 1;
        state.form_status = FormStatus::for_transaction(&next);
        state.history.push(next.clone());
        state.status = next;
        Some(state.attempts)
    }

    /// Applies the outcome of the in-flight attempt.
    pub async fn finish(&self, event: TransactionEvent) -> Result<TransactionStatus> {
        let mut state = self.inner.lock().await;
        let next = state.status.transition(event)?;
        state.form_status = FormStatus::for_transaction(&next);
        state.history.push(next.clone());
        state.status = next.clone();
        Ok(next)
    }
}
