use crate::domain::ports::{CheckoutEvent, EventSink};

/// Reports checkout events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event: CheckoutEvent) {
        match event {
            CheckoutEvent::RedirectTransactionBegin { payment_method_id } => {
                tracing::info!(method = %payment_method_id, "redirect transaction begin");
            }
        }
    }
}
