#![allow(dead_code)]

use async_trait::async_trait;
use paymethods::application::checkout::CheckoutSession;
use paymethods::application::methods::load_payment_methods;
use paymethods::application::registry::PaymentMethodRegistry;
use paymethods::domain::line_item::{LineItem, Total};
use paymethods::domain::payment_method::PaymentMethodId;
use paymethods::domain::ports::{
    CheckoutEvent, EventSink, EventSinkBox, PaymentRequest, ProcessorCredentials,
    ProcessorResponse, StateContainerBox, TransactionProcessor, TransactionProcessorBox,
};
use paymethods::error::{CheckoutError, Result};
use paymethods::infrastructure::in_memory::InMemoryStateContainer;
use paymethods::infrastructure::translator::CatalogTranslator;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// What the fake processor answers with.
#[derive(Clone)]
pub enum Answer {
    Respond(ProcessorResponse),
    Reject(String),
}

/// A processor that counts calls and can hold each call until released.
pub struct FakeProcessor {
    answer: Answer,
    gated: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<PaymentRequest>>,
    pub started: Notify,
    pub release: Notify,
}

impl FakeProcessor {
    pub fn new(answer: Answer) -> Self {
        Self {
            answer,
            gated: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    pub fn redirecting(url: &str) -> Self {
        Self::new(Answer::Respond(ProcessorResponse {
            redirect_url: Some(url.to_string()),
        }))
    }

    /// Calls block until `release` is notified.
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PaymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionProcessor for FakeProcessor {
    async fn submit(&self, request: PaymentRequest) -> Result<ProcessorResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.started.notify_one();
        if self.gated {
            self.release.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
        match &self.answer {
            Answer::Respond(response) => Ok(response.clone()),
            Answer::Reject(message) => Err(CheckoutError::TransactionError(message.clone())),
        }
    }
}

#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<CheckoutEvent>>,
}

impl RecordingEventSink {
    pub fn events(&self) -> Vec<CheckoutEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: CheckoutEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn cart() -> Vec<LineItem> {
    vec![LineItem {
        id: "personal-plan".into(),
        label: "Personal plan".into(),
        amount: dec!(48.00),
    }]
}

/// A session offering EPS and WeChat Pay.
pub async fn checkout(processor: TransactionProcessorBox, events: EventSinkBox) -> CheckoutSession {
    let stores: StateContainerBox = Arc::new(InMemoryStateContainer::new());
    let mut registry = PaymentMethodRegistry::new();
    let methods = [PaymentMethodId::from("eps"), PaymentMethodId::from("wechat")];
    load_payment_methods(
        &mut registry,
        stores.as_ref(),
        &methods,
        &ProcessorCredentials {
            publishable_key: "pk_test_checkout".into(),
            account: None,
        },
    )
    .await
    .expect("Failed to load payment methods");

    let items = cart();
    let total = Total::from_items(&items, "EUR").expect("Cart total overflowed");
    CheckoutSession::new(
        Arc::new(registry),
        stores,
        processor,
        events,
        Arc::new(CatalogTranslator::default()),
        items,
        total,
    )
}
