use crate::domain::ports::StateContainer;
use crate::domain::store::{MethodStore, MethodStoreState, StoreAction, ValidationOutcome};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory home for method stores, keyed by namespace.
///
/// Uses `Arc<RwLock<HashMap<String, MethodStore>>>`; clones share the same
/// stores.
#[derive(Default, Clone)]
pub struct InMemoryStateContainer {
    stores: Arc<RwLock<HashMap<String, MethodStore>>>,
}

impl InMemoryStateContainer {
    /// Creates a new, empty container.
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(namespace: &str) -> CheckoutError {
    CheckoutError::StoreNotFoundError(namespace.to_string())
}

#[async_trait]
impl StateContainer for InMemoryStateContainer {
    async fn register(&self, store: MethodStore) -> Result<()> {
        let mut stores = self.stores.write().await;
        if stores.contains_key(store.namespace()) {
            return Err(CheckoutError::DuplicateStoreError(
                store.namespace().to_string(),
            ));
        }
        stores.insert(store.namespace().to_string(), store);
        Ok(())
    }

    async fn dispatch(&self, namespace: &str, action: StoreAction) -> Result<()> {
        let mut stores = self.stores.write().await;
        stores
            .get_mut(namespace)
            .ok_or_else(|| missing(namespace))?
            .dispatch(action)
    }

    async fn get_state(&self, namespace: &str) -> Result<MethodStoreState> {
        let stores = self.stores.read().await;
        stores
            .get(namespace)
            .map(|store| store.state().clone())
            .ok_or_else(|| missing(namespace))
    }

    async fn validate_and_touch(&self, namespace: &str) -> Result<ValidationOutcome> {
        let mut stores = self.stores.write().await;
        stores
            .get_mut(namespace)
            .map(MethodStore::validate_and_touch)
            .ok_or_else(|| missing(namespace))
    }
}
