use crate::domain::payment_method::{PaymentMethodDescriptor, PaymentMethodId};
use crate::error::{CheckoutError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered collection of the payment methods offered at checkout.
///
/// Built once at startup and shared by reference afterwards. Ids are unique:
/// registering an id twice is rejected and leaves the registry untouched.
#[derive(Debug, Default)]
pub struct PaymentMethodRegistry {
    methods: Vec<Arc<PaymentMethodDescriptor>>,
    index: HashMap<PaymentMethodId, usize>,
}

impl PaymentMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, descriptor: PaymentMethodDescriptor) -> Result<()> {
        if self.index.contains_key(&descriptor.id) {
            return Err(CheckoutError::DuplicateIdError(descriptor.id));
        }
        tracing::debug!(id = %descriptor.id, "registering payment method");
        self.index.insert(descriptor.id.clone(), self.methods.len());
        self.methods.push(Arc::new(descriptor));
        Ok(())
    }

    pub fn get(&self, id: &PaymentMethodId) -> Result<&Arc<PaymentMethodDescriptor>> {
        self.index
            .get(id)
            .map(|&position| &self.methods[position])
            .ok_or_else(|| CheckoutError::NotFoundError(id.clone()))
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &Arc<PaymentMethodDescriptor>> {
        self.methods.iter()
    }

    pub fn contains(&self, id: &PaymentMethodId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
