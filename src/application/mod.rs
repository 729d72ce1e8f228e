//! Application layer: the payment-method registry, descriptor factories, the
//! redirect submission driver and the checkout session that ties them to the
//! external processor.

pub mod checkout;
pub mod methods;
pub mod registry;
pub mod submission;
