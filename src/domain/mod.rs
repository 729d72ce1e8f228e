//! Domain types for payment-method checkout: method descriptors, per-method
//! field stores, the transaction status machine and the ports to external
//! collaborators.

pub mod line_item;
pub mod payment_method;
pub mod ports;
pub mod store;
pub mod transaction;
