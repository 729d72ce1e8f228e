//! Adapters implementing the domain ports: in-memory store container,
//! scripted processor, catalog translator and logging event sink.

pub mod events;
pub mod in_memory;
pub mod scripted;
pub mod translator;
