//! Adapters - concrete implementations of the persistence ports.

pub mod memory;
pub mod postgres;
