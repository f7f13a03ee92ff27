//! Application layer - one handler per gating operation.

pub mod handlers;
