//! Domain layer - pure types, value objects, and decision rules.

pub mod foundation;
pub mod plan;
pub mod subscription;
pub mod usage;
pub mod waitlist;
