//! Operation handlers.
//!
//! Each handler is a short-lived decision or write over current store
//! state. None of them retry internally, none call each other; the
//! request layer composes them.

pub mod quota;
pub mod subscription;
pub mod waitlist;
