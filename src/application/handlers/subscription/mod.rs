//! Subscription lifecycle handlers.

mod bootstrap_subscription;

pub use bootstrap_subscription::{BootstrapSubscriptionCommand, BootstrapSubscriptionHandler};
