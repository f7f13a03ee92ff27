//! Subscription domain: a user's plan assignment plus billing status.

mod status;
mod subscription;

pub use status::SubscriptionStatus;
pub use subscription::Subscription;
