//! Waitlist admission handlers.
//!
//! Together these enforce the paid-seat ceiling and run the FIFO queue
//! of aspirants. Positions are always recomputed from the store, never
//! stored, so cancellations and expiries ahead of an entry move it up
//! without any renumbering write.

mod check_upgrade_capacity;
mod errors;
mod expire_notifications;
mod get_waitlist_position;
mod get_waitlist_stats;
mod join_waitlist;
mod notify_next_in_waitlist;
#[cfg(test)]
mod test_support;

pub use check_upgrade_capacity::{CheckUpgradeCapacityHandler, CheckUpgradeCapacityQuery};
pub use errors::WaitlistError;
pub use expire_notifications::ExpireNotificationsHandler;
pub use get_waitlist_position::{GetWaitlistPositionHandler, GetWaitlistPositionQuery};
pub use get_waitlist_stats::GetWaitlistStatsHandler;
pub use join_waitlist::{JoinWaitlistCommand, JoinWaitlistHandler, JoinedWaitlist};
pub use notify_next_in_waitlist::{NotifyNextInWaitlistCommand, NotifyNextInWaitlistHandler};
