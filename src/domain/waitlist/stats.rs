//! Seat-pool and waitlist statistics.

use serde::{Deserialize, Serialize};

/// Snapshot of paid-seat occupancy and waitlist depth.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistStats {
    /// Users currently holding an active paid subscription.
    pub paid_users_count: u64,

    /// Configured seat ceiling.
    pub max_paid_users: u64,

    /// Seats still open; never negative.
    pub available_slots: u64,

    /// Entries currently pending or notified.
    pub waitlist_count: u64,

    /// True when no seats are open.
    pub is_capacity_reached: bool,
}

impl WaitlistStats {
    /// Derives the snapshot from raw counts.
    pub fn derive(paid_users_count: u64, max_paid_users: u64, waitlist_count: u64) -> Self {
        let available_slots = max_paid_users.saturating_sub(paid_users_count);
        Self {
            paid_users_count,
            max_paid_users,
            available_slots,
            waitlist_count,
            is_capacity_reached: available_slots == 0,
        }
    }
}
