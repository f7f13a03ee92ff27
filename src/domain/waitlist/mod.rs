//! Waitlist domain: FIFO queue of aspirants to the paid-seat pool.

mod email;
mod entry;
mod stats;
mod status;

pub use email::Email;
pub use entry::WaitlistEntry;
pub use stats::WaitlistStats;
pub use status::WaitlistStatus;
