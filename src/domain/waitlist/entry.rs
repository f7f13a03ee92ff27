//! Waitlist entry aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, Timestamp, ValidationError, WaitlistEntryId};

use super::{Email, WaitlistStatus};

/// One registration on the paid-seat waitlist.
///
/// At most one active (pending or notified) entry may exist per email;
/// the store enforces that, this aggregate enforces the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    /// Entry ID; also the FIFO tie-breaker for equal registration times.
    pub id: WaitlistEntryId,

    /// Registered email, unique among active entries.
    pub email: Email,

    /// Optional display name.
    pub name: Option<String>,

    /// Lifecycle status.
    pub status: WaitlistStatus,

    /// When the registration happened; determines FIFO order.
    pub registered_at: Timestamp,

    /// When the seat offer was sent.
    pub notified_at: Option<Timestamp>,

    /// Deadline for converting the seat offer.
    pub notification_expires_at: Option<Timestamp>,
}

impl WaitlistEntry {
    /// Registers a new pending entry.
    pub fn register(email: Email, name: Option<String>) -> Self {
        Self {
            id: WaitlistEntryId::new(),
            email,
            name,
            status: WaitlistStatus::Pending,
            registered_at: Timestamp::now(),
            notified_at: None,
            notification_expires_at: None,
        }
    }

    /// Returns true if this entry blocks re-registration of its email.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Offers this entry a seat, stamping the notification time and the
    /// expiry deadline `window_days` out.
    pub fn notify(&mut self, now: Timestamp, window_days: i64) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(WaitlistStatus::Notified)?;
        self.notified_at = Some(now);
        self.notification_expires_at = Some(now.add_days(window_days));
        Ok(())
    }

    /// Marks the entry converted (checkout completed within the window).
    pub fn convert(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(WaitlistStatus::Converted)?;
        Ok(())
    }

    /// Expires the seat offer if its deadline has passed.
    ///
    /// Returns true if the entry transitioned. A notified entry with a
    /// future deadline (or none stamped) is left untouched.
    pub fn expire_if_due(&mut self, now: Timestamp) -> Result<bool, ValidationError> {
        if self.status != WaitlistStatus::Notified {
            return Ok(false);
        }
        match self.notification_expires_at {
            Some(deadline) if deadline.is_before(&now) => {
                self.status = self.status.transition_to(WaitlistStatus::Expired)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Cancels the entry on user request.
    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(WaitlistStatus::Cancelled)?;
        Ok(())
    }
}
