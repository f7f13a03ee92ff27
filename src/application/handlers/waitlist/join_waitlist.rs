//! JoinWaitlistHandler - register an email on the paid-seat waitlist.

use std::sync::Arc;

use crate::domain::foundation::ErrorCode;
use crate::domain::foundation::WaitlistEntryId;
use crate::domain::waitlist::{Email, WaitlistEntry};
use crate::ports::WaitlistStore;

use super::get_waitlist_position::live_position;
use super::WaitlistError;

#[derive(Debug, Clone)]
pub struct JoinWaitlistCommand {
    pub email: String,
    pub name: Option<String>,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedWaitlist {
    pub entry_id: WaitlistEntryId,
    pub position: u64,
}

pub struct JoinWaitlistHandler {
    waitlist: Arc<dyn WaitlistStore>,
}

impl JoinWaitlistHandler {
    pub fn new(waitlist: Arc<dyn WaitlistStore>) -> Self {
        Self { waitlist }
    }

    /// Registers the email, or reports the existing registration's
    /// position if one is already active.
    pub async fn handle(&self, command: JoinWaitlistCommand) -> Result<JoinedWaitlist, WaitlistError> {
        let email = Email::new(command.email.as_str())
            .map_err(|err| WaitlistError::invalid_email(err.to_string()))?;

        if let Some(existing) = self.waitlist.find_active_by_email(&email).await? {
            let position = live_position(self.waitlist.as_ref(), &existing).await?;
            return Err(WaitlistError::AlreadyOnWaitlist { position });
        }

        let entry = WaitlistEntry::register(email.clone(), command.name);
        match self.waitlist.insert(&entry).await {
            Ok(()) => {}
            Err(err) if err.code == ErrorCode::WaitlistEntryExists => {
                // Lost a concurrent registration race for the same email.
                let existing = self
                    .waitlist
                    .find_active_by_email(&email)
                    .await?
                    .ok_or_else(|| {
                        WaitlistError::Infrastructure(
                            "Waitlist entry vanished after duplicate-key insert".to_string(),
                        )
                    })?;
                let position = live_position(self.waitlist.as_ref(), &existing).await?;
                return Err(WaitlistError::AlreadyOnWaitlist { position });
            }
            Err(err) => return Err(err.into()),
        }

        let position = live_position(self.waitlist.as_ref(), &entry).await?;
        tracing::info!(
            entry_id = %entry.id,
            position,
            "joined waitlist"
        );

        Ok(JoinedWaitlist {
            entry_id: entry.id,
            position,
        })
    }
}
