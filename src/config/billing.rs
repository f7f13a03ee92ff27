//! Billing and admission configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Seat-ceiling and waitlist configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Maximum concurrently active paid subscriptions admitted.
    #[serde(default = "default_max_paid_users")]
    pub max_paid_users: u64,

    /// Days a waitlist seat offer stays open before it expires.
    #[serde(default = "default_notification_window_days")]
    pub waitlist_notification_window_days: i64,
}

impl BillingConfig {
    /// Validate billing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_paid_users == 0 {
            return Err(ValidationError::InvalidSeatCeiling);
        }
        if self.waitlist_notification_window_days <= 0 {
            return Err(ValidationError::InvalidNotificationWindow);
        }
        Ok(())
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            max_paid_users: default_max_paid_users(),
            waitlist_notification_window_days: default_notification_window_days(),
        }
    }
}

fn default_max_paid_users() -> u64 {
    100
}

fn default_notification_window_days() -> i64 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BillingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_paid_users, 100);
        assert_eq!(config.waitlist_notification_window_days, 7);
    }

    #[test]
    fn zero_seat_ceiling_is_rejected() {
        let config = BillingConfig {
            max_paid_users: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidSeatCeiling)
        ));
    }

    #[test]
    fn non_positive_window_is_rejected() {
        let config = BillingConfig {
            waitlist_notification_window_days: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidNotificationWindow)
        ));
    }
}
