//! Monthly request ceiling value object.

use serde::{Deserialize, Serialize};

/// Monthly request ceiling for a plan.
///
/// Serializes as `null` (unlimited) or a non-negative integer, matching
/// the nullable `max_requests_per_month` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum MonthlyLimit {
    /// No ceiling; the gate never rejects on count.
    Unlimited,
    /// At most this many requests per calendar month.
    Limited(u32),
}

impl MonthlyLimit {
    /// Returns true if `usage_count` has reached or passed the ceiling.
    ///
    /// The boundary is exact: `count == limit` is exceeded,
    /// `count == limit - 1` is not. Unlimited never exceeds.
    pub fn is_exceeded_by(&self, usage_count: u64) -> bool {
        match self {
            MonthlyLimit::Unlimited => false,
            MonthlyLimit::Limited(max) => usage_count >= u64::from(*max),
        }
    }

    /// Returns the ceiling as an option, `None` meaning unlimited.
    pub fn as_option(&self) -> Option<u32> {
        match self {
            MonthlyLimit::Unlimited => None,
            MonthlyLimit::Limited(max) => Some(*max),
        }
    }
}

impl From<Option<u32>> for MonthlyLimit {
    fn from(value: Option<u32>) -> Self {
        match value {
            None => MonthlyLimit::Unlimited,
            Some(max) => MonthlyLimit::Limited(max),
        }
    }
}

impl From<MonthlyLimit> for Option<u32> {
    fn from(value: MonthlyLimit) -> Self {
        value.as_option()
    }
}

impl std::fmt::Display for MonthlyLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthlyLimit::Unlimited => write!(f, "unlimited"),
            MonthlyLimit::Limited(max) => write!(f, "{}", max),
        }
    }
}
