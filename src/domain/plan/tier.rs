//! Plan tier definitions.
//!
//! Represents the subscription tier levels available in MuseFlow.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription plan tier.
///
/// Determines feature access, usage limits, and pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - chat only, capped requests, good for evaluation.
    Free,

    /// Pro tier - pro mode and image generation, higher request cap.
    Pro,

    /// Enterprise tier - every modality, unlimited requests.
    Enterprise,
}

impl PlanTier {
    /// Returns true if this tier occupies a paid seat.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free",
            PlanTier::Pro => "Pro",
            PlanTier::Enterprise => "Enterprise",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more features. Used for upgrade validation.
    pub fn rank(&self) -> u8 {
        match self {
            PlanTier::Free => 0,
            PlanTier::Pro => 1,
            PlanTier::Enterprise => 2,
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PlanTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "pro" => Ok(PlanTier::Pro),
            "enterprise" => Ok(PlanTier::Enterprise),
            other => Err(ValidationError::invalid_format(
                "plan_tier",
                format!("Unknown tier: {}", other),
            )),
        }
    }
}
