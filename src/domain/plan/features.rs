//! Plan feature flags.

use serde::{Deserialize, Deserializer, Serialize};

use super::MonthlyLimit;

/// Feature flags for a plan.
///
/// Mirrors the catalog's `features` map. `max_requests_per_month` here is
/// optional in a second sense: `None` means the feature map does not
/// specify a ceiling and the plan-level column applies instead, while an
/// explicit `null` in the map means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanFeatures {
    /// Whether pro-mode chat is available.
    #[serde(default)]
    pub allow_pro_mode: bool,

    /// Whether image generation is available.
    #[serde(default)]
    pub allow_image_generation: bool,

    /// Whether video generation is available.
    #[serde(default)]
    pub allow_video_generation: bool,

    /// Request ceiling from the feature map, if the map specifies one.
    #[serde(
        default,
        deserialize_with = "present_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_requests_per_month: Option<MonthlyLimit>,
}

/// Deserializes a present value (including an explicit `null`) as `Some`,
/// so that absence alone maps to `None`.
fn present_limit<'de, D>(deserializer: D) -> Result<Option<MonthlyLimit>, D::Error>
where
    D: Deserializer<'de>,
{
    MonthlyLimit::deserialize(deserializer).map(Some)
}
