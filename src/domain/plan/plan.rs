//! Plan definition and per-tier defaults.

use serde::{Deserialize, Serialize};

use super::{MonthlyLimit, PlanFeatures, PlanTier};

/// A subscription plan: a tier plus its feature set and limits.
///
/// Read-only to the gating logic; created and updated by operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// The tier this plan represents.
    pub tier: PlanTier,

    /// Monthly price in cents.
    pub monthly_price_cents: u32,

    /// Feature flags from the catalog's features map.
    pub features: PlanFeatures,

    /// Plan-level request ceiling. Applies when the feature map does not
    /// specify its own ceiling.
    pub max_requests_per_month: MonthlyLimit,

    /// Maximum upload size in bytes.
    pub max_file_size_bytes: u64,
}

impl Plan {
    /// Get the stock definition for a tier.
    ///
    /// | Tier | Pro mode | Image | Video | Requests/month | Upload |
    /// |------|----------|-------|-------|----------------|--------|
    /// | Free | No | No | No | 50 | 4 MiB |
    /// | Pro | Yes | Yes | No | 500 | 32 MiB |
    /// | Enterprise | Yes | Yes | Yes | Unlimited | 128 MiB |
    pub fn default_for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                tier,
                monthly_price_cents: 0,
                features: PlanFeatures {
                    allow_pro_mode: false,
                    allow_image_generation: false,
                    allow_video_generation: false,
                    max_requests_per_month: Some(MonthlyLimit::Limited(50)),
                },
                max_requests_per_month: MonthlyLimit::Limited(50),
                max_file_size_bytes: 4 * 1024 * 1024,
            },
            PlanTier::Pro => Self {
                tier,
                monthly_price_cents: 2000,
                features: PlanFeatures {
                    allow_pro_mode: true,
                    allow_image_generation: true,
                    allow_video_generation: false,
                    max_requests_per_month: Some(MonthlyLimit::Limited(500)),
                },
                max_requests_per_month: MonthlyLimit::Limited(500),
                max_file_size_bytes: 32 * 1024 * 1024,
            },
            PlanTier::Enterprise => Self {
                tier,
                monthly_price_cents: 9900,
                features: PlanFeatures {
                    allow_pro_mode: true,
                    allow_image_generation: true,
                    allow_video_generation: true,
                    max_requests_per_month: Some(MonthlyLimit::Unlimited),
                },
                max_requests_per_month: MonthlyLimit::Unlimited,
                max_file_size_bytes: 128 * 1024 * 1024,
            },
        }
    }

    /// The request ceiling in effect for this plan.
    ///
    /// The feature map's value wins; the plan-level column is the
    /// fallback when the map omits one.
    pub fn monthly_request_limit(&self) -> MonthlyLimit {
        self.features
            .max_requests_per_month
            .unwrap_or(self.max_requests_per_month)
    }
}
