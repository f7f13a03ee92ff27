//! Billable action kinds and the plan features they require.

use serde::{Deserialize, Serialize};

use crate::domain::plan::PlanFeatures;

/// Kind of billable action a user can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Plain chat completion.
    Chat,
    /// Web-augmented search.
    Search,
    /// Pro-mode chat (stronger model, longer context).
    ProMode,
    /// Image generation or editing.
    ImageGeneration,
    /// Video generation.
    VideoGeneration,
    /// Anything else the ledger records.
    Other,
}

/// A plan feature flag an action may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredFeature {
    ProMode,
    ImageGeneration,
    VideoGeneration,
}

impl ActionKind {
    /// The feature flag this action requires, if any.
    ///
    /// `Chat` and `Search` are available on every plan and only count
    /// against the request ceiling.
    pub fn required_feature(&self) -> Option<RequiredFeature> {
        match self {
            ActionKind::ProMode => Some(RequiredFeature::ProMode),
            ActionKind::ImageGeneration => Some(RequiredFeature::ImageGeneration),
            ActionKind::VideoGeneration => Some(RequiredFeature::VideoGeneration),
            ActionKind::Chat | ActionKind::Search | ActionKind::Other => None,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Chat => "chat",
            ActionKind::Search => "search",
            ActionKind::ProMode => "pro_mode",
            ActionKind::ImageGeneration => "image_generation",
            ActionKind::VideoGeneration => "video_generation",
            ActionKind::Other => "other",
        }
    }

    /// Human-readable feature name for user-facing denial messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ActionKind::Chat => "Chat",
            ActionKind::Search => "Search",
            ActionKind::ProMode => "Pro mode",
            ActionKind::ImageGeneration => "Image generation",
            ActionKind::VideoGeneration => "Video generation",
            ActionKind::Other => "This feature",
        }
    }
}

impl RequiredFeature {
    /// Whether the given feature set grants this feature.
    pub fn is_granted_by(&self, features: &PlanFeatures) -> bool {
        match self {
            RequiredFeature::ProMode => features.allow_pro_mode,
            RequiredFeature::ImageGeneration => features.allow_image_generation,
            RequiredFeature::VideoGeneration => features.allow_video_generation,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
