//! Timed overlay shown when the evading control is engaged anyway.

use crate::reveal::AssetPath;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_FEEDBACK_MS: u64 = 2500;
pub const DECLINE_ASSET: &str = "images/emoji-disintegrating.gif";
pub const DECLINE_FALLBACK_TEXT: &str = "Nice try";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    pub duration_ms: u64,
    pub asset: String,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_FEEDBACK_MS,
            asset: DECLINE_ASSET.to_string(),
        }
    }
}

/// Overlay visibility. No queueing: re-engaging while visible schedules
/// another expiry and whichever fires first hides the overlay.
#[derive(Debug, Clone, Default)]
pub struct DeclineFeedback {
    settings: FeedbackSettings,
    visible: bool,
}

impl DeclineFeedback {
    pub fn new(settings: FeedbackSettings) -> Self {
        Self {
            settings,
            visible: false,
        }
    }

    pub fn set_settings(&mut self, settings: FeedbackSettings) {
        self.settings = settings;
    }

    /// Shows the overlay and returns the delay after which [`Self::expire`]
    /// must be called.
    pub fn engage(&mut self) -> Duration {
        self.visible = true;
        Duration::from_millis(self.settings.duration_ms)
    }

    /// Hides the overlay. The caller repositions the control afterwards.
    pub fn expire(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn asset(&self) -> AssetPath {
        AssetPath::new(self.settings.asset.as_str())
    }
}
