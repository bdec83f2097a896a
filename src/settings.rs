use crate::config::FilterConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Every toggle the filter engine reads from the host settings store.
///
/// Each boolean setting gates exactly one rule (or, for `FixPlayback`, the
/// recovery task); `CustomComponents` is the one string-valued setting and
/// holds the user's comma-separated block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Setting {
    // General ad removal
    HideGeneralAds,
    HideCommunityPosts,
    HidePaidContent,
    HideSuggestions,
    HideLatestPosts,
    HideMovieUpsell,
    HideChapterTeaser,
    HideCommunityGuidelines,
    HideCompactBanner,
    HideFeedSurvey,
    HideMedicalPanel,
    HideMerchandise,
    HideInfoPanel,
    HideChannelGuidelines,
    HideArtistCard,
    HideSelfSponsor,
    HideShorts,
    EnableCustomFilter,
    CustomComponents,

    // Action bar buttons
    HideLikeButton,
    HideDislikeButton,
    HideDownloadButton,
    HideActionButtons,
    HidePlaylistButton,
    HideShareButton,

    // Comments
    HideCommentsSection,
    HidePreviewComments,

    // Playback recovery
    FixPlayback,
}

/// Read access to the host settings store.
///
/// `get_bool` is consulted live on every rule evaluation, so toggling a flag
/// takes effect on the next descriptor. `get_string` is only read once, at
/// filter construction time (the custom component list is not re-parsed).
pub trait SettingsProvider: Send + Sync {
    fn get_bool(&self, setting: Setting) -> bool;
    fn get_string(&self, setting: Setting) -> String;
}

/// In-memory settings store, the default `SettingsProvider`.
///
/// Hosts embedding the engine can implement `SettingsProvider` over their own
/// preference store instead; this one is used by `FilterEngine::from_config`
/// and by tests.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    flags: RwLock<HashMap<Setting, bool>>,
    custom_components: RwLock<String>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a `FilterConfig` into a live settings store.
    pub fn from_config(config: &FilterConfig) -> Self {
        let settings = Self::new();
        for (setting, value) in config.flags() {
            settings.set_bool(setting, value);
        }
        settings.set_string(Setting::CustomComponents, &config.custom_components);
        settings
    }

    pub fn set_bool(&self, setting: Setting, value: bool) {
        self.flags.write().unwrap().insert(setting, value);
    }

    pub fn set_string(&self, setting: Setting, value: &str) {
        if setting == Setting::CustomComponents {
            *self.custom_components.write().unwrap() = value.to_string();
        }
    }
}

impl SettingsProvider for InMemorySettings {
    fn get_bool(&self, setting: Setting) -> bool {
        // Unset flags read as disabled
        *self.flags.read().unwrap().get(&setting).unwrap_or(&false)
    }

    fn get_string(&self, setting: Setting) -> String {
        match setting {
            Setting::CustomComponents => self.custom_components.read().unwrap().clone(),
            _ => String::new(),
        }
    }
}
