use crate::settings::Setting;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the component filter
///
/// A serializable snapshot of every rule toggle. Loaded once and handed to
/// `FilterEngine::from_config`; later changes to a `FilterConfig` value are
/// not seen by an already-built engine (toggle the engine's settings store
/// instead).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    // General ad removal
    pub hide_general_ads: bool,
    pub hide_community_posts: bool,
    pub hide_paid_content: bool,
    pub hide_suggestions: bool,
    pub hide_latest_posts: bool,
    pub hide_movie_upsell: bool,
    pub hide_chapter_teaser: bool,
    pub hide_community_guidelines: bool,
    pub hide_compact_banner: bool,
    pub hide_feed_survey: bool,
    pub hide_medical_panel: bool,
    pub hide_merchandise: bool,
    pub hide_info_panel: bool,
    pub hide_channel_guidelines: bool,
    pub hide_artist_card: bool,
    pub hide_self_sponsor: bool,
    pub hide_shorts: bool,

    // User-supplied block list, comma separated. Parsed once at engine
    // construction; edits afterwards require rebuilding the engine.
    pub enable_custom_filter: bool,
    pub custom_components: String,

    // Action bar buttons
    pub hide_like_button: bool,
    pub hide_dislike_button: bool,
    pub hide_download_button: bool,
    pub hide_action_buttons: bool,
    pub hide_playlist_button: bool,
    pub hide_share_button: bool,

    // Comments
    pub hide_comments_section: bool,
    pub hide_preview_comments: bool,

    // Playback recovery
    pub fix_playback: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            hide_general_ads: true,
            hide_community_posts: true,
            hide_paid_content: true,
            hide_suggestions: true,
            hide_latest_posts: true,
            hide_movie_upsell: true,
            hide_chapter_teaser: true,
            hide_community_guidelines: true,
            hide_compact_banner: true,
            hide_feed_survey: true,
            hide_medical_panel: true,
            hide_merchandise: true,
            hide_info_panel: true,
            hide_channel_guidelines: true,
            hide_artist_card: false,
            hide_self_sponsor: true,
            hide_shorts: false,
            enable_custom_filter: false,
            custom_components: String::new(),
            hide_like_button: false,
            hide_dislike_button: false,
            hide_download_button: false,
            hide_action_buttons: false,
            hide_playlist_button: false,
            hide_share_button: false,
            hide_comments_section: false,
            hide_preview_comments: false,
            fix_playback: false,
        }
    }
}

impl FilterConfig {
    /// Ad removal only; buttons, comments and shorts untouched
    pub fn minimal() -> Self {
        Self::default()
    }

    /// Every rule enabled, including button and comment hiding
    pub fn aggressive() -> Self {
        Self {
            hide_artist_card: true,
            hide_shorts: true,
            hide_like_button: true,
            hide_dislike_button: true,
            hide_download_button: true,
            hide_action_buttons: true,
            hide_playlist_button: true,
            hide_share_button: true,
            hide_comments_section: true,
            hide_preview_comments: true,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse filter config JSON")
    }

    /// Pairs every boolean field with the `Setting` it backs.
    pub(crate) fn flags(&self) -> Vec<(Setting, bool)> {
        vec![
            (Setting::HideGeneralAds, self.hide_general_ads),
            (Setting::HideCommunityPosts, self.hide_community_posts),
            (Setting::HidePaidContent, self.hide_paid_content),
            (Setting::HideSuggestions, self.hide_suggestions),
            (Setting::HideLatestPosts, self.hide_latest_posts),
            (Setting::HideMovieUpsell, self.hide_movie_upsell),
            (Setting::HideChapterTeaser, self.hide_chapter_teaser),
            (Setting::HideCommunityGuidelines, self.hide_community_guidelines),
            (Setting::HideCompactBanner, self.hide_compact_banner),
            (Setting::HideFeedSurvey, self.hide_feed_survey),
            (Setting::HideMedicalPanel, self.hide_medical_panel),
            (Setting::HideMerchandise, self.hide_merchandise),
            (Setting::HideInfoPanel, self.hide_info_panel),
            (Setting::HideChannelGuidelines, self.hide_channel_guidelines),
            (Setting::HideArtistCard, self.hide_artist_card),
            (Setting::HideSelfSponsor, self.hide_self_sponsor),
            (Setting::HideShorts, self.hide_shorts),
            (Setting::EnableCustomFilter, self.enable_custom_filter),
            (Setting::HideLikeButton, self.hide_like_button),
            (Setting::HideDislikeButton, self.hide_dislike_button),
            (Setting::HideDownloadButton, self.hide_download_button),
            (Setting::HideActionButtons, self.hide_action_buttons),
            (Setting::HidePlaylistButton, self.hide_playlist_button),
            (Setting::HideShareButton, self.hide_share_button),
            (Setting::HideCommentsSection, self.hide_comments_section),
            (Setting::HidePreviewComments, self.hide_preview_comments),
            (Setting::FixPlayback, self.fix_playback),
        ]
    }
}
