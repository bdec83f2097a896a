use crate::rules::{BlockRule, RuleRegister};
use crate::settings::{Setting, SettingsProvider};
use crate::types::BlockCategory;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::debug;

/// One filter category: a grouping of related rules plus any category-local
/// logic, producing a single block/pass decision per descriptor.
///
/// The category set is closed (general ads, action buttons, comments); the
/// trait exists so `FilterEngine` can hold them uniformly and tests can
/// substitute stubs.
pub trait Filter: Send + Sync {
    fn category(&self) -> BlockCategory;
    fn decide(&self, path: &str, identifier: &str) -> bool;
}

/// Paths that must never be blocked by the general ads category, even when a
/// block pattern also matches. Home/related video cells and anything inside a
/// comment thread share substrings with ad layouts; the generic suffixes
/// ("menu", "root", "-button", ...) belong to container plumbing.
const DO_NOT_BLOCK: [&str; 11] = [
    "home_video_with_context",
    "related_video_with_context",
    "comment_thread",
    "download_",
    "library_recent_shelf",
    "menu",
    "root",
    "-count",
    "-space",
    "-button",
    "playlist_add_to_option_wrapper",
];

/// Suppresses advertising, promotional and community components by path or
/// identifier substring.
pub struct GeneralAdsFilter {
    path_register: RuleRegister,
    identifier_register: RuleRegister,
}

impl GeneralAdsFilter {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        let s = &settings;
        let rule = |setting: Setting, patterns: &[&str]| {
            Arc::new(BlockRule::new(s.clone(), Some(setting), patterns))
        };

        let general_ads = rule(
            Setting::HideGeneralAds,
            &[
                "video_display_full_buttoned_layout",
                "_ad",
                "ad_",
                "ads_video_with_context",
                "banner_text_icon",
                "cell_divider",
                "reels_player_overlay",
                "watch_metadata_app_promo",
                "video_display_full_layout",
            ],
        );
        let movie_upsell = rule(
            Setting::HideMovieUpsell,
            &[
                "browsy_bar",
                "compact_movie",
                "horizontal_movie_shelf",
                "movie_and_show_upsell_card",
            ],
        );

        let mut path_register = RuleRegister::new();
        path_register.register_all([
            general_ads,
            rule(Setting::HideCommunityPosts, &["post_base_wrapper"]),
            rule(Setting::HidePaidContent, &["paid_content_overlay"]),
            rule(Setting::HideSuggestions, &["horizontal_video_shelf"]),
            rule(Setting::HideLatestPosts, &["post_shelf"]),
            movie_upsell,
            rule(Setting::HideChapterTeaser, &["expandable_metadata"]),
            rule(Setting::HideCommunityGuidelines, &["community_guidelines"]),
            rule(Setting::HideCompactBanner, &["compact_banner"]),
            rule(Setting::HideFeedSurvey, &["in_feed_survey"]),
            rule(Setting::HideMedicalPanel, &["medical_panel"]),
            rule(Setting::HideMerchandise, &["product_carousel"]),
            rule(
                Setting::HideInfoPanel,
                &["publisher_transparency_panel", "single_item_information_panel"],
            ),
            rule(Setting::HideChannelGuidelines, &["channel_guidelines_entry_banner"]),
            rule(Setting::HideArtistCard, &["official_card"]),
            rule(Setting::HideSelfSponsor, &["cta_shelf_card"]),
            Arc::new(BlockRule::custom(
                s.clone(),
                Setting::EnableCustomFilter,
                Setting::CustomComponents,
            )),
        ]);

        let mut identifier_register = RuleRegister::new();
        identifier_register.register_all([
            rule(Setting::HideShorts, &["shorts_shelf", "inline_shorts"]),
            rule(Setting::HideGeneralAds, &["carousel_ad"]),
        ]);

        Self {
            path_register,
            identifier_register,
        }
    }
}

impl Filter for GeneralAdsFilter {
    fn category(&self) -> BlockCategory {
        BlockCategory::GeneralAds
    }

    fn decide(&self, path: &str, identifier: &str) -> bool {
        // The allow list dominates every rule in this category
        if DO_NOT_BLOCK.iter().any(|p| path.contains(p)) {
            return false;
        }

        if !(self.path_register.any_match(path) || self.identifier_register.any_match(identifier))
        {
            return false;
        }

        debug!(identifier, path, "blocked general ad component");
        true
    }
}

/// How many generic action-button sightings after a dislike button are
/// presumed to be ordinary buttons before the share control shows up.
const SHARE_PROTECT_WINDOW: i32 = 4;

/// Suppresses individual action bar buttons, and the whole action bar when
/// every individual button is already configured away.
///
/// The share button renders with the same generic action-button pattern as
/// the rest of the row and carries no distinguishing tag, so it is protected
/// positionally: a dislike-button sighting marks the start of a button group
/// and arms a countdown, and generic-pattern matches pass through while the
/// countdown is positive. This encodes the upstream rendering order; keep the
/// reset value and threshold as they are.
pub struct ButtonsFilter {
    settings: Arc<dyn SettingsProvider>,
    path_register: RuleRegister,
    action_buttons_rule: Arc<BlockRule>,
    dislike_rule: Arc<BlockRule>,
    action_bar_rule: BlockRule,
    button_rules: [Arc<BlockRule>; 5],
    do_not_block_counter: AtomicI32,
}

impl ButtonsFilter {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        let s = &settings;
        let like = Arc::new(BlockRule::new(
            s.clone(),
            Some(Setting::HideLikeButton),
            &["|like_button"],
        ));
        let dislike_rule = Arc::new(BlockRule::new(
            s.clone(),
            Some(Setting::HideDislikeButton),
            &["dislike_button"],
        ));
        let download = Arc::new(BlockRule::new(
            s.clone(),
            Some(Setting::HideDownloadButton),
            &["download_button"],
        ));
        let action_buttons_rule = Arc::new(BlockRule::new(
            s.clone(),
            Some(Setting::HideActionButtons),
            &["ContainerType|video_action_button"],
        ));
        let playlist = Arc::new(BlockRule::new(
            s.clone(),
            Some(Setting::HidePlaylistButton),
            &["save_to_playlist_button"],
        ));

        let action_bar_rule = BlockRule::new(s.clone(), None, &["video_action_bar"]);

        let mut path_register = RuleRegister::new();
        path_register.register_all([
            like.clone(),
            dislike_rule.clone(),
            download.clone(),
            playlist.clone(),
        ]);

        let button_rules = [
            like,
            dislike_rule.clone(),
            download,
            action_buttons_rule.clone(),
            playlist,
        ];

        Self {
            settings,
            path_register,
            action_buttons_rule,
            dislike_rule,
            action_bar_rule,
            button_rules,
            do_not_block_counter: AtomicI32::new(SHARE_PROTECT_WINDOW),
        }
    }

    /// The whole action bar collapses only when every individual button in it
    /// is already configured to be hidden.
    fn hide_action_bar(&self) -> bool {
        self.button_rules.iter().all(|rule| rule.enabled())
    }
}

impl Filter for ButtonsFilter {
    fn category(&self) -> BlockCategory {
        BlockCategory::Buttons
    }

    fn decide(&self, path: &str, identifier: &str) -> bool {
        if self.hide_action_bar() && self.action_bar_rule.matches(identifier) {
            return true;
        }

        let is_action_button = self.action_buttons_rule.matches(path);

        // A dislike button marks the start of a fresh action button group
        if self.dislike_rule.matches(path) {
            self.do_not_block_counter
                .store(SHARE_PROTECT_WINDOW, Ordering::SeqCst);
        }

        // fetch_sub keeps the compare-then-decrement indivisible under
        // concurrent evaluation
        if is_action_button && self.do_not_block_counter.fetch_sub(1, Ordering::SeqCst) > 0 {
            if self.settings.get_bool(Setting::HideShareButton) {
                debug!(path, "hiding share button");
                return true;
            }
            return false;
        }

        if (is_action_button
            && self.do_not_block_counter.load(Ordering::SeqCst) <= 0
            && self.action_buttons_rule.enabled())
            || self.path_register.any_match(path)
        {
            debug!(path, "blocked action button component");
            true
        } else {
            false
        }
    }
}

/// Suppresses the comments section and the comment preview teaser, each under
/// its own toggle. Only the path signal is consulted.
pub struct CommentsFilter {
    path_register: RuleRegister,
}

impl CommentsFilter {
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        let mut path_register = RuleRegister::new();
        path_register.register_all([
            Arc::new(BlockRule::new(
                settings.clone(),
                Some(Setting::HideCommentsSection),
                &["video_metadata_carousel", "_comments"],
            )),
            Arc::new(BlockRule::new(
                settings.clone(),
                Some(Setting::HidePreviewComments),
                &[
                    "carousel_item",
                    "comments_entry_point_teaser",
                    "comments_entry_point_simplebox",
                ],
            )),
        ]);
        Self { path_register }
    }
}

impl Filter for CommentsFilter {
    fn category(&self) -> BlockCategory {
        BlockCategory::Comments
    }

    fn decide(&self, path: &str, _identifier: &str) -> bool {
        if !self.path_register.any_match(path) {
            return false;
        }

        debug!(path, "blocked comments component");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::InMemorySettings;

    const ACTION_BUTTON_PATH: &str = "ContainerType|video_action_button.eml";

    const ALL_BUTTON_FLAGS: [Setting; 5] = [
        Setting::HideLikeButton,
        Setting::HideDislikeButton,
        Setting::HideDownloadButton,
        Setting::HideActionButtons,
        Setting::HidePlaylistButton,
    ];

    fn settings_with(flags: &[Setting]) -> Arc<InMemorySettings> {
        let settings = Arc::new(InMemorySettings::new());
        for &flag in flags {
            settings.set_bool(flag, true);
        }
        settings
    }

    #[test]
    fn general_ads_blocks_by_path_and_identifier() {
        let settings = settings_with(&[Setting::HideGeneralAds, Setting::HideShorts]);
        let filter = GeneralAdsFilter::new(settings);

        assert!(filter.decide("cell_divider.eml", ""));
        assert!(filter.decide("", "shorts_shelf"));
        assert!(filter.decide("", "carousel_ad"));
        assert!(!filter.decide("plain_video_cell", "plain_identifier"));
    }

    #[test]
    fn general_ads_allow_list_dominates() {
        let settings = settings_with(&[Setting::HideGeneralAds]);
        let filter = GeneralAdsFilter::new(settings);

        // "_ad" would match, but the comment thread context is protected
        assert!(!filter.decide("comment_thread|banner_ad_layout", ""));
        // A real download control is spared from the "ad_" pattern
        assert!(!filter.decide("download_ad_free", ""));
    }

    #[test]
    fn general_ads_allow_list_does_not_consult_identifier() {
        let settings = settings_with(&[Setting::HideGeneralAds]);
        let filter = GeneralAdsFilter::new(settings);

        // The allow list only inspects the path, so an ad identifier under an
        // unprotected path still blocks
        assert!(filter.decide("plain_video_cell", "carousel_ad"));
    }

    #[test]
    fn custom_rule_participates_in_path_register() {
        let settings = Arc::new(InMemorySettings::new());
        settings.set_string(Setting::CustomComponents, "my_blocked_shelf");
        let filter = GeneralAdsFilter::new(settings.clone());

        assert!(!filter.decide("my_blocked_shelf.eml", ""));
        settings.set_bool(Setting::EnableCustomFilter, true);
        assert!(filter.decide("my_blocked_shelf.eml", ""));
    }

    #[test]
    fn share_button_is_protected_for_four_sightings() {
        let settings = settings_with(&ALL_BUTTON_FLAGS);
        let filter = ButtonsFilter::new(settings);

        // A dislike button resets the countdown and is itself blocked
        assert!(filter.decide("dislike_button.eml", ""));

        for _ in 0..4 {
            assert!(!filter.decide(ACTION_BUTTON_PATH, ""));
        }
        // Countdown exhausted: the fifth sighting is an unwanted button
        assert!(filter.decide(ACTION_BUTTON_PATH, ""));
    }

    #[test]
    fn protected_sightings_block_when_share_hiding_is_on() {
        let mut flags = ALL_BUTTON_FLAGS.to_vec();
        flags.push(Setting::HideShareButton);
        let settings = settings_with(&flags);
        let filter = ButtonsFilter::new(settings);

        filter.decide("dislike_button.eml", "");
        assert!(filter.decide(ACTION_BUTTON_PATH, ""));
    }

    #[test]
    fn dislike_sighting_rearms_the_countdown() {
        let settings = settings_with(&ALL_BUTTON_FLAGS);
        let filter = ButtonsFilter::new(settings);

        filter.decide("dislike_button.eml", "");
        for _ in 0..4 {
            filter.decide(ACTION_BUTTON_PATH, "");
        }
        assert!(filter.decide(ACTION_BUTTON_PATH, ""));

        // A new dislike sighting starts a fresh group
        filter.decide("dislike_button.eml", "");
        assert!(!filter.decide(ACTION_BUTTON_PATH, ""));
    }

    #[test]
    fn action_bar_collapses_only_when_all_five_buttons_hidden() {
        let settings = settings_with(&ALL_BUTTON_FLAGS);
        let filter = ButtonsFilter::new(settings.clone());
        assert!(filter.decide("", "video_action_bar"));

        settings.set_bool(Setting::HideDownloadButton, false);
        assert!(!filter.decide("", "video_action_bar"));
    }

    #[test]
    fn individual_button_rules_block_their_paths() {
        let settings = settings_with(&[Setting::HideLikeButton]);
        let filter = ButtonsFilter::new(settings);

        assert!(filter.decide("CellType|like_button.eml", ""));
        assert!(!filter.decide("save_to_playlist_button.eml", ""));
    }

    #[test]
    fn comment_rules_toggle_independently() {
        let settings = settings_with(&[Setting::HidePreviewComments]);
        let filter = CommentsFilter::new(settings.clone());

        assert!(filter.decide("comments_entry_point_teaser.eml", ""));
        assert!(!filter.decide("video_metadata_carousel|_comments", ""));

        settings.set_bool(Setting::HidePreviewComments, false);
        settings.set_bool(Setting::HideCommentsSection, true);
        assert!(!filter.decide("comments_entry_point_teaser.eml", ""));
        assert!(filter.decide("video_metadata_carousel|_comments", ""));
    }

    #[test]
    fn comments_filter_ignores_identifier() {
        let settings = settings_with(&[Setting::HideCommentsSection]);
        let filter = CommentsFilter::new(settings);
        assert!(!filter.decide("plain_video_cell", "_comments"));
    }
}
