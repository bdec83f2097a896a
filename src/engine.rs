use crate::config::FilterConfig;
use crate::filters::{ButtonsFilter, CommentsFilter, Filter, GeneralAdsFilter};
use crate::settings::{InMemorySettings, SettingsProvider};
use crate::types::{BlockCategory, BlockResult, BlockStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

#[derive(Default)]
struct StatCounters {
    total_evaluations: AtomicU64,
    blocked: AtomicU64,
    ads_blocked: AtomicU64,
    buttons_blocked: AtomicU64,
    comments_blocked: AtomicU64,
}

/// The component filter engine
///
/// Holds the filter categories in a fixed order — general ads, action
/// buttons, comments — and evaluates one descriptor per call. The first
/// category that blocks wins; later categories are not consulted. The order
/// matters: the general ads allow list only protects against the general ads
/// rules, not against the categories after it.
pub struct FilterEngine {
    filters: Vec<Box<dyn Filter>>,
    stats: StatCounters,
}

impl FilterEngine {
    /// Build the standard category chain on top of a settings provider.
    pub fn new(settings: Arc<dyn SettingsProvider>) -> Self {
        Self::with_filters(vec![
            Box::new(GeneralAdsFilter::new(settings.clone())),
            Box::new(ButtonsFilter::new(settings.clone())),
            Box::new(CommentsFilter::new(settings)),
        ])
    }

    /// Build an engine over an in-memory snapshot of `config`.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(Arc::new(InMemorySettings::from_config(config)))
    }

    /// Build an engine from an explicit category list. The standard chain
    /// comes from `new`; this exists for hosts with bespoke categories and
    /// for tests that stub them.
    pub fn with_filters(filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            filters,
            stats: StatCounters::default(),
        }
    }

    /// Decide whether the descriptor should be suppressed.
    ///
    /// Called once per rendered component. An empty path yields false without
    /// consulting any category.
    pub fn evaluate(&self, path: &str, identifier: &str) -> bool {
        self.classify(path, identifier).is_some()
    }

    /// Like `evaluate`, but reports which category blocked and why.
    pub fn check(&self, path: &str, identifier: &str) -> BlockResult {
        match self.classify(path, identifier) {
            Some(category) => BlockResult {
                should_block: true,
                reason: match category {
                    BlockCategory::GeneralAds => "Matched an ad component rule".to_string(),
                    BlockCategory::Buttons => "Matched an action button rule".to_string(),
                    BlockCategory::Comments => "Matched a comments rule".to_string(),
                    BlockCategory::Clean => unreachable!("classify never blocks as Clean"),
                },
                category,
            },
            None => BlockResult {
                should_block: false,
                reason: if path.is_empty() {
                    "Empty path".to_string()
                } else {
                    "No rule matched".to_string()
                },
                category: BlockCategory::Clean,
            },
        }
    }

    fn classify(&self, path: &str, identifier: &str) -> Option<BlockCategory> {
        self.stats.total_evaluations.fetch_add(1, Ordering::Relaxed);

        if path.is_empty() {
            return None;
        }

        debug!(identifier, path, "evaluating descriptor");

        for filter in &self.filters {
            if filter.decide(path, identifier) {
                let category = filter.category();
                self.record_block(category);
                return Some(category);
            }
        }

        None
    }

    fn record_block(&self, category: BlockCategory) {
        self.stats.blocked.fetch_add(1, Ordering::Relaxed);
        let counter = match category {
            BlockCategory::GeneralAds => &self.stats.ads_blocked,
            BlockCategory::Buttons => &self.stats.buttons_blocked,
            BlockCategory::Comments => &self.stats.comments_blocked,
            BlockCategory::Clean => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot of the evaluation statistics.
    pub fn stats(&self) -> BlockStats {
        BlockStats {
            total_evaluations: self.stats.total_evaluations.load(Ordering::Relaxed),
            blocked: self.stats.blocked.load(Ordering::Relaxed),
            ads_blocked: self.stats.ads_blocked.load(Ordering::Relaxed),
            buttons_blocked: self.stats.buttons_blocked.load(Ordering::Relaxed),
            comments_blocked: self.stats.comments_blocked.load(Ordering::Relaxed),
        }
    }

    /// Reset the evaluation statistics.
    pub fn reset_stats(&self) {
        self.stats.total_evaluations.store(0, Ordering::Relaxed);
        self.stats.blocked.store(0, Ordering::Relaxed);
        self.stats.ads_blocked.store(0, Ordering::Relaxed);
        self.stats.buttons_blocked.store(0, Ordering::Relaxed);
        self.stats.comments_blocked.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    struct StubFilter {
        category: BlockCategory,
        verdict: bool,
        invoked: Arc<AtomicBool>,
    }

    impl Filter for StubFilter {
        fn category(&self) -> BlockCategory {
            self.category
        }

        fn decide(&self, _path: &str, _identifier: &str) -> bool {
            self.invoked.store(true, Ordering::SeqCst);
            self.verdict
        }
    }

    fn stub(category: BlockCategory, verdict: bool) -> (Box<dyn Filter>, Arc<AtomicBool>) {
        let invoked = Arc::new(AtomicBool::new(false));
        (
            Box::new(StubFilter {
                category,
                verdict,
                invoked: invoked.clone(),
            }),
            invoked,
        )
    }

    #[test]
    fn empty_path_skips_all_categories() {
        let (first, first_invoked) = stub(BlockCategory::GeneralAds, true);
        let engine = FilterEngine::with_filters(vec![first]);

        assert!(!engine.evaluate("", "carousel_ad"));
        assert!(!first_invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn first_blocking_category_short_circuits_the_rest() {
        let (first, _) = stub(BlockCategory::GeneralAds, true);
        let (second, second_invoked) = stub(BlockCategory::Buttons, true);
        let engine = FilterEngine::with_filters(vec![first, second]);

        assert!(engine.evaluate("ad_layout", ""));
        assert!(!second_invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn all_categories_consulted_when_none_block() {
        let (first, first_invoked) = stub(BlockCategory::GeneralAds, false);
        let (second, second_invoked) = stub(BlockCategory::Comments, false);
        let engine = FilterEngine::with_filters(vec![first, second]);

        assert!(!engine.evaluate("plain_video_cell", ""));
        assert!(first_invoked.load(Ordering::SeqCst));
        assert!(second_invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn check_reports_the_blocking_category() {
        let (first, _) = stub(BlockCategory::Comments, true);
        let engine = FilterEngine::with_filters(vec![first]);

        let result = engine.check("comments_entry_point_teaser", "");
        assert!(result.should_block);
        assert_eq!(result.category, BlockCategory::Comments);
    }

    #[test]
    fn stats_track_evaluations_and_blocks_per_category() {
        let (first, _) = stub(BlockCategory::GeneralAds, true);
        let engine = FilterEngine::with_filters(vec![first]);

        engine.evaluate("ad_layout", "");
        engine.evaluate("", "");

        let stats = engine.stats();
        assert_eq!(stats.total_evaluations, 2);
        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.ads_blocked, 1);
        assert_eq!(stats.comments_blocked, 0);

        engine.reset_stats();
        assert_eq!(engine.stats().total_evaluations, 0);
    }
}
