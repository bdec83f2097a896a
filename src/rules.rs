use crate::settings::{Setting, SettingsProvider};
use std::sync::Arc;

/// A single named block rule: one optional settings toggle plus a fixed list
/// of substrings to match against a descriptor signal.
///
/// The pattern list is frozen at construction. A rule with no setting is
/// structurally always enabled but is skipped by aggregate all-enabled checks
/// (see `ButtonsFilter::hide_action_bar`), which only ever iterate rules that
/// carry a setting.
pub struct BlockRule {
    setting: Option<Setting>,
    patterns: Vec<String>,
    settings: Arc<dyn SettingsProvider>,
}

impl BlockRule {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        setting: Option<Setting>,
        patterns: &[&str],
    ) -> Self {
        Self {
            setting,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            settings,
        }
    }

    /// A rule whose patterns come from a user-maintained, comma-separated
    /// settings string. The string is read and split exactly once, here;
    /// later edits to the setting are not observed until the owning filter is
    /// rebuilt. Empty segments are dropped so a trailing comma cannot produce
    /// a match-everything pattern.
    pub fn custom(
        settings: Arc<dyn SettingsProvider>,
        setting: Setting,
        list_setting: Setting,
    ) -> Self {
        let patterns = settings
            .get_string(list_setting)
            .split(',')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            setting: Some(setting),
            patterns,
            settings,
        }
    }

    /// Live read of the backing settings flag; true when the rule has none.
    pub fn enabled(&self) -> bool {
        match self.setting {
            Some(setting) => self.settings.get_bool(setting),
            None => true,
        }
    }

    /// True iff any pattern is a literal substring of `candidate`.
    /// Empty candidates never match.
    pub fn matches(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.patterns.iter().any(|p| candidate.contains(p.as_str()))
    }
}

/// An ordered collection of rules evaluated together.
///
/// Rules are shared (`Arc`) because a filter may keep a direct handle to a
/// rule it also registered, e.g. the dislike rule in `ButtonsFilter`.
#[derive(Default)]
pub struct RuleRegister {
    rules: Vec<Arc<BlockRule>>,
}

impl RuleRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_all(&mut self, rules: impl IntoIterator<Item = Arc<BlockRule>>) {
        self.rules.extend(rules);
    }

    /// Evaluates rules in registration order, skipping disabled ones, and
    /// short-circuits on the first match.
    pub fn any_match(&self, candidate: &str) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.enabled())
            .any(|rule| rule.matches(candidate))
    }
}
