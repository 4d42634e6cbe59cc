use crate::config::{ExclusionList, RuleConfig};
use crate::error::Result;
use crate::types::{PairSignal, RuleVerdict};
use tracing::trace;

use super::distance_limit::DistanceLimitRule;
use super::exclusion::{ExclusionMatcher, ExclusionRule};
use super::last_words::LastWordsRule;
use super::start_words::StartWordsRule;

// A single predicate over one adjacent pair of sorted titles
pub trait PairRule {
    fn check(&self, signal: &PairSignal) -> bool;
    fn name(&self) -> &str;
}

/// Combines the four pair rules for one grouping pass.
///
/// The exclusion matcher is compiled here, once per engine, from the
/// exclusion list in effect for the pass. It is compiled even when the
/// exclusion rule is switched off, so a malformed list always surfaces.
pub struct RuleEngine<'a> {
    config: &'a RuleConfig,
    matcher: ExclusionMatcher,
}

impl<'a> RuleEngine<'a> {
    pub fn new(config: &'a RuleConfig, exclusions: &ExclusionList) -> Result<Self> {
        let matcher = ExclusionMatcher::new(exclusions, config.exclusion.entry_syntax)?;
        trace!("Compiled exclusion matcher: {}", matcher.as_str());
        Ok(Self { config, matcher })
    }

    /// Run every enabled rule. Disabled rules are left as `None`.
    pub fn evaluate(&self, signal: &PairSignal) -> RuleVerdict {
        let rules = self.config;
        RuleVerdict {
            distance: Self::run(
                rules.distance.enabled,
                &DistanceLimitRule::new(&rules.distance),
                signal,
            ),
            start_words: Self::run(
                rules.start_words.enabled,
                &StartWordsRule::new(&rules.start_words),
                signal,
            ),
            last_words: Self::run(rules.last_words.enabled, &LastWordsRule, signal),
            exclusion: Self::run(
                rules.exclusion.enabled,
                &ExclusionRule::new(&self.matcher),
                signal,
            ),
        }
    }

    /// Shorthand for `evaluate(signal).same_cluster()`
    pub fn same_cluster(&self, signal: &PairSignal) -> bool {
        self.evaluate(signal).same_cluster()
    }

    fn run(enabled: bool, rule: &dyn PairRule, signal: &PairSignal) -> Option<bool> {
        if !enabled {
            return None;
        }
        let passed = rule.check(signal);
        if !passed {
            trace!("   ⛔ {} rejected pair (distance {})", rule.name(), signal.distance);
        }
        Some(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExclusionSyntax;
    use crate::types::{DiffSegment, SegmentKind};

    fn signal(distance: usize, segments: Vec<DiffSegment>) -> PairSignal {
        PairSignal { distance, segments }
    }

    fn equal(value: &str, tokens: usize) -> DiffSegment {
        DiffSegment::new(SegmentKind::Equal, value, tokens)
    }

    fn added(value: &str, tokens: usize) -> DiffSegment {
        DiffSegment::new(SegmentKind::Added, value, tokens)
    }

    fn removed(value: &str, tokens: usize) -> DiffSegment {
        DiffSegment::new(SegmentKind::Removed, value, tokens)
    }

    fn engine_with(rules: &RuleConfig) -> RuleEngine<'_> {
        RuleEngine::new(rules, &ExclusionList::default()).unwrap()
    }

    #[test]
    fn all_rules_disabled_always_groups() {
        let rules = RuleConfig::all_disabled();
        let engine = engine_with(&rules);
        let verdict = engine.evaluate(&signal(99, vec![]));
        assert_eq!(verdict, RuleVerdict::default());
        assert!(verdict.same_cluster());
    }

    #[test]
    fn distance_rule_is_inclusive() {
        let mut rules = RuleConfig::all_disabled();
        rules.distance.enabled = true;
        rules.distance.max_distance = 3;
        let engine = engine_with(&rules);

        assert!(engine.same_cluster(&signal(3, vec![])));
        assert!(!engine.same_cluster(&signal(4, vec![])));
    }

    #[test]
    fn start_words_needs_leading_equal_segment_of_double_length() {
        let mut rules = RuleConfig::all_disabled();
        rules.start_words.enabled = true;
        rules.start_words.min_words = 2;
        let engine = engine_with(&rules);

        let shared_two_words = signal(1, vec![equal("Red Shoes ", 4), added("XL", 1)]);
        let shared_one_word = signal(1, vec![equal("Red ", 2), added("Shoes", 1)]);
        let leading_change = signal(1, vec![removed("Big ", 2), equal("Red Shoes", 3)]);

        assert!(engine.same_cluster(&shared_two_words));
        assert!(!engine.same_cluster(&shared_one_word));
        assert!(!engine.same_cluster(&leading_change));
        assert!(!engine.same_cluster(&signal(0, vec![])));
    }

    #[test]
    fn start_words_zero_minimum_still_needs_equal_start() {
        let mut rules = RuleConfig::all_disabled();
        rules.start_words.enabled = true;
        rules.start_words.min_words = 0;
        let engine = engine_with(&rules);

        assert!(engine.same_cluster(&signal(1, vec![equal("a", 1), added("b", 1)])));
        assert!(!engine.same_cluster(&signal(1, vec![added("b", 1)])));
    }

    #[test]
    fn last_words_requires_changed_tail() {
        let mut rules = RuleConfig::all_disabled();
        rules.last_words.enabled = true;
        let engine = engine_with(&rules);

        assert!(engine.same_cluster(&signal(1, vec![equal("Hat ", 2), added("XL", 1)])));
        assert!(engine.same_cluster(&signal(1, vec![equal("Hat ", 2), removed("XL", 1)])));
        assert!(!engine.same_cluster(&signal(1, vec![removed("Big ", 2), equal("Hat", 1)])));
        // Identical titles have no differing tail
        assert!(!engine.same_cluster(&signal(0, vec![equal("Hat", 1)])));
        assert!(!engine.same_cluster(&signal(0, vec![])));
    }

    #[test]
    fn exclusion_rule_rejects_digits_and_entries() {
        let mut rules = RuleConfig::all_disabled();
        rules.exclusion.enabled = true;
        let exclusions = ExclusionList::new(["pack"]);
        let engine = RuleEngine::new(&rules, &exclusions).unwrap();

        assert!(!engine.same_cluster(&signal(2, vec![equal("Size ", 2), removed("10", 1), added("9", 1)])));
        assert!(!engine.same_cluster(&signal(5, vec![equal("Soap ", 2), added("6-Pack", 1)])));
        assert!(engine.same_cluster(&signal(5, vec![equal("Soap ", 2), added("Lavender", 1)])));
    }

    #[test]
    fn verdict_lists_failed_rules() {
        let rules = RuleConfig::default();
        let engine = engine_with(&rules);
        let verdict = engine.evaluate(&signal(20, vec![removed("Blue", 1), added("Red 9", 3)]));

        assert_eq!(verdict.distance, Some(false));
        assert_eq!(verdict.start_words, Some(false));
        assert_eq!(verdict.last_words, Some(true));
        assert_eq!(verdict.exclusion, Some(false));
        assert_eq!(verdict.failed_rules(), vec!["distance", "start_words", "exclusion"]);
        assert!(!verdict.same_cluster());
    }

    #[test]
    fn malformed_exclusions_fail_even_when_rule_disabled() {
        let rules = RuleConfig::all_disabled();
        let exclusions = ExclusionList::new(["[unclosed"]);
        assert!(RuleEngine::new(&rules, &exclusions).is_err());

        let mut literal = RuleConfig::all_disabled();
        literal.exclusion.entry_syntax = ExclusionSyntax::Literal;
        assert!(RuleEngine::new(&literal, &exclusions).is_ok());
    }
}
