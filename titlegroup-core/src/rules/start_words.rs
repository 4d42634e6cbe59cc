use crate::config::StartWordsRuleConfig;
use crate::types::{PairSignal, SegmentKind};

use super::engine::PairRule;

/// Titles must open with a shared run of at least `min_words` words.
///
/// The shared run is measured in diff tokens, where a word and the
/// whitespace after it are two tokens, so the threshold is `min_words * 2`.
/// An empty diff has no shared prefix and fails.
pub struct StartWordsRule<'a> {
    config: &'a StartWordsRuleConfig,
}

impl<'a> StartWordsRule<'a> {
    pub fn new(config: &'a StartWordsRuleConfig) -> Self {
        Self { config }
    }

    pub fn required_tokens(&self) -> u64 {
        u64::from(self.config.min_words) * 2
    }
}

impl<'a> PairRule for StartWordsRule<'a> {
    fn check(&self, signal: &PairSignal) -> bool {
        match signal.first_segment() {
            Some(first) if first.kind == SegmentKind::Equal => {
                first.token_count as u64 >= self.required_tokens()
            }
            _ => false,
        }
    }

    fn name(&self) -> &str {
        "StartWords"
    }
}
