use crate::config::DistanceRuleConfig;
use crate::types::PairSignal;

use super::engine::PairRule;

/// Neighbouring titles must be within `max_distance` edits
pub struct DistanceLimitRule<'a> {
    config: &'a DistanceRuleConfig,
}

impl<'a> DistanceLimitRule<'a> {
    pub fn new(config: &'a DistanceRuleConfig) -> Self {
        Self { config }
    }
}

impl<'a> PairRule for DistanceLimitRule<'a> {
    fn check(&self, signal: &PairSignal) -> bool {
        signal.distance <= self.config.max_distance as usize
    }

    fn name(&self) -> &str {
        "DistanceLimit"
    }
}
