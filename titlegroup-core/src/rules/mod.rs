// Pair rules - decide whether two neighbouring sorted titles share a cluster.
// - engine.rs: PairRule trait and the RuleEngine that combines the rules
// - distance_limit.rs: Levenshtein distance ceiling
// - start_words.rs: shared leading words
// - last_words.rs: differing tail
// - exclusion.rs: digit and exclusion-list matcher

pub mod distance_limit;
pub mod engine;
pub mod exclusion;
pub mod last_words;
pub mod start_words;

pub use engine::*;
pub use exclusion::ExclusionMatcher;
