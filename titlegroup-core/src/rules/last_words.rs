use crate::types::{PairSignal, SegmentKind};

use super::engine::PairRule;

/// Titles must differ in their tail: the last diff segment is an addition
/// or removal. Identical titles fail.
pub struct LastWordsRule;

impl PairRule for LastWordsRule {
    fn check(&self, signal: &PairSignal) -> bool {
        matches!(
            signal.last_segment().map(|segment| segment.kind),
            Some(SegmentKind::Added | SegmentKind::Removed)
        )
    }

    fn name(&self) -> &str {
        "LastWords"
    }
}
