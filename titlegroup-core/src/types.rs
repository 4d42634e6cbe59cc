use serde::{Deserialize, Serialize};

// ===== DIFF TYPES =====
// A diff is an ordered run of segments that rebuilds the current title from
// the previous one. Equal segments carry the current title's text.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Equal,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSegment {
    pub value: String,
    pub kind: SegmentKind,
    /// Number of diff tokens (word runs and whitespace runs) in `value`
    pub token_count: usize,
}

impl DiffSegment {
    pub fn new(kind: SegmentKind, value: impl Into<String>, token_count: usize) -> Self {
        Self {
            value: value.into(),
            kind,
            token_count,
        }
    }

    pub fn is_change(&self) -> bool {
        matches!(self.kind, SegmentKind::Added | SegmentKind::Removed)
    }
}

/// Signals computed once for an adjacent pair of sorted titles
#[derive(Debug, Clone)]
pub struct PairSignal {
    pub distance: usize,
    pub segments: Vec<DiffSegment>,
}

impl PairSignal {
    pub fn first_segment(&self) -> Option<&DiffSegment> {
        self.segments.first()
    }

    pub fn last_segment(&self) -> Option<&DiffSegment> {
        self.segments.last()
    }

    /// Values of every added or removed segment, in diff order
    pub fn changed_values(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter(|segment| segment.is_change())
            .map(|segment| segment.value.as_str())
            .collect()
    }
}

// ===== RULE OUTCOMES =====

/// Per-rule outcome for one pair. `None` means the rule was disabled and
/// did not take part in the decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub distance: Option<bool>,
    pub start_words: Option<bool>,
    pub last_words: Option<bool>,
    pub exclusion: Option<bool>,
}

impl RuleVerdict {
    /// All enabled rules passed
    pub fn same_cluster(&self) -> bool {
        [
            self.distance,
            self.start_words,
            self.last_words,
            self.exclusion,
        ]
        .iter()
        .all(|outcome| outcome.unwrap_or(true))
    }

    /// Names of the enabled rules that rejected the pair
    pub fn failed_rules(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if self.distance == Some(false) {
            failed.push("distance");
        }
        if self.start_words == Some(false) {
            failed.push("start_words");
        }
        if self.last_words == Some(false) {
            failed.push("last_words");
        }
        if self.exclusion == Some(false) {
            failed.push("exclusion");
        }
        failed
    }
}

// ===== GROUPING RESULT =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterEntry {
    pub title: String,
    /// Edit distance from the previous title in sorted order (0 for the first title)
    pub distance: usize,
}

/// A non-empty run of consecutive sorted titles judged related
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cluster {
    entries: Vec<ClusterEntry>,
}

impl Cluster {
    pub fn new(first: ClusterEntry) -> Self {
        Self {
            entries: vec![first],
        }
    }

    pub fn push(&mut self, entry: ClusterEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ClusterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.title.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub clusters: Vec<Cluster>,
}

impl GroupingResult {
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Total number of titles across all clusters
    pub fn title_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum()
    }

    /// All titles in result order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().flat_map(Cluster::titles)
    }
}

// ===== PAIR TRACE =====

/// Why one sorted title did or did not join its predecessor's cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairDecision {
    pub previous: String,
    pub current: String,
    pub distance: usize,
    /// Added and removed diff values between the two titles
    pub changed: Vec<String>,
    pub verdict: RuleVerdict,
    pub same_cluster: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingReport {
    pub result: GroupingResult,
    pub decisions: Vec<PairDecision>,
}
