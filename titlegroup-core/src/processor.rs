use crate::collation::TitleCollator;
use crate::config::{ExclusionList, GroupingConfig, RuleConfig};
use crate::diff::diff_words;
use crate::distance::levenshtein;
use crate::error::Result;
use crate::rules::RuleEngine;
use crate::types::*;
use tracing::{debug, info};

impl PairSignal {
    /// Diff and distance from `previous` to `current`
    pub fn between(previous: &str, current: &str) -> Self {
        Self {
            distance: levenshtein(previous, current),
            segments: diff_words(previous, current),
        }
    }
}

/// Split a text blob into titles: CRLF or LF line breaks, blank lines dropped.
/// Titles are otherwise kept exactly as written.
pub fn split_titles(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Groups titles for one pass over a fixed rule set and exclusion list
pub struct TitleGrouper<'a> {
    engine: RuleEngine<'a>,
    collator: TitleCollator,
}

impl<'a> TitleGrouper<'a> {
    /// Fails if the exclusion list does not compile
    pub fn new(rules: &'a RuleConfig, exclusions: &ExclusionList) -> Result<Self> {
        Ok(Self {
            engine: RuleEngine::new(rules, exclusions)?,
            collator: TitleCollator::new()?,
        })
    }

    pub fn from_config(config: &'a GroupingConfig) -> Result<Self> {
        Self::new(&config.rules, &config.exclusions)
    }

    pub fn group_text(&self, text: &str) -> GroupingResult {
        self.group_lines(&split_titles(text))
    }

    pub fn group_lines<S: AsRef<str>>(&self, lines: &[S]) -> GroupingResult {
        let titles = self.sorted_titles(lines);
        self.group_sorted(&titles, None)
    }

    /// Group and keep one decision record per adjacent pair
    pub fn group_lines_with_trace<S: AsRef<str>>(&self, lines: &[S]) -> GroupingReport {
        let titles = self.sorted_titles(lines);
        let mut decisions = Vec::with_capacity(titles.len().saturating_sub(1));
        let result = self.group_sorted(&titles, Some(&mut decisions));
        GroupingReport { result, decisions }
    }

    fn sorted_titles<'s, S: AsRef<str>>(&self, lines: &'s [S]) -> Vec<&'s str> {
        let mut titles: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !line.trim().is_empty())
            .collect();
        self.collator.sort_titles(&mut titles);
        titles
    }

    /// Fold over the sorted titles, carrying the open cluster as the last
    /// element of the accumulator
    fn group_sorted(
        &self,
        titles: &[&str],
        mut decisions: Option<&mut Vec<PairDecision>>,
    ) -> GroupingResult {
        let Some(first) = titles.first() else {
            info!("Grouping products by title... nothing to group");
            return GroupingResult::default();
        };

        info!("Grouping {} products by title...", titles.len());

        let seed = vec![Cluster::new(ClusterEntry {
            title: first.to_string(),
            distance: 0,
        })];

        let clusters = titles.windows(2).fold(seed, |mut clusters, pair| {
            let (previous, current) = (pair[0], pair[1]);
            let signal = PairSignal::between(previous, current);
            let verdict = self.engine.evaluate(&signal);
            let same_cluster = verdict.same_cluster();

            debug!(
                "{} '{}' after '{}' (distance {}, failed: {:?})",
                if same_cluster { "➕" } else { "🆕" },
                current,
                previous,
                signal.distance,
                verdict.failed_rules()
            );

            if let Some(decisions) = decisions.as_deref_mut() {
                decisions.push(PairDecision {
                    previous: previous.to_string(),
                    current: current.to_string(),
                    distance: signal.distance,
                    changed: signal
                        .changed_values()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    verdict,
                    same_cluster,
                });
            }

            let entry = ClusterEntry {
                title: current.to_string(),
                distance: signal.distance,
            };
            match clusters.last_mut() {
                Some(open) if same_cluster => open.push(entry),
                _ => clusters.push(Cluster::new(entry)),
            }
            clusters
        });

        info!(
            "✅ Grouped {} products into {} clusters",
            titles.len(),
            clusters.len()
        );
        GroupingResult { clusters }
    }
}

/// Group a newline-separated blob of titles
pub fn group(
    text: &str,
    rules: &RuleConfig,
    exclusions: &ExclusionList,
) -> Result<GroupingResult> {
    Ok(TitleGrouper::new(rules, exclusions)?.group_text(text))
}

/// Group already split lines; blank lines are still dropped
pub fn group_lines<S: AsRef<str>>(
    lines: &[S],
    rules: &RuleConfig,
    exclusions: &ExclusionList,
) -> Result<GroupingResult> {
    Ok(TitleGrouper::new(rules, exclusions)?.group_lines(lines))
}

/// Group a blob and record the decision for every adjacent pair
pub fn group_with_trace(
    text: &str,
    rules: &RuleConfig,
    exclusions: &ExclusionList,
) -> Result<GroupingReport> {
    Ok(TitleGrouper::new(rules, exclusions)?.group_lines_with_trace(&split_titles(text)))
}
