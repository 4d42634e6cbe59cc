use crate::config::{ExclusionList, ExclusionSyntax};
use crate::error::{GroupingError, Result};
use crate::types::PairSignal;
use regex::Regex;
use std::borrow::Cow;

use super::engine::PairRule;

/// Joins changed diff values before matching. Never produced inside a word.
pub const CHANGE_SEPARATOR: &str = "~";

/// Any digit in a change always counts as excluded
const DIGIT_BRANCH: &str = "[0-9]";

/// One case-insensitive alternation: a digit branch plus every exclusion entry
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    pattern: Regex,
}

impl ExclusionMatcher {
    pub fn new(exclusions: &ExclusionList, syntax: ExclusionSyntax) -> Result<Self> {
        let branches: Vec<Cow<'_, str>> = exclusions
            .entries()
            .iter()
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| match syntax {
                ExclusionSyntax::Pattern => Cow::Borrowed(entry.as_str()),
                ExclusionSyntax::Literal => Cow::Owned(regex::escape(entry)),
            })
            .collect();

        let source = if branches.is_empty() {
            format!("(?i)({DIGIT_BRANCH})")
        } else {
            format!("(?i)({DIGIT_BRANCH})|({})", branches.join("|"))
        };

        match Regex::new(&source) {
            Ok(pattern) => Ok(Self { pattern }),
            Err(source_err) => Err(Self::locate_failure(&branches, source, source_err)),
        }
    }

    /// Name the first entry that does not compile on its own, falling back
    /// to the combined pattern when the entries only break once joined
    fn locate_failure(
        branches: &[Cow<'_, str>],
        combined: String,
        err: regex::Error,
    ) -> GroupingError {
        for branch in branches {
            if let Err(branch_err) = Regex::new(&format!("(?i){branch}")) {
                return GroupingError::PatternCompilation {
                    pattern: branch.to_string(),
                    source: branch_err,
                };
            }
        }
        GroupingError::PatternCompilation {
            pattern: combined,
            source: err,
        }
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// True when the joined changed values hit the digit branch or any entry
    pub fn matches<S: AsRef<str>>(&self, changed_values: &[S]) -> bool {
        let joined = changed_values
            .iter()
            .map(|value| value.as_ref())
            .collect::<Vec<&str>>()
            .join(CHANGE_SEPARATOR);
        self.pattern.is_match(&joined)
    }
}

/// Passes when nothing that changed between the two titles is excluded
pub struct ExclusionRule<'a> {
    matcher: &'a ExclusionMatcher,
}

impl<'a> ExclusionRule<'a> {
    pub fn new(matcher: &'a ExclusionMatcher) -> Self {
        Self { matcher }
    }
}

impl<'a> PairRule for ExclusionRule<'a> {
    fn check(&self, signal: &PairSignal) -> bool {
        !self.matcher.matches(signal.changed_values().as_slice())
    }

    fn name(&self) -> &str {
        "Exclusion"
    }
}
