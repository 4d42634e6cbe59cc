// Titlegroup Core Library
//
// Clusters near-duplicate product titles. Titles are sorted, then each one
// is compared with its sorted predecessor using edit distance, a word diff
// and an exclusion list to decide whether it continues the current cluster.

pub mod collation;
pub mod config;
pub mod diff;
pub mod distance;
pub mod error;
pub mod output;
pub mod processor;
pub mod rules;
pub mod types;

// Re-export main types and functions for easy use
pub use config::{ExclusionList, ExclusionSyntax, GroupingConfig, RuleConfig};
pub use error::{GroupingError, Result};
pub use output::OutputFormat;
pub use processor::{group, group_lines, group_with_trace, split_titles, TitleGrouper};
pub use rules::{ExclusionMatcher, RuleEngine};
pub use types::*;
