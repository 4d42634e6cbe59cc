use crate::error::{GroupingError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_max_distance() -> u32 {
    15
}

fn default_min_words() -> u32 {
    2
}

/// Everything one grouping pass reads: rule toggles plus the exclusion list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingConfig {
    #[serde(default)]
    pub rules: RuleConfig,
    /// Case-insensitive entries; any of them in a title-to-title change blocks grouping
    #[serde(default)]
    pub exclusions: ExclusionList,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub distance: DistanceRuleConfig,
    #[serde(default)]
    pub start_words: StartWordsRuleConfig,
    #[serde(default)]
    pub last_words: LastWordsRuleConfig,
    #[serde(default)]
    pub exclusion: ExclusionRuleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Largest Levenshtein distance allowed between neighbouring titles
    #[serde(default = "default_max_distance")]
    pub max_distance: u32,
}

impl Default for DistanceRuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: default_max_distance(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartWordsRuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minimum shared leading words. Compared against twice this many diff
    /// tokens, since every word is followed by a whitespace token.
    #[serde(default = "default_min_words")]
    pub min_words: u32,
}

impl Default for StartWordsRuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_words: default_min_words(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastWordsRuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LastWordsRuleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRuleConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub entry_syntax: ExclusionSyntax,
}

impl Default for ExclusionRuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            entry_syntax: ExclusionSyntax::default(),
        }
    }
}

/// How exclusion entries are spliced into the matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionSyntax {
    /// Entries are regular expression fragments
    #[default]
    Pattern,
    /// Entries are matched as plain text
    Literal,
}

impl std::str::FromStr for ExclusionSyntax {
    type Err = GroupingError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pattern" | "regex" => Ok(Self::Pattern),
            "literal" | "text" => Ok(Self::Literal),
            other => Err(GroupingError::InvalidConfiguration(format!(
                "unknown exclusion entry syntax '{other}' (expected 'pattern' or 'literal')"
            ))),
        }
    }
}

/// Names accepted for each rule in textual overrides
const RULE_NAMES: &[(&str, &[&str])] = &[
    ("distance", &["distance"]),
    ("start_words", &["start_words", "startwords"]),
    ("last_words", &["last_words", "lastwords"]),
    ("exclusion", &["exclusion", "blacklist"]),
];

fn canonical_rule_name(rule: &str) -> Result<&'static str> {
    let wanted = rule.trim().to_ascii_lowercase();
    RULE_NAMES
        .iter()
        .find(|(_, aliases)| aliases.contains(&wanted.as_str()))
        .map(|(name, _)| *name)
        .ok_or_else(|| GroupingError::InvalidConfiguration(format!("unknown rule '{rule}'")))
}

fn parse_flag(rule: &str, key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(GroupingError::InvalidConfiguration(format!(
            "{rule}.{key} must be true or false, got '{value}'"
        ))),
    }
}

fn parse_count(rule: &str, key: &str, value: &str) -> Result<u32> {
    value.trim().parse::<u32>().map_err(|_| {
        GroupingError::InvalidConfiguration(format!(
            "{rule}.{key} must be a non-negative integer, got '{value}'"
        ))
    })
}

impl RuleConfig {
    /// Every rule switched off; every adjacent pair groups together
    pub fn all_disabled() -> Self {
        let mut rules = Self::default();
        rules.distance.enabled = false;
        rules.start_words.enabled = false;
        rules.last_words.enabled = false;
        rules.exclusion.enabled = false;
        rules
    }

    pub fn set_enabled(&mut self, rule: &str, enabled: bool) -> Result<()> {
        match canonical_rule_name(rule)? {
            "distance" => self.distance.enabled = enabled,
            "start_words" => self.start_words.enabled = enabled,
            "last_words" => self.last_words.enabled = enabled,
            _ => self.exclusion.enabled = enabled,
        }
        Ok(())
    }

    /// Apply one textual override such as `distance.max_distance = 10`.
    /// Values are validated; nothing is coerced.
    pub fn set_param(&mut self, rule: &str, key: &str, value: &str) -> Result<()> {
        let rule = canonical_rule_name(rule)?;
        let key = key.trim();

        match (rule, key) {
            (_, "enabled") => {
                let enabled = parse_flag(rule, key, value)?;
                self.set_enabled(rule, enabled)?;
            }
            ("distance", "max_distance") => {
                self.distance.max_distance = parse_count(rule, key, value)?;
            }
            ("start_words", "min_words") => {
                self.start_words.min_words = parse_count(rule, key, value)?;
            }
            ("exclusion", "entry_syntax") => {
                self.exclusion.entry_syntax = value.parse()?;
            }
            _ => {
                return Err(GroupingError::InvalidConfiguration(format!(
                    "rule '{rule}' has no parameter '{key}'"
                )))
            }
        }
        Ok(())
    }
}

/// Ordered exclusion entries. Blank entries are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList {
    entries: Vec<String>,
}

impl ExclusionList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(Into::into)
                .filter(|entry: &String| !entry.trim().is_empty())
                .collect(),
        }
    }

    /// One entry per line, CRLF or LF
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line)))
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        if !entry.trim().is_empty() {
            self.entries.push(entry);
        }
    }
}

impl GroupingConfig {
    /// Parse a YAML config. Malformed or non-numeric values are reported as
    /// invalid configuration.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|err| GroupingError::InvalidConfiguration(err.to_string()))
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|err| GroupingError::InvalidConfiguration(err.to_string()))
    }
}
