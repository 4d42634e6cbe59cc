//! `--set rule.key=value` and `--disable rule` handling.

use std::str::FromStr;
use thiserror::Error;
use titlegroup_core::RuleConfig;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OverrideParseError {
    #[error("override '{0}' is missing '=' (expected rule.key=value)")]
    MissingValue(String),

    #[error("override '{0}' is missing a parameter name (expected rule.key=value)")]
    MissingKey(String),
}

/// One parsed `rule.key=value` override, applied after the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOverride {
    pub rule: String,
    pub key: String,
    pub value: String,
}

impl FromStr for RuleOverride {
    type Err = OverrideParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (path, value) = raw
            .split_once('=')
            .ok_or_else(|| OverrideParseError::MissingValue(raw.to_string()))?;
        let (rule, key) = path
            .split_once('.')
            .filter(|(rule, key)| !rule.trim().is_empty() && !key.trim().is_empty())
            .ok_or_else(|| OverrideParseError::MissingKey(raw.to_string()))?;

        Ok(Self {
            rule: rule.trim().to_string(),
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        })
    }
}

/// Apply overrides in order, then switch off each disabled rule
pub fn apply_overrides(
    rules: &mut RuleConfig,
    overrides: &[RuleOverride],
    disabled: &[String],
) -> titlegroup_core::Result<()> {
    for item in overrides {
        rules.set_param(&item.rule, &item.key, &item.value)?;
    }
    for rule in disabled {
        rules.set_enabled(rule, false)?;
    }
    Ok(())
}
