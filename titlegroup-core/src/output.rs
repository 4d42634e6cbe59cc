use crate::error::{GroupingError, Result};
use crate::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One title per line with its `+distance`, clusters separated by a blank line
    #[default]
    Text,
    /// Clusters with distances, plus pair decisions when traced
    Json,
    /// Titles only, one array per cluster
    Flat,
}

impl std::str::FromStr for OutputFormat {
    type Err = GroupingError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "flat" => Ok(Self::Flat),
            other => Err(GroupingError::InvalidConfiguration(format!(
                "unknown output format '{other}' (expected text, json or flat)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusteredDocument<'a> {
    pub format: &'static str,
    pub cluster_count: usize,
    pub title_count: usize,
    pub clusters: &'a [Cluster],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decisions: Option<&'a [PairDecision]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlatDocument<'a> {
    pub format: &'static str,
    pub clusters: Vec<Vec<&'a str>>,
}

impl GroupingResult {
    /// The very first title is printed bare; every later title carries
    /// `  +<distance>` from its sorted predecessor
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut first_title = true;

        for (index, cluster) in self.clusters.iter().enumerate() {
            if index > 0 {
                out.push_str("\n\n");
            }
            for (position, entry) in cluster.entries().iter().enumerate() {
                if position > 0 {
                    out.push('\n');
                }
                out.push_str(&entry.title);
                if !first_title {
                    out.push_str(&format!("  +{}", entry.distance));
                }
                first_title = false;
            }
        }
        out
    }

    pub fn to_flat_format(&self) -> FlatDocument<'_> {
        FlatDocument {
            format: "flat",
            clusters: self
                .clusters
                .iter()
                .map(|cluster| cluster.titles().collect())
                .collect(),
        }
    }

    pub fn to_clustered_format<'a>(
        &'a self,
        decisions: Option<&'a [PairDecision]>,
    ) -> ClusteredDocument<'a> {
        ClusteredDocument {
            format: "clusters",
            cluster_count: self.len(),
            title_count: self.title_count(),
            clusters: &self.clusters,
            decisions,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render_parts(self, None, format)
    }
}

impl GroupingReport {
    /// Like `GroupingResult::render`, with the pair decisions included in json
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render_parts(&self.result, Some(self.decisions.as_slice()), format)
    }
}

fn render_parts(
    result: &GroupingResult,
    decisions: Option<&[PairDecision]>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.to_text()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(
            &result.to_clustered_format(decisions),
        )?),
        OutputFormat::Flat => Ok(serde_json::to_string_pretty(&result.to_flat_format())?),
    }
}
