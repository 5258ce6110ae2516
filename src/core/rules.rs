//! Canonical color rules model
//!
//! Every input dialect is normalized into [`CanonicalConfig`]; rendering and
//! validation never look at raw YAML. The model serializes back into the
//! canonical (legacy) YAML layout, so `normalize` output is itself a valid
//! rules file.

use serde::{Serialize, Serializer};

use crate::render::template::TemplateSet;

/// Error column label used when a dimension does not set its own
pub const DEFAULT_ERROR_LABEL_IT: &str = "ERRORI";

/// Ceiling of the `low` error band when none is configured
pub const DEFAULT_LOW_MAX_COUNT: i64 = 10;

/// Fully resolved rules, independent of the dialect they were read from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalConfig {
    pub dimension_scores: DimensionScores,
    pub error_distribution: ErrorDistribution,
    pub templates: TemplateSet,
}

impl CanonicalConfig {
    /// Look up a dimension by key
    pub fn dimension(&self, key: &str) -> Option<&DimensionSpec> {
        self.dimension_scores.dimensions.iter().find(|d| d.key == key)
    }

    /// Look up an error card by key
    pub fn error_card(&self, key: &str) -> Option<&ErrorCardSpec> {
        self.error_distribution.dimensions.iter().find(|c| c.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScores {
    pub thresholds: ScoreThresholds,
    #[serde(serialize_with = "keyed_map")]
    pub dimensions: Vec<DimensionSpec>,
}

/// Percentage bands for dimension scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreThresholds {
    pub excellent: Excellent,
    pub acceptable: Acceptable,
}

impl ScoreThresholds {
    pub fn new(excellent: f64, acceptable: f64) -> Self {
        Self {
            excellent: Excellent {
                percentage: excellent,
            },
            acceptable: Acceptable {
                min_percentage: acceptable,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Excellent {
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Acceptable {
    pub min_percentage: f64,
}

/// One quality dimension shown in the scores section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionSpec {
    #[serde(skip)]
    pub key: String,
    /// Host variable holding the score percentage
    pub variable: String,
    /// Host variable holding the error count
    pub error_variable: String,
    pub label_it: String,
    pub label_en: String,
    pub description_it: String,
    pub error_label_it: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDistribution {
    pub thresholds: ErrorThresholds,
    #[serde(serialize_with = "keyed_map")]
    pub dimensions: Vec<ErrorCardSpec>,
}

/// Error count bands, stored as inclusive lower bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorThresholds {
    pub critical: CountFloor,
    pub high: CountFloor,
    pub medium: CountFloor,
    pub low: CountCeiling,
}

impl ErrorThresholds {
    pub fn label_it(&self, severity: Severity) -> &str {
        match severity {
            Severity::Critical => &self.critical.label_it,
            Severity::High => &self.high.label_it,
            Severity::Medium => &self.medium.label_it,
            Severity::Low => &self.low.label_it,
        }
    }
}

/// A band entered when the error count reaches `min_count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountFloor {
    pub min_count: i64,
    pub label_it: String,
}

/// The lowest band, bounded from above
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountCeiling {
    pub max_count: i64,
    pub label_it: String,
}

/// One card in the error distribution section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCardSpec {
    #[serde(skip)]
    pub key: String,
    /// Host variable holding the error count for this dimension
    pub variable: String,
    pub label: String,
    pub subtitle_fallback_it: String,
}

/// Error count severity bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Key of this band under `error_distribution.thresholds`
    pub fn key(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    pub fn default_label_it(self) -> &'static str {
        match self {
            Severity::Critical => "Situazione critica!",
            Severity::High => "Richiede attenzione",
            Severity::Medium => "Errori moderati",
            Severity::Low => "Errori minimi",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Entries carrying their own mapping key
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for DimensionSpec {
    fn key(&self) -> &str {
        &self.key
    }
}

impl Keyed for ErrorCardSpec {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Serialize an ordered list of keyed entries as a mapping
#[allow(clippy::ptr_arg)]
fn keyed_map<S, T>(entries: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Keyed + Serialize,
{
    serializer.collect_map(entries.iter().map(|entry| (entry.key(), entry)))
}
