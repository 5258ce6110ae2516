//! Rules file dialect detection

use serde_yml::Value;

/// The two recognized rules file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Single-source-of-truth layout with `global`, `enabled` flags and
    /// strict `>` error thresholds
    Complete,
    /// Canonical-shaped layout with inclusive `min_count` thresholds and
    /// optional inline templates
    Legacy,
}

impl Dialect {
    /// Classify a raw document. Anything not recognized as complete is legacy.
    pub fn detect(raw: &Value) -> Self {
        let is_mapping = |key: &str| raw.get(key).is_some_and(Value::is_mapping);

        let complete = is_mapping("global")
            && is_mapping("dimension_scores")
            && is_mapping("error_distribution")
            && raw
                .get("dimension_scores")
                .is_some_and(|dim| dim.get("enabled").is_some());

        if complete {
            Dialect::Complete
        } else {
            Dialect::Legacy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Complete => "complete",
            Dialect::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
