//! Cross-field threshold checks on a canonical configuration

use miette::Diagnostic;
use thiserror::Error;

use crate::core::rules::CanonicalConfig;
use crate::render::template::format_float;

/// A threshold ordering rule that the configuration breaks
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum ValidationError {
    #[error(
        "Invalid dimension score thresholds: excellent ({}) must be > acceptable.min ({}).",
        shown(.excellent),
        shown(.acceptable)
    )]
    #[diagnostic(
        code(color_rules::validation::score_thresholds),
        help("Scores at or above `excellent` are green, at or above `acceptable` amber")
    )]
    ScoreThresholds { excellent: f64, acceptable: f64 },

    #[error(
        "Invalid error count ordering: critical.min ({critical}) > high.min ({high}) > medium.min ({medium}) > 0 expected."
    )]
    #[diagnostic(
        code(color_rules::validation::error_count_ordering),
        help("Error thresholds must strictly decrease from critical to medium")
    )]
    ErrorCountOrdering { critical: i64, high: i64, medium: i64 },
}

fn shown(percentage: &f64) -> String {
    format_float(*percentage)
}

/// Check both threshold ordering invariants
///
/// NaN percentages never satisfy the ordering and are rejected.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate(config: &CanonicalConfig) -> Result<(), ValidationError> {
    let scores = &config.dimension_scores.thresholds;
    let excellent = scores.excellent.percentage;
    let acceptable = scores.acceptable.min_percentage;

    if !(excellent > acceptable) {
        return Err(ValidationError::ScoreThresholds {
            excellent,
            acceptable,
        });
    }

    let counts = &config.error_distribution.thresholds;
    let critical = counts.critical.min_count;
    let high = counts.high.min_count;
    let medium = counts.medium.min_count;

    if !(critical > high && high > medium && medium > 0) {
        return Err(ValidationError::ErrorCountOrdering {
            critical,
            high,
            medium,
        });
    }

    Ok(())
}
