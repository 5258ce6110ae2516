//! Dialect normalization into [`CanonicalConfig`]
//!
//! [`normalize`] is the single dispatch point between the two dialects. Each
//! dialect has exactly one reader below; nothing downstream knows which one
//! produced the configuration.

use serde_yml::Value;

use crate::core::dialect::Dialect;
use crate::core::error::ConfigError;
use crate::core::raw::Node;
use crate::core::rules::{
    CanonicalConfig, CountCeiling, CountFloor, DimensionScores, DimensionSpec, ErrorCardSpec,
    ErrorDistribution, ErrorThresholds, ScoreThresholds, Severity, DEFAULT_ERROR_LABEL_IT,
    DEFAULT_LOW_MAX_COUNT,
};
use crate::render::template::TemplateSet;

/// Error cards the report shows, in display order: key, label, subtitle.
pub const ERROR_CARDS: [(&str, &str, &str); 3] = [
    ("completeness", "COMPLETENESS", "Dimensione più problematica"),
    ("accuracy", "ACCURACY", "Seconda dimensione critica"),
    ("consistency", "CONSISTENCY", "Terza dimensione critica"),
];

/// Result of normalizing a raw rules document
#[derive(Debug, Clone)]
pub struct Normalized {
    pub config: CanonicalConfig,
    pub dialect: Dialect,
    /// Error cards skipped because their dimension has no `variable_count`
    pub omitted_cards: Vec<&'static str>,
}

/// Detect the dialect of `raw` and convert it to the canonical model
pub fn normalize(raw: &Value) -> Result<Normalized, ConfigError> {
    if !raw.is_mapping() {
        return Err(ConfigError::NotAMapping);
    }

    let dialect = Dialect::detect(raw);
    let (config, omitted_cards) = match dialect {
        Dialect::Complete => normalize_complete(raw)?,
        Dialect::Legacy => (normalize_legacy(raw)?, Vec::new()),
    };

    Ok(Normalized {
        config,
        dialect,
        omitted_cards,
    })
}

/// Strip a trailing parenthetical gloss: `"Completezza (Completeness)"` -> `"Completezza"`
pub fn clean_label_it(label: &str) -> String {
    let label = label.trim();
    match label.split_once('(') {
        Some((head, _)) if label.ends_with(')') => head.trim().to_string(),
        _ => label.to_string(),
    }
}

fn normalize_complete(raw: &Value) -> Result<(CanonicalConfig, Vec<&'static str>), ConfigError> {
    let root = Node::root(raw);
    let dim = root.child("dimension_scores");
    let score_thresholds = dim.child("thresholds");

    let excellent = score_thresholds.child("excellent").child("value").to_f64()?;
    let acceptable = score_thresholds.child("acceptable").child("value").to_f64()?;

    let dimension_defs = dim.child("dimensions");
    let dimensions = dimension_defs
        .entries()
        .into_iter()
        .filter(|(_, d)| d.is_mapping())
        .map(|(key, d)| DimensionSpec {
            variable: d.first_text(&["variable_score", "variable", "id"]),
            error_variable: d.first_text(&["variable_error", "error_variable"]),
            label_it: clean_label_it(&d.child("label_it").text().unwrap_or_default()),
            label_en: d.child("label_en").text().unwrap_or_default(),
            description_it: d.child("description_it").text().unwrap_or_default(),
            error_label_it: DEFAULT_ERROR_LABEL_IT.to_string(),
            key,
        })
        .collect();

    let error_thresholds = root.child("error_distribution").child("thresholds");
    let thresholds = ErrorThresholds {
        critical: strict_floor(&error_thresholds, Severity::Critical)?,
        high: strict_floor(&error_thresholds, Severity::High)?,
        medium: strict_floor(&error_thresholds, Severity::Medium)?,
        low: {
            let low = error_thresholds.child(Severity::Low.key());
            CountCeiling {
                max_count: low
                    .child("threshold_value")
                    .to_i64_or(DEFAULT_LOW_MAX_COUNT)?,
                label_it: label_or_default(&low, Severity::Low),
            }
        },
    };

    let mut cards = Vec::new();
    let mut omitted = Vec::new();
    for (key, label, subtitle) in ERROR_CARDS {
        match dimension_defs.child(key).child("variable_count").truthy_text() {
            Some(variable) => cards.push(ErrorCardSpec {
                key: key.to_string(),
                variable,
                label: label.to_string(),
                subtitle_fallback_it: subtitle.to_string(),
            }),
            None => omitted.push(key),
        }
    }

    let config = CanonicalConfig {
        dimension_scores: DimensionScores {
            thresholds: ScoreThresholds::new(excellent, acceptable),
            dimensions,
        },
        error_distribution: ErrorDistribution {
            thresholds,
            dimensions: cards,
        },
        templates: TemplateSet::builtin()?,
    };

    Ok((config, omitted))
}

/// Read a `> value` rule and store it as the inclusive `min_count = value + 1`
fn strict_floor(thresholds: &Node<'_>, severity: Severity) -> Result<CountFloor, ConfigError> {
    let node = thresholds.child(severity.key());
    let value_node = node.child("value");
    let value = value_node.to_i64()?;
    let min_count = value.checked_add(1).ok_or_else(|| ConfigError::OutOfRange {
        path: value_node.path().to_string(),
        value,
    })?;

    Ok(CountFloor {
        min_count,
        label_it: label_or_default(&node, severity),
    })
}

fn label_or_default(node: &Node<'_>, severity: Severity) -> String {
    node.child("label_it")
        .text()
        .unwrap_or_else(|| severity.default_label_it().to_string())
}

fn normalize_legacy(raw: &Value) -> Result<CanonicalConfig, ConfigError> {
    let root = Node::root(raw);
    let dim = root.child("dimension_scores");
    let score_thresholds = dim.child("thresholds");

    let excellent = score_thresholds
        .child("excellent")
        .child("percentage")
        .to_f64()?;
    let acceptable = score_thresholds
        .child("acceptable")
        .child("min_percentage")
        .to_f64()?;

    let dimensions = dim
        .child("dimensions")
        .entries()
        .into_iter()
        .filter(|(_, d)| d.is_mapping())
        .map(|(key, d)| {
            let text = |field: &str| d.child(field).text().unwrap_or_default();
            DimensionSpec {
                variable: text("variable"),
                error_variable: text("error_variable"),
                label_it: text("label_it"),
                label_en: text("label_en"),
                description_it: text("description_it"),
                error_label_it: d
                    .child("error_label_it")
                    .text()
                    .unwrap_or_else(|| DEFAULT_ERROR_LABEL_IT.to_string()),
                key,
            }
        })
        .collect();

    let err = root.child("error_distribution");
    let error_thresholds = err.child("thresholds");
    let inclusive_floor = |severity: Severity| -> Result<CountFloor, ConfigError> {
        let node = error_thresholds.child(severity.key());
        Ok(CountFloor {
            min_count: node.child("min_count").to_i64()?,
            label_it: label_or_default(&node, severity),
        })
    };

    let thresholds = ErrorThresholds {
        critical: inclusive_floor(Severity::Critical)?,
        high: inclusive_floor(Severity::High)?,
        medium: inclusive_floor(Severity::Medium)?,
        low: {
            let low = error_thresholds.child(Severity::Low.key());
            CountCeiling {
                max_count: low.child("max_count").to_i64_or(DEFAULT_LOW_MAX_COUNT)?,
                label_it: label_or_default(&low, Severity::Low),
            }
        },
    };

    let cards = err
        .child("dimensions")
        .entries()
        .into_iter()
        .filter(|(_, c)| c.is_mapping())
        .map(|(key, c)| {
            let text = |field: &str| c.child(field).text().unwrap_or_default();
            ErrorCardSpec {
                variable: text("variable"),
                label: text("label"),
                subtitle_fallback_it: text("subtitle_fallback_it"),
                key,
            }
        })
        .collect();

    Ok(CanonicalConfig {
        dimension_scores: DimensionScores {
            thresholds: ScoreThresholds::new(excellent, acceptable),
            dimensions,
        },
        error_distribution: ErrorDistribution {
            thresholds,
            dimensions: cards,
        },
        templates: TemplateSet::merged(root.child("templates").value())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::template::{DIMENSION_SCORE_HTML, ERROR_DISTRIBUTION_CARD_HTML};

    const COMPLETE: &str = r#"
global:
  version: "1.0"
dimension_scores:
  enabled: true
  thresholds:
    excellent:
      value: 90
    acceptable:
      value: 75
  dimensions:
    completeness:
      label_it: "Completezza (Completeness)"
      label_en: Completeness
      description_it: "Campi obbligatori valorizzati"
      variable_score: completenessScore
      variable_error: completenessErrors
      variable_count: 42
    accuracy:
      label_it: Accuratezza
      label_en: Accuracy
      variable: accuracyScore
      error_variable: accuracyErrors
    timeliness:
      label_it: "Tempestività (Timeliness)"
      id: timelinessScore
      variable_count: timelinessErrorCount
error_distribution:
  thresholds:
    critical:
      value: 100
      label_it: "Critico"
    high:
      value: 50
    medium:
      value: 10
    low:
      threshold_value: 5
"#;

    const LEGACY: &str = r#"
dimension_scores:
  thresholds:
    excellent:
      percentage: 95
    acceptable:
      min_percentage: 80
  dimensions:
    completeness:
      variable: completenessScore
      error_variable: completenessErrors
      label_it: Completezza
      label_en: Completeness
      description_it: Campi valorizzati
error_distribution:
  thresholds:
    critical:
      min_count: 101
    high:
      min_count: 51
    medium:
      min_count: 11
  dimensions:
    completeness:
      variable: completenessErrorCount
      label: COMPLETENESS
      subtitle_fallback_it: Dimensione più problematica
"#;

    fn parse(yaml: &str) -> Value {
        serde_yml::from_str(yaml).unwrap()
    }

    fn complete() -> Normalized {
        normalize(&parse(COMPLETE)).unwrap()
    }

    #[test]
    fn test_complete_dialect_is_detected() {
        assert_eq!(complete().dialect, Dialect::Complete);
        assert_eq!(normalize(&parse(LEGACY)).unwrap().dialect, Dialect::Legacy);
    }

    #[test]
    fn test_complete_score_thresholds() {
        let thresholds = complete().config.dimension_scores.thresholds;
        assert_eq!(thresholds.excellent.percentage, 90.0);
        assert_eq!(thresholds.acceptable.min_percentage, 75.0);
    }

    #[test]
    fn test_label_it_gloss_is_stripped() {
        let config = complete().config;
        assert_eq!(config.dimension("completeness").unwrap().label_it, "Completezza");
        assert_eq!(config.dimension("accuracy").unwrap().label_it, "Accuratezza");
        assert_eq!(clean_label_it("  Validità  "), "Validità");
        assert_eq!(clean_label_it("Nota (bozza) finale"), "Nota (bozza) finale");
    }

    #[test]
    fn test_variable_resolution_order() {
        let config = complete().config;
        let completeness = config.dimension("completeness").unwrap();
        assert_eq!(completeness.variable, "completenessScore");
        assert_eq!(completeness.error_variable, "completenessErrors");

        let accuracy = config.dimension("accuracy").unwrap();
        assert_eq!(accuracy.variable, "accuracyScore");
        assert_eq!(accuracy.error_variable, "accuracyErrors");

        let timeliness = config.dimension("timeliness").unwrap();
        assert_eq!(timeliness.variable, "timelinessScore");
        assert_eq!(timeliness.error_variable, "");
        assert_eq!(timeliness.error_label_it, DEFAULT_ERROR_LABEL_IT);
    }

    #[test]
    fn test_dimensions_keep_source_order() {
        let keys: Vec<String> = complete()
            .config
            .dimension_scores
            .dimensions
            .into_iter()
            .map(|d| d.key)
            .collect();
        assert_eq!(keys, ["completeness", "accuracy", "timeliness"]);
    }

    #[test]
    fn test_strict_thresholds_become_inclusive_floors() {
        let thresholds = complete().config.error_distribution.thresholds;
        assert_eq!(thresholds.critical.min_count, 101);
        assert_eq!(thresholds.high.min_count, 51);
        assert_eq!(thresholds.medium.min_count, 11);
        assert_eq!(thresholds.low.max_count, 5);
    }

    #[test]
    fn test_threshold_labels_default() {
        let thresholds = complete().config.error_distribution.thresholds;
        assert_eq!(thresholds.critical.label_it, "Critico");
        assert_eq!(thresholds.high.label_it, "Richiede attenzione");
        assert_eq!(thresholds.medium.label_it, "Errori moderati");
        assert_eq!(thresholds.low.label_it, "Errori minimi");
    }

    #[test]
    fn test_low_ceiling_defaults_to_ten() {
        let yaml = COMPLETE.replace("      threshold_value: 5\n", "      label_it: Pochi\n");
        let thresholds = normalize(&parse(&yaml))
            .unwrap()
            .config
            .error_distribution
            .thresholds;
        assert_eq!(thresholds.low.max_count, DEFAULT_LOW_MAX_COUNT);
        assert_eq!(thresholds.low.label_it, "Pochi");
    }

    #[test]
    fn test_only_fixed_cards_with_variable_count_are_emitted() {
        let normalized = complete();
        let cards = &normalized.config.error_distribution.dimensions;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].key, "completeness");
        assert_eq!(cards[0].label, "COMPLETENESS");
        assert_eq!(cards[0].variable, "42");
        assert_eq!(cards[0].subtitle_fallback_it, "Dimensione più problematica");
        assert_eq!(normalized.omitted_cards, ["accuracy", "consistency"]);
    }

    #[test]
    fn test_complete_uses_builtin_templates() {
        let templates = complete().config.templates;
        assert_eq!(templates, TemplateSet::builtin().unwrap());
    }

    #[test]
    fn test_missing_threshold_cites_path() {
        let yaml = COMPLETE.replace("      value: 50\n", "      label_it: Alto\n");
        let err = normalize(&parse(&yaml)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { .. }));
        assert!(err
            .to_string()
            .contains("error_distribution.thresholds.high.value"));
    }

    #[test]
    fn test_non_numeric_percentage_cites_value() {
        let yaml = COMPLETE.replace("value: 90", "value: novanta");
        let err = normalize(&parse(&yaml)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("dimension_scores.thresholds.excellent.value"));
        assert!(message.contains("novanta"));
    }

    #[test]
    fn test_overflowing_threshold_is_rejected() {
        let yaml = COMPLETE.replace("value: 100", &format!("value: {}", i64::MAX));
        let err = normalize(&parse(&yaml)).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = normalize(&parse("- one\n- two\n")).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping));
    }

    #[test]
    fn test_canonical_form_renormalizes_to_same_model() {
        let first = complete().config;
        let reserialized = serde_yml::to_value(&first).unwrap();
        let second = normalize(&reserialized).unwrap();

        assert_eq!(second.dialect, Dialect::Legacy);
        assert_eq!(
            second.config.dimension_scores,
            first.dimension_scores
        );
        assert_eq!(
            second.config.error_distribution,
            first.error_distribution
        );
        assert_eq!(second.config.templates, first.templates);
    }

    #[test]
    fn test_legacy_reads_canonical_shape() {
        let config = normalize(&parse(LEGACY)).unwrap().config;
        assert_eq!(config.dimension_scores.thresholds.excellent.percentage, 95.0);
        assert_eq!(config.error_distribution.thresholds.critical.min_count, 101);
        assert_eq!(
            config.error_distribution.thresholds.low.max_count,
            DEFAULT_LOW_MAX_COUNT
        );
        let card = config.error_card("completeness").unwrap();
        assert_eq!(card.variable, "completenessErrorCount");
        assert_eq!(card.label, "COMPLETENESS");
    }

    #[test]
    fn test_legacy_missing_min_count_cites_path() {
        let yaml = LEGACY.replace("      min_count: 51\n", "      label_it: Alto\n");
        let err = normalize(&parse(&yaml)).unwrap_err();
        assert!(err
            .to_string()
            .contains("error_distribution.thresholds.high.min_count"));
    }

    #[test]
    fn test_legacy_partial_templates_are_filled_from_defaults() {
        let yaml = format!(
            "{LEGACY}templates:\n  error_distribution_card_html: \"<p>@@ERROR_VAR@@</p>\"\n  footer_html: \"<footer/>\"\n"
        );
        let templates = normalize(&parse(&yaml)).unwrap().config.templates;
        let builtin = TemplateSet::builtin().unwrap();

        assert_eq!(templates.error_distribution_card_html, "<p>@@ERROR_VAR@@</p>");
        assert_eq!(templates.dimension_score_html, builtin.dimension_score_html);
        assert_eq!(templates.get("footer_html"), Some("<footer/>"));
        assert!(templates.get(DIMENSION_SCORE_HTML).is_some());
        assert!(templates.get(ERROR_DISTRIBUTION_CARD_HTML).is_some());
    }

    #[test]
    fn test_legacy_non_string_template_keeps_default() {
        let yaml = format!("{LEGACY}templates:\n  dimension_score_html: 12\n");
        let templates = normalize(&parse(&yaml)).unwrap().config.templates;
        assert_eq!(templates, TemplateSet::builtin().unwrap());

        let yaml = format!("{LEGACY}templates: just-a-string\n");
        let templates = normalize(&parse(&yaml)).unwrap().config.templates;
        assert_eq!(templates, TemplateSet::builtin().unwrap());
    }
}
