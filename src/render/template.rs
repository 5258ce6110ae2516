//! Snippet templates and literal `@@TOKEN@@` substitution
//!
//! Rendering is plain substring replacement, not a template language. Token
//! names within one vocabulary must not contain one another in delimited
//! form. Replacements are applied longest name first.

use rust_embed::Embed;
use serde::Serialize;
use serde_yml::Value;
use std::collections::BTreeMap;

use crate::core::error::ConfigError;
use crate::core::rules::{DimensionSpec, ErrorCardSpec, ErrorThresholds, ScoreThresholds, Severity};

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Template key for one dimension score block
pub const DIMENSION_SCORE_HTML: &str = "dimension_score_html";

/// Template key for one error distribution card
pub const ERROR_DISTRIBUTION_CARD_HTML: &str = "error_distribution_card_html";

/// Marker surrounding every token name
pub const TOKEN_DELIMITER: &str = "@@";

/// Tokens filled from a [`DimensionSpec`] and the score thresholds
pub const DIMENSION_TOKENS: [&str; 9] = [
    "DIMENSION_NAME",
    "LABEL_IT",
    "LABEL_EN",
    "DESCRIPTION_IT",
    "ERROR_LABEL_IT",
    "VAR",
    "ERROR_VAR",
    "THRESH_EXCELLENT",
    "THRESH_ACCEPTABLE",
];

/// Tokens filled from an [`ErrorCardSpec`] and the error thresholds
pub const ERROR_CARD_TOKENS: [&str; 11] = [
    "DIMENSION_NAME",
    "DIMENSION_LABEL",
    "SUBTITLE_FALLBACK_IT",
    "ERROR_VAR",
    "THRESH_CRITICAL",
    "THRESH_HIGH",
    "THRESH_MEDIUM",
    "LABEL_CRITICAL_IT",
    "LABEL_HIGH_IT",
    "LABEL_MEDIUM_IT",
    "LABEL_LOW_IT",
];

/// The templates used for rendering
///
/// Both required templates are always present. Extra string templates
/// supplied by a legacy rules file are carried along unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSet {
    pub dimension_score_html: String,
    pub error_distribution_card_html: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl TemplateSet {
    /// The built-in template pair
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            dimension_score_html: builtin_template(DIMENSION_SCORE_HTML)?,
            error_distribution_card_html: builtin_template(ERROR_DISTRIBUTION_CARD_HTML)?,
            extra: BTreeMap::new(),
        })
    }

    /// Built-in templates overridden by every string entry of `overrides`
    ///
    /// Non-mapping `overrides` and non-string entries are ignored.
    pub fn merged(overrides: Option<&Value>) -> Result<Self, ConfigError> {
        let mut set = Self::builtin()?;

        if let Some(mapping) = overrides.and_then(Value::as_mapping) {
            for (key, value) in mapping {
                if let (Some(key), Some(text)) = (key.as_str(), value.as_str()) {
                    set.insert(key, text);
                }
            }
        }

        Ok(set)
    }

    pub fn insert(&mut self, key: &str, text: impl Into<String>) {
        let text = text.into();
        match key {
            DIMENSION_SCORE_HTML => self.dimension_score_html = text,
            ERROR_DISTRIBUTION_CARD_HTML => self.error_distribution_card_html = text,
            _ => {
                self.extra.insert(key.to_string(), text);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            DIMENSION_SCORE_HTML => Some(&self.dimension_score_html),
            ERROR_DISTRIBUTION_CARD_HTML => Some(&self.error_distribution_card_html),
            _ => self.extra.get(key).map(String::as_str),
        }
    }
}

fn builtin_template(key: &str) -> Result<String, ConfigError> {
    let filename = match key {
        DIMENSION_SCORE_HTML => "dimension_score.html",
        ERROR_DISTRIBUTION_CARD_HTML => "error_distribution_card.html",
        _ => {
            return Err(ConfigError::MissingTemplate {
                name: key.to_string(),
            })
        }
    };

    EmbeddedTemplates::get(filename)
        .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
        .ok_or_else(|| ConfigError::MissingTemplate {
            name: key.to_string(),
        })
}

/// Wrap a token name in its delimiters: `VAR` -> `@@VAR@@`
pub fn token(name: &str) -> String {
    format!("{TOKEN_DELIMITER}{name}{TOKEN_DELIMITER}")
}

/// Replace every `@@NAME@@` occurrence for each `(NAME, value)` pair.
///
/// Tokens without a replacement are left as they are.
pub fn render_tokens(template: &str, replacements: &[(&str, String)]) -> String {
    let mut ordered: Vec<&(&str, String)> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    ordered
        .into_iter()
        .fold(template.to_string(), |out, (name, value)| {
            out.replace(&token(name), value)
        })
}

/// Render one dimension score block
pub fn render_dimension_block(
    template: &str,
    dimension: &DimensionSpec,
    thresholds: &ScoreThresholds,
) -> String {
    let values = [
        dimension.label_en.clone(),
        dimension.label_it.clone(),
        dimension.label_en.clone(),
        dimension.description_it.clone(),
        dimension.error_label_it.clone(),
        dimension.variable.clone(),
        dimension.error_variable.clone(),
        format_float(thresholds.excellent.percentage),
        format_float(thresholds.acceptable.min_percentage),
    ];
    let replacements: Vec<(&str, String)> = DIMENSION_TOKENS.into_iter().zip(values).collect();
    render_tokens(template, &replacements)
}

/// Render one error distribution card
///
/// The host template compares with a strict `>`, so each inclusive
/// `min_count` is rendered as `min_count - 1`.
pub fn render_error_card(template: &str, card: &ErrorCardSpec, thresholds: &ErrorThresholds) -> String {
    let comparison = |min_count: i64| min_count.saturating_sub(1).to_string();

    let values = [
        card.label.clone(),
        card.label.clone(),
        card.subtitle_fallback_it.clone(),
        card.variable.clone(),
        comparison(thresholds.critical.min_count),
        comparison(thresholds.high.min_count),
        comparison(thresholds.medium.min_count),
        thresholds.label_it(Severity::Critical).to_string(),
        thresholds.label_it(Severity::High).to_string(),
        thresholds.label_it(Severity::Medium).to_string(),
        thresholds.label_it(Severity::Low).to_string(),
    ];
    let replacements: Vec<(&str, String)> = ERROR_CARD_TOKENS.into_iter().zip(values).collect();
    render_tokens(template, &replacements)
}

/// Format a percentage the way report authors write it: `90.0`, `85.5`
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
