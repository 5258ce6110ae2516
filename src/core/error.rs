//! Errors raised while loading and normalizing a color rules file

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::yaml::diagnostics::YamlSyntaxError;

/// Failure to turn a rules file into a canonical configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Config not found: {}", path.display())]
    #[diagnostic(code(color_rules::config::not_found))]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    #[diagnostic(code(color_rules::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),

    #[error("Invalid YAML: expected top-level mapping")]
    #[diagnostic(
        code(color_rules::config::not_a_mapping),
        help("A rules file starts with keys such as `dimension_scores:` and `error_distribution:`")
    )]
    NotAMapping,

    #[error("Invalid numeric value at {path}: {value}")]
    #[diagnostic(
        code(color_rules::config::invalid_number),
        help("Thresholds must be plain numbers, e.g. `value: 90`")
    )]
    InvalidNumber { path: String, value: String },

    #[error("Invalid integer value at {path}: {value}")]
    #[diagnostic(
        code(color_rules::config::invalid_integer),
        help("Error count thresholds must be whole numbers, e.g. `value: 10`")
    )]
    InvalidInteger { path: String, value: String },

    #[error("Integer value at {path} is out of range: {value}")]
    #[diagnostic(code(color_rules::config::out_of_range))]
    OutOfRange { path: String, value: i64 },

    #[error("Missing template: {name}")]
    #[diagnostic(
        code(color_rules::config::missing_template),
        help("Built-in templates live in the crate's templates/ directory")
    )]
    MissingTemplate { name: String },
}
