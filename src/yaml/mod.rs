//! Loading raw rules documents from YAML

pub mod diagnostics;

pub use diagnostics::YamlSyntaxError;

use serde_yml::Value;
use std::path::Path;

use crate::core::error::ConfigError;

/// Read and parse a rules file into an untyped mapping
pub fn load_rules_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_rules_str(&source, &path.display().to_string())
}

/// Parse rules YAML; the top level must be a mapping.
pub fn parse_rules_str(source: &str, filename: &str) -> Result<Value, ConfigError> {
    let value: Value = serde_yml::from_str(source)
        .map_err(|e| YamlSyntaxError::from_serde_error(&e, source, filename))?;

    if !value.is_mapping() {
        return Err(ConfigError::NotAMapping);
    }

    Ok(value)
}
