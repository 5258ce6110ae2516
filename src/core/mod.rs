//! Core module - rules model, dialect normalization and validation

pub mod dialect;
pub mod error;
pub mod normalize;
pub mod raw;
pub mod rules;
pub mod validator;

pub use dialect::Dialect;
pub use error::ConfigError;
pub use normalize::{normalize, Normalized};
pub use rules::{CanonicalConfig, DimensionSpec, ErrorCardSpec, Severity};
pub use validator::{validate, ValidationError};
