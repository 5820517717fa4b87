//! Error types for loading and building parser definitions.

use cmd_parser_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while turning a definition file into a parser.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// An option declares a type outside the supported set.
    #[error("unsupported type for {option}: {type_name}")]
    UnsupportedType { option: String, type_name: String },

    /// An option's default does not decode as its declared type.
    #[error("invalid default for {option}: {value}")]
    InvalidDefault { option: String, value: String },

    /// A `choices` entry does not decode as its option's declared type.
    #[error("invalid choice for {option}: {value}")]
    InvalidChoice { option: String, value: String },

    /// `min`/`max` given for an option whose type has no numeric value.
    #[error("numeric bounds on non-numeric option: {0}")]
    NonNumericBounds(String),

    /// Name validation or uniqueness failure.
    #[error("invalid parser configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience alias for results with [`DefinitionError`].
pub type Result<T> = std::result::Result<T, DefinitionError>;
