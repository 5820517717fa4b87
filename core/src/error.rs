//! Error types for registration and parsing.
//!
//! Registration problems ([`ConfigError`]) are programming mistakes in the
//! setup code and are normally fatal. Parse problems ([`ParseError`]) come
//! from user input and are returned to the caller. Unknown names and type
//! mismatches at query time are not errors at all; accessors return `None`.

use thiserror::Error;

/// Registration-time errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither string of an item is a valid long name.
    #[error("invalid long name: {0}")]
    InvalidLongName(String),
    /// The short form is not `-` followed by one letter or digit.
    #[error("invalid short name: {0}")]
    InvalidShortName(String),
    /// A long or short name is already taken by another flag or option.
    #[error("{0} already exists")]
    DuplicateName(String),
}

/// Argument-time errors.
///
/// Each variant names the option involved using its display form
/// (`-l, --len` or `--len`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An option was the last token and had nothing to consume.
    #[error("missing value for option: {option}")]
    MissingValue {
        /// Display form of the option.
        option: String,
    },
    /// The value failed to decode or was rejected by the checker.
    #[error("failed to set option with value: {option} = {value}")]
    InvalidValue {
        /// Display form of the option.
        option: String,
        /// The raw value that was rejected.
        value: String,
    },
    /// A required option never received a value.
    #[error("missing required option: {option}")]
    MissingRequired {
        /// Display form of the option.
        option: String,
    },
}
