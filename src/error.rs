//! Error types for the Courier Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing parcels or
//! aggregating rider earnings.

use thiserror::Error;

/// The main error type for the Courier Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use courier_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "weight_kg".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input for 'weight_kg': must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A pricing input was missing, unrecognized or out of range.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput {
        /// The request field that was rejected.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A delivery record could not be turned into a usable record.
    #[error("Malformed delivery record at index {index}: {message}")]
    MalformedRecord {
        /// Position of the record in the submitted list.
        index: usize,
        /// A description of what was wrong with the record.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration key that was rejected.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building an [`EngineError::MalformedRecord`].
    pub fn malformed_record(index: usize, message: impl Into<String>) -> Self {
        EngineError::MalformedRecord {
            index,
            message: message.into(),
        }
    }
}
