use std::fmt;

use thiserror::Error;

/// Seeding parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexParameter {
    KmerSize,
    MinimizerWindowSize,
}

impl fmt::Display for IndexParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexParameter::KmerSize => f.write_str("-k"),
            IndexParameter::MinimizerWindowSize => f.write_str("-w"),
        }
    }
}

/// Errors that can occur when resolving settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// User supplied a k-mer or window size that is neither -1 nor positive.
    #[error("Index parameter -k and -w must be positive. Got {parameter} {value}.")]
    NonPositiveIndexParameter { parameter: IndexParameter, value: i32 },

    #[error("internal error: unknown alignment preset '{token}'")]
    UnknownPreset { token: String },

    #[error("internal error: unknown log level '{token}'")]
    UnknownLogLevel { token: String },

    #[error("internal error: option '{id}' is not in the catalog")]
    MissingOption { id: String },

    #[error("internal error: option '{id}' holds a {actual} value, expected {expected}")]
    TypeMismatch {
        id: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl SettingsError {
    /// True when the error is a broken contract between components rather
    /// than bad user input.
    pub fn is_internal(&self) -> bool {
        !matches!(self, SettingsError::NonPositiveIndexParameter { .. })
    }
}
