//! Error types for smartstyle

use thiserror::Error;

/// Main error type for smartstyle operations
#[derive(Error, Debug)]
pub enum SmartStyleError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required step option is missing or blank after trimming
    #[error("Incomplete configuration: option `{option}` is missing or blank")]
    IncompleteConfig {
        /// Option id as exposed to the host (`marker`, `styleName`)
        option: &'static str,
    },

    /// Requested step is not registered
    #[error("Unknown step: {0}")]
    UnknownStep(String),
}

impl SmartStyleError {
    /// Whether this error only means "skip the step" rather than a failure.
    pub fn is_incomplete_config(&self) -> bool {
        matches!(self, SmartStyleError::IncompleteConfig { .. })
    }
}

/// Result type alias for smartstyle operations
pub type Result<T> = std::result::Result<T, SmartStyleError>;
