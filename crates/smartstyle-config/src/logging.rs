//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Level used when neither the config nor the command line sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingConfig {
    /// Log level name (trace, debug, info, warn, error).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl LoggingConfig {
    /// Effective level name.
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Merge another LoggingConfig into this one.
    pub fn merge(&mut self, other: &LoggingConfig) {
        if other.level.is_some() {
            self.level.clone_from(&other.level);
        }
    }
}
