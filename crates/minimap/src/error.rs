#![forbid(unsafe_code)]

//! Widget errors.

use crate::config::ConfigError;
use std::fmt;

/// Errors returned by [`Minimap`](crate::Minimap) operations.
///
/// Geometry never fails: degenerate sizes are clamped and empty documents
/// render nothing. What remains is lifecycle misuse and bad configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinimapError {
    /// The instance was already destroyed.
    Destroyed {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// The configuration failed validation.
    Config(ConfigError),
}

impl fmt::Display for MinimapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destroyed { operation } => {
                write!(f, "minimap already destroyed; cannot {operation}")
            }
            Self::Config(err) => write!(f, "invalid minimap config: {err}"),
        }
    }
}

impl std::error::Error for MinimapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Destroyed { .. } => None,
        }
    }
}

impl From<ConfigError> for MinimapError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
