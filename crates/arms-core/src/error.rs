//! Error types shared by every part of the engine.

use thiserror::Error;

use crate::config::ConfigError;
use crate::output::OutputError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ArmsError>;

/// Errors surfaced before or instead of a decision.
#[derive(Debug, Error)]
pub enum ArmsError {
    /// Agent count, bounds, round count, or table shape is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The response model produced a probability outside (0, 1)
    #[error("probability for agent {other} responding to agent {acting} left (0, 1): {value}")]
    NumericDomain {
        acting: usize,
        other: usize,
        value: f64,
    },

    /// Configuration file could not be read or parsed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Report could not be written
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ArmsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ArmsError::InvalidConfiguration(message.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, ArmsError::InvalidConfiguration(_))
    }
}
