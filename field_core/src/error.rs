//! Error types
//!
//! None of these reach the page: initialization errors pick a simpler
//! surface, draw and schedule errors end the loop, config errors fall back
//! to defaults.

use thiserror::Error;

/// Failures while acquiring or driving a drawing surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// Surface or context unavailable
    #[error("initialization failed: {0}")]
    Initialization(String),

    /// Unexpected failure while drawing a frame
    #[error("draw failed: {0}")]
    Draw(String),

    /// The host refused to schedule the next frame
    #[error("frame scheduling failed: {0}")]
    Schedule(String),
}

/// Invalid configuration input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("unrecognized color `{0}`")]
    InvalidColor(String),

    #[error("malformed config JSON: {0}")]
    Json(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
