//! Per-request failures.

use thiserror::Error;

use crate::engine::EngineError;

/// Anything that stops one request from producing a symbol or `null`.
///
/// Each variant renders as the bare message of its cause; the bridge sends
/// that text back as `{"error": ...}` and moves on to the next line.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error(transparent)]
    Encoding(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("inference panicked: {0}")]
    Panicked(String),
}

impl RequestFailure {
    /// Build from a payload caught by `catch_unwind`.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self::Panicked(message)
    }
}
