//! Error type for the fallible edges around the scoring engine.
//!
//! The engine itself never fails. Errors come from loading and validating
//! policies and trial batches before they reach it.

use thiserror::Error;

/// Errors raised while preparing inputs for the scorer.
#[derive(Debug, Error)]
pub enum TrialscoreError {
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),

    #[error("non-finite {metric} sample at index {index}: {value}")]
    NonFiniteSample {
        metric: &'static str,
        index: usize,
        value: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TrialscoreError>;
