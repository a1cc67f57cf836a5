//! Display-facing session score report.
//!
//! The engine returns unrounded values. This layer rounds them for display
//! (severity to 2 places, centers to 1) and adds plain arithmetic means of the
//! raw, unclipped samples (3 places) that older consumers still read.

use serde::{Deserialize, Serialize};

use crate::robust::mean;
use crate::scorer::{SeverityMetrics, SeverityResult, SeverityScorer};
use crate::trial::MetricSamples;

/// Message reported for a session without trial rows.
pub const NO_TRIALS_MESSAGE: &str = "no trials";

/// Round to `places` decimal places; exact halfway values go to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round_ties_even() / scale
}

/// Rounded score report for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScoreReport {
    pub session_id: Option<i64>,
    /// `None` when the session has no trials.
    pub severity: Option<f64>,
    /// `None` when the session has no trials.
    pub metrics: Option<SeverityMetrics>,
    pub avg_latency: f64,
    pub avg_accuracy: f64,
    pub avg_drift: f64,
    pub n_trials: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SessionScoreReport {
    /// Score `samples` with `scorer` and format the result.
    pub fn build(
        session_id: Option<i64>,
        samples: &MetricSamples,
        scorer: &SeverityScorer,
    ) -> Self {
        if samples.n_trials == 0 {
            return Self::no_trials(session_id);
        }
        Self::from_result(session_id, samples, &scorer.score_samples(samples))
    }

    /// Format an existing engine result alongside the raw sample means.
    pub fn from_result(
        session_id: Option<i64>,
        samples: &MetricSamples,
        result: &SeverityResult,
    ) -> Self {
        Self {
            session_id,
            severity: Some(round_to(result.severity, 2)),
            metrics: Some(SeverityMetrics {
                latency_ms: round_to(result.metrics.latency_ms, 1),
                drift_px: round_to(result.metrics.drift_px, 1),
                accuracy_px: round_to(result.metrics.accuracy_px, 1),
            }),
            avg_latency: round_to(mean(&samples.latencies), 3),
            avg_accuracy: round_to(mean(&samples.accuracies), 3),
            avg_drift: round_to(mean(&samples.drifts), 3),
            n_trials: samples.n_trials,
            message: None,
        }
    }

    pub fn no_trials(session_id: Option<i64>) -> Self {
        Self {
            session_id,
            severity: None,
            metrics: None,
            avg_latency: 0.0,
            avg_accuracy: 0.0,
            avg_drift: 0.0,
            n_trials: 0,
            message: Some(NO_TRIALS_MESSAGE.to_string()),
        }
    }
}
