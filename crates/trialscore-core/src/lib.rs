//! # trialscore-core
//!
//! **One stable number per session of noisy trials.**
//!
//! `trialscore-core` reduces a session's latency, accuracy and drift samples to
//! a bounded 0–100 severity score plus per-metric robust centers, suitable for
//! triage or alerting.
//!
//! ## Quick Start
//!
//! ```
//! use trialscore_core::SeverityScorer;
//!
//! let scorer = SeverityScorer::default();
//! let result = scorer.score(
//!     &[100.0, 100.0, 100.0], // latencies (ms)
//!     &[50.0, 50.0, 50.0],    // drifts (px)
//!     &[10.0, 10.0, 10.0],    // accuracies (px)
//! );
//! assert!(result.severity > 10.0 && result.severity < 11.0);
//! assert_eq!(result.metrics.latency_ms, 100.0);
//! ```
//!
//! ## Pipeline
//!
//! Trials → [`MetricSamples`] (partition by metric) → per metric: clip at the
//! 95th percentile → median → badness against the policy cap → weighted sum.
//!
//! The scorer is a pure function of its inputs and its bound
//! [`ScoringPolicy`]. It holds no mutable state and can be shared freely
//! across threads. Rounding and raw means for display live in [`report`].

pub mod error;
pub mod policy;
pub mod report;
pub mod robust;
pub mod scorer;
pub mod trial;

pub use error::{Result, TrialscoreError};
pub use policy::{
    DEFAULT_ACC_CAP, DEFAULT_DRIFT_CAP, DEFAULT_LAT_CAP, DEFAULT_W_ACC, DEFAULT_W_DRF,
    DEFAULT_W_LAT, ScoringPolicy,
};
pub use report::{NO_TRIALS_MESSAGE, SessionScoreReport, round_to};
pub use robust::{
    CLIP_PERCENTILE, clip_outliers, clip_to, mean, median, normalize_badness, percentile,
    robust_center,
};
pub use scorer::{
    Metric, MetricScore, SeverityBreakdown, SeverityMetrics, SeverityResult, SeverityScorer,
};
pub use trial::{MetricSamples, Trial, TrialBatch};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
