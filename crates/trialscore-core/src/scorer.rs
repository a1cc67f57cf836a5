//! Robust severity scoring.
//!
//! Each metric is reduced independently: clip at its 95th percentile, take the
//! median as the robust center, then map the center onto `0..=100` badness
//! against the policy cap. The three badness values are combined with fixed
//! policy weights into one severity score.
//!
//! A metric with no samples contributes a center and badness of zero. The
//! remaining weights are *not* renormalized, so partial data biases the score
//! toward "good".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::policy::ScoringPolicy;
use crate::robust::{normalize_badness, robust_center};
use crate::trial::MetricSamples;

/// The three scored dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Latency,
    Accuracy,
    Drift,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Latency, Metric::Accuracy, Metric::Drift];

    /// Key used for this metric in serialized results, including its unit.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Latency => "latency_ms",
            Metric::Accuracy => "accuracy_px",
            Metric::Drift => "drift_px",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Robust per-metric centers, in original measurement units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityMetrics {
    pub latency_ms: f64,
    pub drift_px: f64,
    pub accuracy_px: f64,
}

impl SeverityMetrics {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Latency => self.latency_ms,
            Metric::Accuracy => self.accuracy_px,
            Metric::Drift => self.drift_px,
        }
    }
}

/// Engine output: composite severity plus robust centers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityResult {
    /// Weighted composite badness in `[0, 100]`.
    pub severity: f64,
    pub metrics: SeverityMetrics,
}

/// How one metric fed into the composite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    /// Number of samples the center was computed from.
    pub samples: usize,
    /// Median of the clipped samples, original units.
    pub center: f64,
    /// Center mapped onto `0..=100` against the policy cap.
    pub badness: f64,
    pub weight: f64,
    /// `weight * badness`.
    pub contribution: f64,
}

/// Per-metric view of a scoring run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    pub severity: f64,
    pub latency: MetricScore,
    pub accuracy: MetricScore,
    pub drift: MetricScore,
}

impl SeverityBreakdown {
    pub fn metric(&self, metric: Metric) -> &MetricScore {
        match metric {
            Metric::Latency => &self.latency,
            Metric::Accuracy => &self.accuracy,
            Metric::Drift => &self.drift,
        }
    }

    /// Collapse to the engine result (severity and centers only).
    pub fn to_result(&self) -> SeverityResult {
        SeverityResult {
            severity: self.severity,
            metrics: SeverityMetrics {
                latency_ms: self.latency.center,
                drift_px: self.drift.center,
                accuracy_px: self.accuracy.center,
            },
        }
    }
}

/// Stateless scorer bound to one [`ScoringPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeverityScorer {
    policy: ScoringPolicy,
}

impl SeverityScorer {
    /// Build a scorer after validating `policy`.
    pub fn new(policy: ScoringPolicy) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score one session's samples. Sequences may be empty.
    pub fn score(&self, latencies: &[f64], drifts: &[f64], accuracies: &[f64]) -> SeverityResult {
        self.breakdown(latencies, drifts, accuracies).to_result()
    }

    /// Score pre-partitioned samples.
    pub fn score_samples(&self, samples: &MetricSamples) -> SeverityResult {
        self.score(&samples.latencies, &samples.drifts, &samples.accuracies)
    }

    /// Score and keep the per-metric centers, badness and contributions.
    pub fn breakdown(
        &self,
        latencies: &[f64],
        drifts: &[f64],
        accuracies: &[f64],
    ) -> SeverityBreakdown {
        if latencies.is_empty() && drifts.is_empty() && accuracies.is_empty() {
            log::debug!("no samples in any metric, severity 0");
            return SeverityBreakdown {
                latency: self.zero_score(Metric::Latency),
                accuracy: self.zero_score(Metric::Accuracy),
                drift: self.zero_score(Metric::Drift),
                ..Default::default()
            };
        }

        let latency = self.metric_score(Metric::Latency, latencies);
        let accuracy = self.metric_score(Metric::Accuracy, accuracies);
        let drift = self.metric_score(Metric::Drift, drifts);
        let severity = accuracy.contribution + latency.contribution + drift.contribution;

        log::debug!(
            "severity {severity:.4} (lat {:.2}/{}, acc {:.2}/{}, drift {:.2}/{})",
            latency.badness,
            latency.samples,
            accuracy.badness,
            accuracy.samples,
            drift.badness,
            drift.samples,
        );

        SeverityBreakdown {
            severity,
            latency,
            accuracy,
            drift,
        }
    }

    /// Breakdown for pre-partitioned samples.
    pub fn breakdown_samples(&self, samples: &MetricSamples) -> SeverityBreakdown {
        self.breakdown(&samples.latencies, &samples.drifts, &samples.accuracies)
    }

    fn cap(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Latency => self.policy.lat_cap,
            Metric::Accuracy => self.policy.acc_cap,
            Metric::Drift => self.policy.drift_cap,
        }
    }

    fn weight(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Latency => self.policy.w_lat,
            Metric::Accuracy => self.policy.w_acc,
            Metric::Drift => self.policy.w_drf,
        }
    }

    fn zero_score(&self, metric: Metric) -> MetricScore {
        MetricScore {
            weight: self.weight(metric),
            ..Default::default()
        }
    }

    fn metric_score(&self, metric: Metric, values: &[f64]) -> MetricScore {
        let center = robust_center(values);
        let badness = normalize_badness(center, self.cap(metric));
        let weight = self.weight(metric);
        MetricScore {
            samples: values.len(),
            center,
            badness,
            weight,
            contribution: weight * badness,
        }
    }
}
