//! Trial records and their partition into per-metric sample sequences.
//!
//! # Batch format
//!
//! A trial batch is JSON, either a bare array of trials or a session object:
//!
//! ```json
//! { "session_id": 7, "trials": [ { "latency": 180.0, "accuracy": 14.5, "drift": 30.0 } ] }
//! ```
//!
//! Any metric field may be `null` or absent. Such a trial is dropped from that
//! metric's sequence only and still counts toward `n_trials`. Unknown keys are
//! rejected, so a misspelled field never reads as a missing metric.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrialscoreError};
use crate::scorer::Metric;

/// One measurement record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Trial {
    /// Response latency in milliseconds.
    pub latency: Option<f64>,
    /// Distance from target in pixels.
    pub accuracy: Option<f64>,
    /// Positional drift in pixels.
    pub drift: Option<f64>,
}

impl Trial {
    pub fn new(latency: f64, accuracy: f64, drift: f64) -> Self {
        Self {
            latency: Some(latency),
            accuracy: Some(accuracy),
            drift: Some(drift),
        }
    }
}

/// Trials of one session, optionally tagged with its identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrialBatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
    pub trials: Vec<Trial>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchDocument {
    Bare(Vec<Trial>),
    Session(TrialBatch),
}

impl TrialBatch {
    pub fn new(session_id: Option<i64>, trials: Vec<Trial>) -> Self {
        Self { session_id, trials }
    }

    /// Parse either accepted document shape.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let doc: BatchDocument = serde_json::from_str(json)?;
        Ok(Self::from_document(doc))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: BatchDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_document(doc))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    fn from_document(doc: BatchDocument) -> Self {
        match doc {
            BatchDocument::Bare(trials) => Self {
                session_id: None,
                trials,
            },
            BatchDocument::Session(batch) => batch,
        }
    }

    pub fn samples(&self) -> MetricSamples {
        MetricSamples::from_trials(&self.trials)
    }
}

/// A session's trials partitioned by metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSamples {
    pub latencies: Vec<f64>,
    pub accuracies: Vec<f64>,
    pub drifts: Vec<f64>,
    /// Number of trial rows, including rows with every metric missing.
    pub n_trials: usize,
}

impl MetricSamples {
    pub fn from_trials(trials: &[Trial]) -> Self {
        Self {
            latencies: trials.iter().filter_map(|t| t.latency).collect(),
            accuracies: trials.iter().filter_map(|t| t.accuracy).collect(),
            drifts: trials.iter().filter_map(|t| t.drift).collect(),
            n_trials: trials.len(),
        }
    }

    pub fn get(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Latency => &self.latencies,
            Metric::Accuracy => &self.accuracies,
            Metric::Drift => &self.drifts,
        }
    }

    /// True when no metric has any sample.
    pub fn is_empty(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m).is_empty())
    }

    /// Reject NaN and infinite samples before they reach the scorer.
    pub fn validate(&self) -> Result<()> {
        for metric in Metric::ALL {
            if let Some((index, &value)) = self
                .get(metric)
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite())
            {
                log::warn!("rejecting non-finite {metric} sample at index {index}");
                return Err(TrialscoreError::NonFiniteSample {
                    metric: metric.key(),
                    index,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_by_metric() {
        let trials = vec![Trial::new(100.0, 10.0, 50.0), Trial::new(200.0, 20.0, 60.0)];
        let s = MetricSamples::from_trials(&trials);
        assert_eq!(s.latencies, vec![100.0, 200.0]);
        assert_eq!(s.accuracies, vec![10.0, 20.0]);
        assert_eq!(s.drifts, vec![50.0, 60.0]);
        assert_eq!(s.n_trials, 2);
    }

    #[test]
    fn missing_fields_dropped_per_metric() {
        let trials = vec![
            Trial {
                latency: Some(150.0),
                accuracy: None,
                drift: Some(5.0),
            },
            Trial::default(),
        ];
        let s = MetricSamples::from_trials(&trials);
        assert_eq!(s.latencies, vec![150.0]);
        assert!(s.accuracies.is_empty());
        assert_eq!(s.drifts, vec![5.0]);
        assert_eq!(s.n_trials, 2);
        assert!(!s.is_empty());
    }

    #[test]
    fn all_missing_is_empty_but_counted() {
        let s = MetricSamples::from_trials(&[Trial::default(); 3]);
        assert!(s.is_empty());
        assert_eq!(s.n_trials, 3);
    }

    #[test]
    fn validate_rejects_non_finite() {
        let s = MetricSamples {
            drifts: vec![1.0, f64::NAN],
            ..Default::default()
        };
        match s.validate() {
            Err(TrialscoreError::NonFiniteSample { metric, index, .. }) => {
                assert_eq!(metric, "drift_px");
                assert_eq!(index, 1);
            }
            other => panic!("expected NonFiniteSample, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_negative_and_zero() {
        let s = MetricSamples {
            latencies: vec![0.0, -3.0],
            ..Default::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn parse_bare_array() {
        let batch = TrialBatch::from_json_str(
            r#"[{"latency": 100, "accuracy": 10, "drift": 50}, {"latency": 120}]"#,
        )
        .unwrap();
        assert_eq!(batch.session_id, None);
        assert_eq!(batch.trials.len(), 2);
        assert_eq!(batch.trials[1].accuracy, None);
    }

    #[test]
    fn parse_session_object() {
        let batch = TrialBatch::from_json_str(
            r#"{"session_id": 7, "trials": [{"latency": 1.5, "accuracy": null, "drift": 2}]}"#,
        )
        .unwrap();
        assert_eq!(batch.session_id, Some(7));
        assert_eq!(batch.trials[0].latency, Some(1.5));
        assert_eq!(batch.trials[0].accuracy, None);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            TrialBatch::from_json_str(r#"{"trials": "nope"}"#),
            Err(TrialscoreError::Json(_))
        ));
    }

    #[test]
    fn parse_rejects_misspelled_trial_field() {
        assert!(matches!(
            TrialBatch::from_json_str(r#"[{"latancy": 650}]"#),
            Err(TrialscoreError::Json(_))
        ));
        assert!(matches!(
            TrialBatch::from_json_str(
                r#"{"session_id": 1, "trials": [{"latency": 1, "acuracy": 110, "drfit": 400}]}"#
            ),
            Err(TrialscoreError::Json(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_batch_key() {
        assert!(matches!(
            TrialBatch::from_json_str(r#"{"sesion_id": 1, "trials": []}"#),
            Err(TrialscoreError::Json(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("trials.json");
        std::fs::write(&path, r#"{"session_id": 3, "trials": []}"#).unwrap();
        let batch = TrialBatch::load(&path).unwrap();
        assert_eq!(batch.session_id, Some(3));
        assert!(batch.samples().is_empty());
    }
}
