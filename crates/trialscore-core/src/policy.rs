//! Scoring policy: per-metric caps and composite weights.
//!
//! A policy is an immutable value bound to a [`crate::SeverityScorer`] at
//! construction, so several policies can be scored side by side. Scores from
//! different policies are not comparable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrialscoreError};

/// Latency (ms) at or above which latency badness is maximal.
pub const DEFAULT_LAT_CAP: f64 = 700.0;
/// Drift (px) at or above which drift badness is maximal.
pub const DEFAULT_DRIFT_CAP: f64 = 450.0;
/// Accuracy miss (px) at or above which accuracy badness is maximal.
pub const DEFAULT_ACC_CAP: f64 = 120.0;

/// Default accuracy weight. Accuracy dominates the composite.
pub const DEFAULT_W_ACC: f64 = 0.50;
/// Default latency weight.
pub const DEFAULT_W_LAT: f64 = 0.30;
/// Default drift weight.
pub const DEFAULT_W_DRF: f64 = 0.20;

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Caps and weights used to turn robust centers into a severity score.
///
/// Deserializing fills any missing field from [`ScoringPolicy::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub lat_cap: f64,
    pub drift_cap: f64,
    pub acc_cap: f64,
    pub w_acc: f64,
    pub w_lat: f64,
    pub w_drf: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            lat_cap: DEFAULT_LAT_CAP,
            drift_cap: DEFAULT_DRIFT_CAP,
            acc_cap: DEFAULT_ACC_CAP,
            w_acc: DEFAULT_W_ACC,
            w_lat: DEFAULT_W_LAT,
            w_drf: DEFAULT_W_DRF,
        }
    }
}

impl ScoringPolicy {
    /// Sum of the three composite weights.
    pub fn weight_sum(&self) -> f64 {
        self.w_acc + self.w_lat + self.w_drf
    }

    /// Check that caps are positive and finite and that the weights are
    /// non-negative and sum to 1.0. Both together keep severity in `0..=100`.
    pub fn validate(&self) -> Result<()> {
        for (name, cap) in [
            ("lat_cap", self.lat_cap),
            ("drift_cap", self.drift_cap),
            ("acc_cap", self.acc_cap),
        ] {
            if !cap.is_finite() || cap <= 0.0 {
                return Err(TrialscoreError::InvalidPolicy(format!(
                    "{name} must be a positive finite number, got {cap}"
                )));
            }
        }
        for (name, w) in [
            ("w_acc", self.w_acc),
            ("w_lat", self.w_lat),
            ("w_drf", self.w_drf),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(TrialscoreError::InvalidPolicy(format!(
                    "{name} must be a non-negative finite number, got {w}"
                )));
            }
        }
        let sum = self.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(TrialscoreError::InvalidPolicy(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON policy document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load and validate a policy from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let policy = Self::from_json_str(&contents)?;
        log::debug!("loaded scoring policy from {}: {policy:?}", path.display());
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_valid() {
        let policy = ScoringPolicy::default();
        assert!(policy.validate().is_ok());
        assert!((policy.weight_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let policy = ScoringPolicy {
            w_acc: 0.6,
            ..Default::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"), "{err}");
    }

    #[test]
    fn rejects_negative_weight() {
        let policy = ScoringPolicy {
            w_acc: 1.2,
            w_lat: -0.4,
            w_drf: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            policy.validate(),
            Err(TrialscoreError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn rejects_non_positive_cap() {
        for cap in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let policy = ScoringPolicy {
                drift_cap: cap,
                ..Default::default()
            };
            assert!(policy.validate().is_err(), "cap {cap} accepted");
        }
    }

    #[test]
    fn json_missing_fields_use_defaults() {
        let policy = ScoringPolicy::from_json_str(r#"{"lat_cap": 500.0}"#).unwrap();
        assert_eq!(policy.lat_cap, 500.0);
        assert_eq!(policy.drift_cap, DEFAULT_DRIFT_CAP);
        assert_eq!(policy.w_acc, DEFAULT_W_ACC);
    }

    #[test]
    fn json_invalid_weights_rejected() {
        let err = ScoringPolicy::from_json_str(r#"{"w_acc": 0.9}"#).unwrap_err();
        assert!(matches!(err, TrialscoreError::InvalidPolicy(_)));
    }

    #[test]
    fn json_malformed_rejected() {
        let err = ScoringPolicy::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, TrialscoreError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("policy.json");
        std::fs::write(
            &path,
            r#"{"w_acc": 0.4, "w_lat": 0.4, "w_drf": 0.2, "acc_cap": 80.0}"#,
        )
        .unwrap();
        let policy = ScoringPolicy::load(&path).unwrap();
        assert_eq!(policy.acc_cap, 80.0);
        assert_eq!(policy.w_lat, 0.4);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ScoringPolicy::load(tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TrialscoreError::Io(_)));
    }
}
