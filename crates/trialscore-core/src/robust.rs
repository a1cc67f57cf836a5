//! Order-statistic primitives composed by the severity scorer.
//!
//! Everything here is a small pure function over `f64` slices. None of them
//! validate their input; callers reject non-finite samples beforehand (see
//! [`crate::trial::MetricSamples::validate`]).

use std::cmp::Ordering;

/// Percentile used to clip outliers before taking the robust center.
pub const CLIP_PERCENTILE: f64 = 0.95;

/// Return a sorted copy of `values` (ascending).
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Interpolated percentile of `values` at rank `p` in `[0, 1]`.
///
/// The rank is `k = (n - 1) * p`, bracketed by `f = floor(k)` and
/// `c = min(f + 1, n - 1)`. When the two coincide the exact order statistic is
/// returned; otherwise the result is `sorted[f] * (c - f) + sorted[c] * (k - f)`,
/// i.e. the lower order statistic keeps its full weight and the upper one is
/// added in proportion to the fractional rank. Existing severity scores depend
/// on this exact weighting.
///
/// Returns `0.0` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted(values);
    let n = sorted.len();
    let k = (n - 1) as f64 * p.clamp(0.0, 1.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(n - 1);
    if f == c {
        return sorted[f];
    }
    let d0 = sorted[f] * (c - f) as f64;
    let d1 = sorted[c] * (k - f as f64);
    d0 + d1
}

/// Replace every value above `hi` with `hi`. Order and length are preserved.
pub fn clip_to(values: &[f64], hi: f64) -> Vec<f64> {
    values.iter().map(|&v| v.min(hi)).collect()
}

/// Clip `values` at their own [`CLIP_PERCENTILE`].
///
/// Empty and single-element slices come back unchanged.
pub fn clip_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return values.to_vec();
    }
    let hi = percentile(values, CLIP_PERCENTILE);
    log::trace!("clip threshold {hi} over {} samples", values.len());
    clip_to(values, hi)
}

/// Median of `values`; the mean of the two middle elements when the length is
/// even. Returns `0.0` for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Robust center: median of the percentile-clipped sequence.
pub fn robust_center(values: &[f64]) -> f64 {
    median(&clip_outliers(values))
}

/// Arithmetic mean, `0.0` when empty. Used for display only, never for scoring.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Map a raw value onto `0..=100` badness relative to `cap` (lower raw is better).
pub fn normalize_badness(value: f64, cap: f64) -> f64 {
    if value <= 0.0 {
        return 0.0;
    }
    ((value / cap) * 100.0).clamp(0.0, 100.0)
}
