//! `trialscore score`: score one session's trial batch.

use std::fmt::Write as _;

use trialscore_core::{Metric, SessionScoreReport, SeverityBreakdown, TrialBatch, TrialscoreError};

pub struct ScoreCommandConfig<'a> {
    pub input: Option<&'a str>,
    pub policy_path: Option<&'a str>,
    pub session_id: Option<i64>,
    pub json: bool,
    pub detailed: bool,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: ScoreCommandConfig<'_>) {
    let scorer = super::make_scorer(cfg.policy_path);
    let mut batch = read_batch(cfg.input).unwrap_or_else(|e| super::fail(&e));
    if cfg.session_id.is_some() {
        batch.session_id = cfg.session_id;
    }

    let samples = batch.samples();
    if let Err(e) = samples.validate() {
        super::fail(&e);
    }
    log::info!(
        "scoring {} trials ({} latency, {} accuracy, {} drift samples)",
        samples.n_trials,
        samples.latencies.len(),
        samples.accuracies.len(),
        samples.drifts.len(),
    );

    let report = SessionScoreReport::build(batch.session_id, &samples, &scorer);
    let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| super::fail(&e));

    if cfg.json {
        println!("{json}");
    } else {
        let breakdown = cfg.detailed.then(|| scorer.breakdown_samples(&samples));
        print!("{}", render_table(&report, breakdown.as_ref()));
    }

    if let Some(path) = cfg.output_path {
        match std::fs::write(path, &json) {
            Ok(()) => eprintln!("Report written to {path}"),
            Err(e) => eprintln!("Failed to write {path}: {e}"),
        }
    }
}

/// Read a trial batch from `input`, or stdin when it is `None` or `"-"`.
pub fn read_batch(input: Option<&str>) -> Result<TrialBatch, TrialscoreError> {
    match input {
        None | Some("-") => TrialBatch::from_reader(std::io::stdin().lock()),
        Some(path) => TrialBatch::load(path),
    }
}

/// Human-readable summary of a report, optionally with the per-metric breakdown.
pub fn render_table(report: &SessionScoreReport, breakdown: Option<&SeverityBreakdown>) -> String {
    let mut out = String::new();
    let session = report
        .session_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    let _ = writeln!(out, "Session:  {session}");
    let _ = writeln!(out, "Trials:   {}", report.n_trials);

    let (Some(severity), Some(metrics)) = (report.severity, report.metrics) else {
        let _ = writeln!(
            out,
            "Severity: n/a ({})",
            report.message.as_deref().unwrap_or("no score")
        );
        return out;
    };

    let _ = writeln!(out, "Severity: {severity:.2} / 100");
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<12} {:>10} {:>10}", "Metric", "Center", "Mean");
    let _ = writeln!(out, "  {}", "-".repeat(34));
    for (metric, mean) in [
        (Metric::Latency, report.avg_latency),
        (Metric::Accuracy, report.avg_accuracy),
        (Metric::Drift, report.avg_drift),
    ] {
        let _ = writeln!(
            out,
            "  {:<12} {:>10.1} {:>10.3}",
            metric.key(),
            metrics.get(metric),
            mean
        );
    }

    if let Some(b) = breakdown {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:<12} {:>8} {:>8} {:>7} {:>8}",
            "Metric", "Samples", "Badness", "Weight", "Contrib"
        );
        let _ = writeln!(out, "  {}", "-".repeat(47));
        for metric in Metric::ALL {
            let s = b.metric(metric);
            let _ = writeln!(
                out,
                "  {:<12} {:>8} {:>8.2} {:>7.2} {:>8.2}",
                metric.key(),
                s.samples,
                s.badness,
                s.weight,
                s.contribution
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscore_core::{MetricSamples, SeverityScorer, Trial};

    fn uniform_samples() -> MetricSamples {
        MetricSamples::from_trials(&[Trial::new(100.0, 10.0, 50.0); 3])
    }

    #[test]
    fn read_batch_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("batch.json");
        std::fs::write(&path, r#"[{"latency": 1, "accuracy": 2, "drift": 3}]"#).unwrap();
        let batch = read_batch(path.to_str()).unwrap();
        assert_eq!(batch.trials.len(), 1);
    }

    #[test]
    fn read_batch_missing_file() {
        assert!(matches!(
            read_batch(Some("/definitely/not/here.json")),
            Err(TrialscoreError::Io(_))
        ));
    }

    #[test]
    fn table_shows_severity_and_centers() {
        let samples = uniform_samples();
        let report = SessionScoreReport::build(Some(5), &samples, &SeverityScorer::default());
        let table = render_table(&report, None);
        assert!(table.contains("Session:  5"));
        assert!(table.contains("Severity: 10.67 / 100"));
        assert!(table.contains("latency_ms"));
        assert!(!table.contains("Badness"));
    }

    #[test]
    fn table_detailed_includes_breakdown() {
        let samples = uniform_samples();
        let scorer = SeverityScorer::default();
        let report = SessionScoreReport::build(None, &samples, &scorer);
        let breakdown = scorer.breakdown_samples(&samples);
        let table = render_table(&report, Some(&breakdown));
        assert!(table.contains("Session:  -"));
        assert!(table.contains("Badness"));
        assert!(table.contains("0.50"));
    }

    #[test]
    fn table_without_trials() {
        let report = SessionScoreReport::no_trials(Some(2));
        let table = render_table(&report, None);
        assert!(table.contains("Severity: n/a (no trials)"));
        assert!(!table.contains("Metric"));
    }
}
