pub mod policy;
pub mod score;

use trialscore_core::{ScoringPolicy, SeverityScorer, TrialscoreError};

/// Resolve the scoring policy: the file at `path` when given, defaults otherwise.
pub fn load_policy(path: Option<&str>) -> Result<ScoringPolicy, TrialscoreError> {
    match path {
        Some(p) => ScoringPolicy::load(p),
        None => Ok(ScoringPolicy::default()),
    }
}

/// Build a scorer for `path`, exiting with a message if the policy is unusable.
pub fn make_scorer(path: Option<&str>) -> SeverityScorer {
    let policy = load_policy(path).unwrap_or_else(|e| fail(&e));
    SeverityScorer::new(policy).unwrap_or_else(|e| fail(&e))
}

/// Print an error to stderr and exit with status 1.
pub fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
