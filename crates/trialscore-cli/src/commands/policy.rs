//! `trialscore policy`: show the caps and weights a score would use.

pub fn run(policy_path: Option<&str>) {
    let policy = super::load_policy(policy_path).unwrap_or_else(|e| super::fail(&e));
    match serde_json::to_string_pretty(&policy) {
        Ok(json) => println!("{json}"),
        Err(e) => super::fail(&e),
    }
}
