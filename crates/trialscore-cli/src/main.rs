//! CLI for trialscore: reduce trial sessions to one robust severity score.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trialscore")]
#[command(about = "trialscore: robust severity scoring for latency, accuracy and drift trials")]
#[command(version = trialscore_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a trial batch (JSON array of trials, or {"session_id", "trials"})
    Score {
        /// Trial batch file; reads stdin when omitted or "-"
        input: Option<String>,

        /// Scoring policy JSON (caps and weights); defaults apply to missing fields
        #[arg(long)]
        policy: Option<String>,

        /// Override the session id reported in the output
        #[arg(long)]
        session_id: Option<i64>,

        /// Print the score report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Show per-metric badness, weight and contribution
        #[arg(long)]
        detailed: bool,

        /// Also write the JSON score report to this path
        #[arg(long)]
        output: Option<String>,
    },

    /// Print the effective scoring policy as JSON
    Policy {
        /// Policy file to validate and print; defaults when omitted
        #[arg(long)]
        policy: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            policy,
            session_id,
            json,
            detailed,
            output,
        } => commands::score::run(commands::score::ScoreCommandConfig {
            input: input.as_deref(),
            policy_path: policy.as_deref(),
            session_id,
            json,
            detailed,
            output_path: output.as_deref(),
        }),
        Commands::Policy { policy } => commands::policy::run(policy.as_deref()),
    }
}
