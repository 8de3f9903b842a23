mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mrl_eval_shared::Epsilon;

#[derive(Parser)]
#[command(name = "mrl-eval", about = "MRL sketch accuracy report analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a batch of reports and write the summary table and comparison data
    Summarize {
        /// Report directories or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,
        /// Directory receiving summary_table.csv and comparisons.json
        #[arg(long)]
        output_dir: PathBuf,
        /// ε values for the fixed-ε comparison (repeatable; default: every ε found)
        #[arg(long = "epsilon", value_parser = parse_epsilon)]
        epsilons: Vec<Epsilon>,
        /// Number of parallel parse workers (0 = auto)
        #[arg(long, default_value = "0")]
        workers: usize,
        /// JSON analysis config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Parse one report and print its metrics and verdicts
    Inspect {
        /// Path to the report file
        file: PathBuf,
        /// JSON analysis config
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_epsilon(s: &str) -> Result<Epsilon, String> {
    let value: f64 = s.parse().map_err(|e| format!("{s:?}: {e}"))?;
    Epsilon::try_from(value)
}

fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    )
    .target(env_logger::Target::Stderr)
    .format_timestamp(None)
    .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            inputs,
            output_dir,
            epsilons,
            workers,
            config,
        } => commands::summarize::run(&inputs, &output_dir, epsilons, workers, config.as_deref()),
        Commands::Inspect { file, config } => commands::inspect::run(&file, config.as_deref()),
    }
}
