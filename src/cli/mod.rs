//! CLI argument parsing for symposium.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Symposium: deadlock-free dining coordinator.
///
/// Philosophers sit around a table of shared forks and eat for a fixed number
/// of rounds. Forks are always picked up lowest id first, so the dinner
/// cannot deadlock.
#[derive(Parser, Debug)]
#[command(name = "symposium")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (trace, debug, info, warn, error, off). `RUST_LOG` wins if set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for symposium.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one dinner and print who finished.
    ///
    /// Seats every philosopher, waits until all have eaten every round,
    /// then lists the completed orders.
    Run(RunArgs),

    /// Validate the configuration and print the seating plan.
    Check(CheckArgs),

    /// Write the default configuration file.
    Init(InitArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Config file (default: ./symposium.yaml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rounds each philosopher eats.
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Replace the configured seats with a ring of N numbered philosophers.
    #[arg(long, value_name = "N")]
    pub ring: Option<usize>,

    /// Milliseconds spent eating per round.
    #[arg(long, value_name = "MS")]
    pub eat_ms: Option<u64>,

    /// Milliseconds spent thinking per round.
    #[arg(long, value_name = "MS")]
    pub think_ms: Option<u64>,

    /// Append every dining event to this NDJSON file.
    #[arg(long, value_name = "PATH")]
    pub events: Option<PathBuf>,

    /// Print the dinner report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug, Default)]
pub struct CheckArgs {
    /// Config file (default: ./symposium.yaml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the config.
    #[arg(default_value = "symposium.yaml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "symposium",
            "run",
            "--rounds",
            "0",
            "--ring",
            "7",
            "--eat-ms",
            "5",
            "--events",
            "dinner.ndjson",
            "--json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.rounds, Some(0));
                assert_eq!(args.ring, Some(7));
                assert_eq!(args.eat_ms, Some(5));
                assert_eq!(args.think_ms, None);
                assert_eq!(args.events, Some(PathBuf::from("dinner.ndjson")));
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn init_defaults_path() {
        let cli = Cli::try_parse_from(["symposium", "init"]).unwrap();
        match cli.command {
            Command::Init(args) => {
                assert_eq!(args.path, PathBuf::from("symposium.yaml"));
                assert!(!args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_rounds() {
        assert!(Cli::try_parse_from(["symposium", "run", "--rounds", "-1"]).is_err());
    }
}
