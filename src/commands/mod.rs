//! Command implementations for symposium.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and the config/logging preparation they share.

mod check;
mod init;
mod run;

use crate::cli::{Cli, Command};
use std::path::Path;
use symposium::config::Config;
use symposium::error::{Result, SymposiumError};
use symposium::logging;

/// Logging flags given on the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOverrides {
    pub level: Option<String>,
    pub json: bool,
}

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let log = LogOverrides {
        level: cli.log_level,
        json: cli.log_json,
    };

    match cli.command {
        Command::Run(args) => run::cmd_run(args, &log),
        Command::Check(args) => check::cmd_check(args, &log),
        Command::Init(args) => init::cmd_init(args, &log),
    }
}

/// Resolve the config, apply logging overrides, validate settings, and start logging.
///
/// The seating plan is left to the command, which validates only the
/// topology it actually seats.
fn prepare(config_path: Option<&Path>, log: &LogOverrides) -> Result<Config> {
    let cwd = std::env::current_dir().map_err(|e| {
        SymposiumError::UserError(format!("failed to read current directory: {}", e))
    })?;

    let mut config = Config::resolve(config_path, &cwd)?;
    config.logging = logging::with_overrides(&config.logging, log.level.as_deref(), log.json);
    config.validate_settings()?;

    logging::init_logging(&config.logging);
    Ok(config)
}
