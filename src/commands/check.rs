//! Implementation of the `symposium check` command.
//!
//! Loads and validates the config, then prints the seating plan with the
//! order each philosopher picks up its forks.

use super::{LogOverrides, prepare};
use crate::cli::CheckArgs;
use std::fmt::Write;
use symposium::config::Config;
use symposium::error::Result;

/// Execute the `symposium check` command.
pub fn cmd_check(args: CheckArgs, log: &LogOverrides) -> Result<()> {
    let config = prepare(args.config.as_deref(), log)?;
    config.validate()?;
    print!("{}", render_plan(&config));
    println!("Configuration is valid.");
    Ok(())
}

fn render_plan(config: &Config) -> String {
    let topology = config.topology();
    let width = topology
        .names()
        .iter()
        .map(|n| n.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Seating plan: {} philosophers, {} forks",
        topology.len(),
        topology.fork_count()
    );
    for seat in topology.seats() {
        let order = match seat.pickup_order() {
            (first, Some(second)) => format!("{} then {}", first, second),
            (only, None) => format!("{} only", only),
        };
        let _ = writeln!(
            out,
            "  {:width$}  left {:>3}  right {:>3}  picks up {}",
            seat.name,
            seat.left,
            seat.right,
            order,
            width = width
        );
    }
    let _ = writeln!(
        out,
        "Rounds: {} (eat {} ms, think {} ms)",
        config.rounds, config.eat_time_ms, config.think_time_ms
    );
    out
}
