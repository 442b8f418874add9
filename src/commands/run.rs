//! Implementation of the `symposium run` command.
//!
//! Seats the table described by the config (or `--ring N`), runs one dinner
//! and prints the completed orders.

use super::{LogOverrides, prepare};
use crate::cli::RunArgs;
use std::time::Duration;
use symposium::config::Config;
use symposium::error::Result;
use symposium::events::{NdjsonSink, NoopSink};
use symposium::table::{DinnerReport, DinnerSettings, Table};
use symposium::topology::Topology;
use tracing::info;

/// Execute the `symposium run` command.
pub fn cmd_run(args: RunArgs, log: &LogOverrides) -> Result<()> {
    let config = prepare(args.config.as_deref(), log)?;
    let (topology, settings) = plan(&args, &config);
    let table = Table::new(topology, settings)?;

    let event_log = args.events.as_ref().map(NdjsonSink::open).transpose()?;

    if !args.json {
        println!("Dining Philosophers");
        println!("-------------------");
        println!("The table is empty");
    }

    let report = match &event_log {
        Some(sink) => table.dine(sink)?,
        None => table.dine(&NoopSink)?,
    };

    if let Some(sink) = &event_log {
        sink.finish()?;
        info!(path = %sink.path().display(), "dining events written");
    }

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("The table is empty");
        println!("{}", render_orders(&report));
    }

    Ok(())
}

/// Apply command-line overrides on top of the config.
fn plan(args: &RunArgs, config: &Config) -> (Topology, DinnerSettings) {
    let topology = match args.ring {
        Some(n) => Topology::numbered_ring(n),
        None => config.topology(),
    };

    let mut settings = config.settings();
    if let Some(rounds) = args.rounds {
        settings.rounds = rounds;
    }
    if let Some(ms) = args.eat_ms {
        settings.eat_time = Duration::from_millis(ms);
    }
    if let Some(ms) = args.think_ms {
        settings.think_time = Duration::from_millis(ms);
    }

    (topology, settings)
}

fn render_orders(report: &DinnerReport) -> String {
    format!("Orders completed: [{}]", report.completed.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use symposium::events::{DiningAction, read_events};
    use symposium::exit_codes;
    use tempfile::TempDir;

    fn quiet() -> LogOverrides {
        LogOverrides {
            level: Some("off".to_string()),
            json: false,
        }
    }

    fn write_config(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
        let path = dir.path().join("symposium.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn plan_uses_config_without_overrides() {
        let config = Config::default();
        let (topology, settings) = plan(&RunArgs::default(), &config);

        assert_eq!(topology, Topology::classic());
        assert_eq!(settings, DinnerSettings::default());
    }

    #[test]
    fn plan_applies_overrides() {
        let args = RunArgs {
            rounds: Some(0),
            ring: Some(4),
            eat_ms: Some(3),
            think_ms: Some(4),
            ..RunArgs::default()
        };
        let (topology, settings) = plan(&args, &Config::default());

        assert_eq!(topology.len(), 4);
        assert_eq!(topology.names()[0], "philosopher-0");
        assert_eq!(settings.rounds, 0);
        assert_eq!(settings.eat_time, Duration::from_millis(3));
        assert_eq!(settings.think_time, Duration::from_millis(4));
    }

    #[test]
    fn render_lists_completed_names() {
        let report = DinnerReport {
            completed: vec!["Plato".to_string(), "Locke".to_string()],
            rounds: 1,
            meals: Default::default(),
            fork_acquisitions: vec![1, 1],
            elapsed_ms: 0,
        };
        assert_eq!(render_orders(&report), "Orders completed: [Plato, Locke]");
    }

    #[test]
    fn run_writes_event_log() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "rounds: 2\n");
        let events = dir.path().join("events.ndjson");

        let args = RunArgs {
            config: Some(config),
            ring: Some(3),
            events: Some(events.clone()),
            json: true,
            ..RunArgs::default()
        };
        cmd_run(args, &quiet()).unwrap();

        let recorded = read_events(&events).unwrap();
        let eating = recorded
            .iter()
            .filter(|e| e.action == DiningAction::Eating)
            .count();
        let left = recorded
            .iter()
            .filter(|e| e.action == DiningAction::LeftTable)
            .count();
        assert_eq!(eating, 6);
        assert_eq!(left, 3);
    }

    #[test]
    fn run_rejects_empty_ring() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "");

        let args = RunArgs {
            config: Some(config),
            ring: Some(0),
            ..RunArgs::default()
        };
        let err = cmd_run(args, &quiet()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_TOPOLOGY);
    }

    #[test]
    fn run_rejects_unknown_log_level() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, "");

        let args = RunArgs {
            config: Some(config),
            ..RunArgs::default()
        };
        let log = LogOverrides {
            level: Some("loud".to_string()),
            json: false,
        };
        let err = cmd_run(args, &log).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    const BAD_SEATING: &str = "philosophers:\n  - { name: Kant, left: 0, right: 9 }\n";

    #[test]
    fn ring_run_ignores_seating_plan_on_disk() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, BAD_SEATING);

        let args = RunArgs {
            config: Some(config),
            ring: Some(3),
            rounds: Some(1),
            json: true,
            ..RunArgs::default()
        };
        cmd_run(args, &quiet()).unwrap();
    }

    #[test]
    fn run_rejects_bad_seating_plan_it_would_use() {
        let dir = TempDir::new().unwrap();
        let config = write_config(&dir, BAD_SEATING);

        let args = RunArgs {
            config: Some(config),
            ..RunArgs::default()
        };
        let err = cmd_run(args, &quiet()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::INVALID_TOPOLOGY);
    }
}
