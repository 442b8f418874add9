//! Implementation of the `symposium init` command.
//!
//! Writes the default configuration (the five-philosopher table, three
//! rounds, no eating or thinking delay) so it can be edited.

use super::LogOverrides;
use crate::cli::InitArgs;
use std::fs::{self, OpenOptions};
use std::io::Write;
use symposium::config::Config;
use symposium::error::{Result, SymposiumError};
use symposium::logging;
use tracing::info;

/// Execute the `symposium init` command.
///
/// Refuses to replace an existing file unless `--force` is given.
pub fn cmd_init(args: InitArgs, log: &LogOverrides) -> Result<()> {
    let config = Config::default();
    logging::init_logging(&logging::with_overrides(
        &config.logging,
        log.level.as_deref(),
        log.json,
    ));

    let path = args.path.as_path();
    let yaml = config.to_yaml()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            SymposiumError::UserError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if args.force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            SymposiumError::UserError(format!(
                "'{}' already exists (use --force to overwrite)",
                path.display()
            ))
        } else {
            SymposiumError::UserError(format!("failed to create '{}': {}", path.display(), e))
        }
    })?;

    file.write_all(yaml.as_bytes()).map_err(|e| {
        SymposiumError::UserError(format!("failed to write '{}': {}", path.display(), e))
    })?;

    info!(path = %path.display(), "wrote default config");
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> LogOverrides {
        LogOverrides {
            level: Some("off".to_string()),
            json: false,
        }
    }

    #[test]
    fn init_writes_loadable_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("symposium.yaml");

        cmd_init(
            InitArgs {
                path: path.clone(),
                force: false,
            },
            &quiet(),
        )
        .unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("symposium.yaml");
        fs::write(&path, "rounds: 9\n").unwrap();

        let err = cmd_init(
            InitArgs {
                path: path.clone(),
                force: false,
            },
            &quiet(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "rounds: 9\n");

        cmd_init(InitArgs { path: path.clone(), force: true }, &quiet()).unwrap();
        assert_eq!(Config::load(&path).unwrap().rounds, 3);
    }
}
