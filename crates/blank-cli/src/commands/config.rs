//! `blank config`: inspect the active configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `file` is the `--config` path, if one was given.
pub fn execute(
    cmd: ConfigCommands,
    config: &AppConfig,
    file: Option<&Path>,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml().map_err(config_error)?)?;
        }

        ConfigCommands::Path => {
            let path = file.map_or_else(AppConfig::config_path, Path::to_path_buf);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

/// Wrap a config-layer failure, keeping the full context chain.
pub(crate) fn config_error(err: anyhow::Error) -> CliError {
    CliError::ConfigError {
        message: format!("{err:#}"),
        source: Some(err.into()),
    }
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Render a key's value; strings print bare, everything else as TOML.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match config.get(key).map_err(config_error)? {
        Some(toml::Value::String(s)) => Ok(s),
        Some(value) => Ok(value.to_string()),
        None => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
