//! # blank
//!
//! Generate blank dev projects using makefiles, and patch JSON/YAML config
//! files from them.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (file + env + defaults).
//! 4. Apply `-P` / `-a` to the search path.
//! 5. Dispatch to the command handler; `make` when none is named.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal / system error                  |
//! |  2   | Usage, fragment or merge error           |
//! |  3   | Target or makefile missing or unreadable |
//! |  4   | Configuration error                      |
//!
//! `blank make` exits with make's own status.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::{debug, instrument};

use blank_core::domain::SearchPath;

use crate::{
    cli::{Cli, Commands, SearchArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Silently ignored if .env doesn't exist.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(1);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    // `init` creates the file `--config` names, so it may not exist yet.
    let file = match cli.command {
        Some(Commands::Init(_)) => None,
        _ => cli.global.config.as_deref(),
    };
    let config = match AppConfig::load(file) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = commands::config::config_error(e);
            return handle_error(err, cli.global.verbose > 0);
        }
    };

    // ── 4. Search path ────────────────────────────────────────────────────
    let search = search_path(&config, &cli.search);
    debug!(search = ?search.dirs(), "Search path resolved");

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    match run(cli, &config, &search, &output) {
        Ok(code) => code,
        Err(e) => handle_error(e, verbose),
    }
}

/// The configured search path with `-P` applied, then every `-a`.
fn search_path(config: &AppConfig, args: &SearchArgs) -> SearchPath {
    let mut search = config.search_path();
    if let Some(paths) = &args.replace {
        search.replace(paths);
    }
    for dir in &args.add {
        search.push(dir.clone());
    }
    search
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(
    cli: Cli,
    config: &AppConfig,
    search: &SearchPath,
    output: &OutputManager,
) -> CliResult<ExitCode> {
    let file = cli.global.config.as_deref();

    match cli.command {
        None => commands::make::execute(&[], search, config),
        Some(Commands::Make(args)) => commands::make::execute(&args.args, search, config),
        Some(Commands::External(args)) => commands::make::execute(&args, search, config),
        Some(Commands::Update(args)) => {
            commands::update::execute(args, config, output).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Completions(args)) => {
            commands::completions::execute(args).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Config(cmd)) => {
            commands::config::execute(cmd, config, file, output).map(|()| ExitCode::SUCCESS)
        }
        Some(Commands::Init(args)) => {
            commands::init::execute(args, file, output).map(|()| ExitCode::SUCCESS)
        }
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// Usage errors are followed by the usage line of the subcommand they
/// came from.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    if let Some(usage) = err.usage_command().and_then(subcommand_usage) {
        eprintln!("\n{usage}");
    }

    ExitCode::from(err.exit_code())
}

fn subcommand_usage(name: &str) -> Option<String> {
    let mut cmd = Cli::command();
    cmd.build();
    cmd.find_subcommand_mut(name)
        .map(|sub| sub.render_usage().to_string())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn update_usage_is_rendered() {
        let usage = subcommand_usage("update").unwrap();
        assert!(usage.contains("blank update"));
        assert!(subcommand_usage("nope").is_none());
    }

    #[test]
    fn replace_then_add() {
        let mut config = AppConfig::default();
        config.search.paths = vec![PathBuf::from("/default")];

        let args = SearchArgs {
            add: vec![PathBuf::from("/extra")],
            replace: Some("/only".into()),
        };
        assert_eq!(
            search_path(&config, &args).dirs(),
            [PathBuf::from("/only"), PathBuf::from("/extra")]
        );

        let args = SearchArgs {
            add: vec![PathBuf::from("/extra")],
            replace: None,
        };
        assert_eq!(
            search_path(&config, &args).dirs(),
            [PathBuf::from("/default"), PathBuf::from("/extra")]
        );
    }
}
