//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use blank_core::domain::Format;
use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub mod operations;

pub use global::{GlobalArgs, SearchArgs};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "blank",
    bin_name = "blank",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate blank dev projects using makefiles",
    long_about = "blank runs makefiles found on BLANK_PATH to scaffold projects, \
                  and patches JSON/YAML config files from those makefiles.\n\n\
                  If no command is given, blank defaults to the \"make\" command.",
    after_help = "EXAMPLES:\n\
        \x20 blank rust name=my-cli\n\
        \x20 blank -a ./makefiles node\n\
        \x20 blank update package.json -s /dependencies/eslint '\"^7\"'\n\
        \x20 blank completions bash > /usr/share/bash-completion/completions/blank\n\n\
        ENVIRONMENT:\n\
        \x20 BLANK       path to this program, set for makefiles\n\
        \x20 BLANK_PATH  directories searched for makefiles",
    allow_external_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Search path adjustments, applied before dispatch.
    #[command(flatten)]
    pub search: SearchArgs,

    /// Subcommand to execute; `make` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate blank dev projects using makefiles.
    #[command(
        about = "Generate blank dev projects using makefiles",
        long_about = "Target is searched for in the directories of BLANK_PATH. The \
                      first file named \"[target].mk\" found is used as the makefile \
                      (passed as the \"-f\" make option).\n\n\
                      Each directory in BLANK_PATH is also passed as an \"--include-dir\" \
                      make option and added to the VPATH make variable.\n\n\
                      All other arguments are passed directly to make.",
        after_help = "EXAMPLES:\n\
            \x20 blank make rust name=my-cli\n\
            \x20 blank make            # runs ./Makefile with BLANK_PATH includes"
    )]
    Make(MakeArgs),

    /// Update/patch config files.
    #[command(
        visible_alias = "u",
        about = "Update/patch config files",
        override_usage = "blank update [OPTIONS] <TARGET> [OPERATION [PATH] JSON]...",
        long_about = "Target must be an existing config file. The data it represents \
                      is updated according to the operations and written to stdout.\n\n\
                      Operations:\n\
                      \x20 -s, --set      set new values only\n\
                      \x20 -m, --merge    merge values\n\
                      \x20 -a, --append   concatenate array values (implies -m)\n\
                      \x20 -u, --unique   drop duplicate array values (implies -a)\n\n\
                      The path argument must point to a member of the target data \
                      (e.g. \"/path/to/member\"). If it is omitted, json must be an \
                      object and the operation is applied to the entire target data.\n\n\
                      The json argument must be a JSON string, or a path to a config \
                      file prefixed with an \"@\" sign.",
        after_help = "EXAMPLES:\n\
            \x20 blank update package.json -s /dependencies/eslint '\"^7\"'\n\
            \x20 blank update .eslintrc.json -a /extends '[\"standard\"]'\n\
            \x20 blank update config.yaml -m @base.yaml\n\
            \x20 blank update -o yaml package.json"
    )]
    Update(UpdateArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 blank completions bash > ~/.local/share/bash-completion/completions/blank\n\
            \x20 blank completions zsh  > ~/.zfunc/_blank\n\
            \x20 blank completions fish > ~/.config/fish/completions/blank.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the blank configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 blank config get update.default_output\n\
            \x20 blank config list\n\
            \x20 blank config path"
    )]
    Config(ConfigCommands),

    /// Write a default configuration file.
    #[command(about = "Initialise configuration")]
    Init(InitArgs),

    /// Any other word is a makefile target: `blank rust` is `blank make rust`.
    #[command(external_subcommand)]
    External(Vec<String>),
}

// ── make ──────────────────────────────────────────────────────────────────────

/// Arguments for `blank make`.
#[derive(Debug, Default, Args)]
pub struct MakeArgs {
    /// Makefile target followed by arguments for make.
    ///
    /// The first argument names the makefile when it is neither an option
    /// nor a `VAR=value` assignment.
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "[TARGET] followed by arguments passed to make"
    )]
    pub args: Vec<String>,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `blank update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Read the target as this type instead of guessing from its extension.
    #[arg(short = 'i', long = "in", value_name = "TYPE", value_enum)]
    pub input: Option<FormatArg>,

    /// Output type. Defaults to the input type, then to the configured default.
    #[arg(short = 'o', long = "out", value_name = "TYPE", value_enum)]
    pub output: Option<FormatArg>,

    /// Config file to patch.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Operations: a flag, an optional path and a json argument, repeated.
    #[arg(
        value_name = "OPERATION",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub operations: Vec<String>,
}

/// Config file types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    Json,
    /// Also accepted as `yml`.
    #[value(alias = "yml")]
    Yaml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `blank init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `blank completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `blank config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `update.default_output`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_update_with_operations() {
        let cli = Cli::try_parse_from([
            "blank",
            "update",
            "package.json",
            "-s",
            "/dependencies/eslint",
            "\"^7\"",
            "-au",
            "/extends",
            "[\"standard\"]",
        ])
        .unwrap();

        let Some(Commands::Update(args)) = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(args.target, PathBuf::from("package.json"));
        assert_eq!(
            args.operations,
            ["-s", "/dependencies/eslint", "\"^7\"", "-au", "/extends", "[\"standard\"]"]
        );
    }

    #[test]
    fn update_formats_come_before_target() {
        let cli =
            Cli::try_parse_from(["blank", "update", "-i", "yml", "-o", "json", "c.conf"]).unwrap();

        let Some(Commands::Update(args)) = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(args.input, Some(FormatArg::Yaml));
        assert_eq!(args.output, Some(FormatArg::Json));
        assert!(args.operations.is_empty());
    }

    #[test]
    fn unknown_word_is_a_make_target() {
        let cli = Cli::try_parse_from(["blank", "rust", "name=demo"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::External(ref args)) if args == &["rust", "name=demo"]
        ));
    }

    #[test]
    fn search_flags_are_top_level() {
        let cli = Cli::try_parse_from(["blank", "-a", "one", "-a", "two", "-P", "x", "make"])
            .unwrap();
        assert_eq!(cli.search.add, [PathBuf::from("one"), PathBuf::from("two")]);
        assert_eq!(cli.search.replace.as_deref(), Some("x"));
    }

    #[test]
    fn make_passes_hyphenated_args_through() {
        let cli = Cli::try_parse_from(["blank", "make", "rust", "-j4", "name=x"]).unwrap();
        let Some(Commands::Make(args)) = cli.command else {
            panic!("expected make command");
        };
        assert_eq!(args.args, ["rust", "-j4", "name=x"]);
    }

    #[test]
    fn no_command_is_allowed() {
        let cli = Cli::try_parse_from(["blank"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["blank", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
