//! `blank make`: run make with a makefile found on the search path.
//!
//! `blank rust name=demo` becomes
//!
//! ```text
//! make -s -f <dir>/rust.mk --include-dir=<dir>... VPATH=<dirs> name=demo
//! ```
//!
//! with `BLANK` and `BLANK_PATH` exported so the makefile can call back
//! into `blank update`.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitCode};

use blank_adapters::{LocalFilesystem, find_makefile};
use blank_core::{
    application::FileReader,
    domain::{BLANK_PATH, SearchPath},
};
use tracing::{debug, info, instrument};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Name of the variable pointing makefiles back at this executable.
pub const BLANK: &str = "BLANK";

/// A fully resolved make command line.
#[derive(Debug, Clone, PartialEq)]
pub struct MakeInvocation {
    program: String,
    makefile: Option<PathBuf>,
    search: SearchPath,
    args: Vec<String>,
}

/// The makefile target, when the first argument names one.
///
/// Options (`-j4`) and variable assignments (`name=x`) are not targets.
fn split_target(args: &[String]) -> (Option<&str>, &[String]) {
    match args.split_first() {
        Some((first, rest)) if !first.starts_with('-') && !first.contains('=') => {
            (Some(first.as_str()), rest)
        }
        _ => (None, args),
    }
}

impl MakeInvocation {
    /// Resolve `args` against `search`.
    ///
    /// Fails when the first argument names a target with no makefile on
    /// the search path.
    pub fn resolve(
        program: impl Into<String>,
        search: &SearchPath,
        args: &[String],
        reader: &dyn FileReader,
    ) -> CliResult<Self> {
        let (target, rest) = split_target(args);

        let makefile = match target {
            Some(target) => Some(find_makefile(reader, search, target).ok_or_else(|| {
                CliError::MakefileNotFound {
                    target: target.to_owned(),
                    search: search.dirs().to_vec(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            program: program.into(),
            makefile,
            search: search.clone(),
            args: rest.to_vec(),
        })
    }

    pub fn makefile(&self) -> Option<&PathBuf> {
        self.makefile.as_ref()
    }

    /// Arguments passed to make, in order.
    pub fn get_args(&self) -> CliResult<Vec<OsString>> {
        let mut args: Vec<OsString> = vec!["-s".into()];

        if let Some(makefile) = &self.makefile {
            args.push("-f".into());
            args.push(makefile.into());
        }

        for dir in self.search.iter() {
            let mut include = OsString::from("--include-dir=");
            include.push(dir);
            args.push(include);
        }

        if !self.search.is_empty() {
            let mut vpath = OsString::from("VPATH=");
            vpath.push(self.joined_search()?);
            args.push(vpath);
        }

        args.extend(self.args.iter().map(OsString::from));
        Ok(args)
    }

    /// Variables exported to make.
    pub fn get_envs(&self) -> CliResult<Vec<(&'static str, OsString)>> {
        let exe = std::env::current_exe()
            .map(PathBuf::into_os_string)
            .ok()
            .or_else(|| std::env::args_os().next())
            .unwrap_or_else(|| OsString::from("blank"));

        Ok(vec![(BLANK, exe), (BLANK_PATH, self.joined_search()?)])
    }

    pub fn command(&self) -> CliResult<Command> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.get_args()?);
        cmd.envs(self.get_envs()?);
        Ok(cmd)
    }

    fn joined_search(&self) -> CliResult<OsString> {
        self.search
            .join_env_value()
            .map_err(|e| CliError::Core(e.into()))
    }

    /// Replace this process with make.
    ///
    /// Only returns if make could not be started.
    #[cfg(unix)]
    pub fn run(self) -> CliResult<ExitCode> {
        use std::os::unix::process::CommandExt as _;

        let err = self.command()?.exec();
        Err(self.spawn_failed(err))
    }

    /// Run make as a child and pass its exit status through.
    #[cfg(not(unix))]
    pub fn run(self) -> CliResult<ExitCode> {
        let status = self
            .command()?
            .status()
            .map_err(|e| self.spawn_failed(e))?;

        Ok(status
            .code()
            .and_then(|c| u8::try_from(c).ok())
            .map_or(ExitCode::FAILURE, ExitCode::from))
    }

    fn spawn_failed(&self, err: std::io::Error) -> CliError {
        CliError::ExternalCommandFailed {
            command: self.program.clone(),
            source: Some(Box::new(err)),
        }
    }
}

#[instrument(skip_all, fields(args = args.len()))]
pub fn execute(args: &[String], search: &SearchPath, config: &AppConfig) -> CliResult<ExitCode> {
    let invocation =
        MakeInvocation::resolve(&config.make.program, search, args, &LocalFilesystem::new())?;

    match invocation.makefile() {
        Some(makefile) => info!(makefile = %makefile.display(), "Running make"),
        None => info!("Running make without a makefile target"),
    }
    debug!(args = ?invocation.get_args()?, "make command line");

    invocation.run()
}
