//! `blank update`: patch a config file and print the result.

use blank_adapters::{LocalFilesystem, SerdeCodec};
use blank_core::{application::UpdateService, domain::Format};
use tracing::{debug, instrument};

use crate::{
    cli::{UpdateArgs, operations::parse_operations},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(target = %args.target.display()))]
pub fn execute(args: UpdateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let specs = parse_operations(&args.operations)?;

    let input = args.input.map(Format::from);
    let format = output_format(args.output.map(Format::from), input, config);
    debug!(operations = specs.len(), %format, "Running update");

    let service = UpdateService::new(
        Box::new(SerdeCodec::new()),
        Box::new(LocalFilesystem::new()),
    );
    let bytes = service.run(&args.target, input, Some(format), &specs)?;

    output.emit(&bytes)?;
    Ok(())
}

/// `-o`, else `-i`, else the configured default.
fn output_format(output: Option<Format>, input: Option<Format>, config: &AppConfig) -> Format {
    output.or(input).unwrap_or(config.update.default_output)
}
