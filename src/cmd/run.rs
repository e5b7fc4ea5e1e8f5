/*!
`run.rs`

Implements the `run` subcommand: the frontend-facing entry point.

  cad-automator run --action <NAME> --file <PATH> [--params <JSON>] [--params-file <PATH>]

Flow:
  1. resolve the action through the `Dispatcher`
  2. load options (inline JSON over params file)
  3. execute the processor
  4. wrap the outcome in a `ResultRecord` and write it to stdout

Exactly one JSON object is written per invocation, whatever happens. The
returned code is the process exit code (0 success, 1 error, 2 fatal).
*/

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use clap::builder::{OsStringValueParser, TypedValueParser};
use tracing::debug;

use crate::cmd::options::load_options;
use crate::dispatch::Dispatcher;
use crate::processor::Outcome;
use crate::record::ResultRecord;

/// CLI arguments for `cad-automator run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Action key (e.g. smart_clean, layer_merge)
    #[arg(short = 'a', long, value_name = "NAME")]
    pub action: String,

    /// Path to the input CAD file
    // Empty values pass through so the processor reports them as a business error.
    #[arg(
        short = 'f',
        long,
        value_name = "PATH",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub file: PathBuf,

    /// JSON object of operation options
    #[arg(short = 'p', long, value_name = "JSON")]
    pub params: Option<String>,

    /// Load options from a JSON or YAML file. --params overrides its keys
    #[arg(long = "params-file", value_name = "PATH")]
    pub params_file: Option<PathBuf>,
}

/// Entry point for the run subcommand.
pub fn execute_run(args: RunArgs, dispatcher: &Dispatcher) -> u8 {
    let record = ResultRecord::from_outcome(invoke(&args, dispatcher));
    debug!(status = record.status(), "run finished");
    record.emit()
}

/// Everything that can fail, in order. Errors bubble up unchanged so the
/// envelope can classify them.
pub fn invoke(args: &RunArgs, dispatcher: &Dispatcher) -> Result<Outcome> {
    let processor = dispatcher.resolve(&args.action)?;
    let options = load_options(args.params.as_deref(), args.params_file.as_deref())?;
    debug!(processor = processor.name(), options = options.len(), "executing");
    processor.execute(&args.file, &options)
}
