use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod cmd;
mod config;
mod dispatch;
mod error;
mod processor;
mod record;
mod utils;

use cmd::{ListArgs, RunArgs};
use config::Settings;
use dispatch::Dispatcher;
use record::{EXIT_FATAL, ResultRecord};

/// CAD Automator - headless CAD processing backend
///
/// Command layout:
///   cad-automator run  --action <NAME> --file <PATH> [--params <JSON>] [--params-file <PATH>]
///   cad-automator list [--json]
///
/// Protocol (run):
///   stdout      exactly one JSON object: {"status":"success"|"error"|"fatal", ...}
///   exit code   0 success, 1 recognized error (e.g. unknown action), 2 internal fault
///   stderr      logs only
///
/// Global flags / env:
///   -v / -vv                 Increase verbosity
///   -q / --quiet             Errors only
///   --delay-ms MS            Simulated processing delay for every action
///   CAD_AUTOMATOR_DELAY_MS   Environment fallback for --delay-ms
///   RUST_LOG                 Overrides the log filter
///
/// Actions:
///   smart_clean  layer_merge  flatten  explode
///
/// Examples:
///   cad-automator run --action smart_clean --file /tmp/drawing.dxf
///   cad-automator run --action layer_merge --file /tmp/drawing.dxf --params '{"target_layer":"WALLS"}'
///   cad-automator list --json
#[derive(Parser, Debug)]
#[command(
    name = "cad-automator",
    version,
    author,
    about = "CAD Automator - headless CAD processing backend speaking JSON over stdout",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Simulated processing delay in milliseconds (overrides per-action defaults)
    #[arg(long = "delay-ms", global = true, value_name = "MS")]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one action against one file and print a JSON result
    Run(RunArgs),

    /// List registered actions
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => return ExitCode::from(usage_error(&e).emit()),
    };

    utils::init_logging(utils::derive_level(cli.verbose, cli.quiet));

    let settings = Settings::resolve(cli.delay_ms);
    let dispatcher = Dispatcher::new(&settings);

    match cli.command {
        Commands::Run(args) => ExitCode::from(cmd::execute_run(args, &dispatcher)),
        Commands::List(args) => match cmd::execute_list(args, &dispatcher) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{e:#}");
                ExitCode::from(EXIT_FATAL)
            }
        },
    }
}

/// Argument errors still honour the one-JSON-object contract.
fn usage_error(e: &clap::Error) -> ResultRecord {
    let rendered = e.to_string();
    let message = rendered
        .lines()
        .take_while(|l| !l.starts_with("Usage:"))
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("For more information"))
        .collect::<Vec<_>>()
        .join(" ");
    let message = message.trim_start_matches("error:").trim();
    if message.is_empty() {
        return ResultRecord::fatal("UsageError", "invalid arguments");
    }
    ResultRecord::fatal("UsageError", message)
}
