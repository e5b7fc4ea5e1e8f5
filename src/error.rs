//! Error taxonomy.
//!
//! Two tiers, mirroring the process exit codes:
//!   CommandError  - recognized business errors (exit 1, `status: "error"`)
//!   everything else carried in an `anyhow::Error` is a fault (exit 2, `status: "fatal"`)
//!
//! `fault_kind` turns a fault chain into the short `error_type` tag the frontend sees.

use std::path::PathBuf;

use thiserror::Error;

use crate::dispatch::Action;

/// Errors the caller can fix by changing its request.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("file path must not be empty")]
    EmptyFilePath,

    #[error("cannot derive an output file name from '{}'", .0.display())]
    InvalidFilePath(PathBuf),

    #[error("invalid options for '{action}': {source}")]
    InvalidOptions {
        action: Action,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while assembling the options bundle. Always fatal.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("malformed options JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("options must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("failed to read params file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON params file '{}': {source}", path.display())]
    MalformedFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed YAML params file '{}': {source}", path.display())]
    MalformedYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Find the business error in an error chain, if there is one.
pub fn as_command_error(err: &anyhow::Error) -> Option<&CommandError> {
    err.chain().find_map(|e| e.downcast_ref::<CommandError>())
}

/// Classify a fault for the `error_type` field of a fatal record.
pub fn fault_kind(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if cause.is::<OptionsError>() {
            return "MalformedOptions";
        }
        if cause.is::<std::io::Error>() {
            return "IoError";
        }
        if cause.is::<serde_json::Error>() {
            return "SerializationError";
        }
    }
    "InternalError"
}
