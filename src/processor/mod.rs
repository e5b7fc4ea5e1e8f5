/*!
Processors: one implementation of [`CadProcessor`] per registered action.

Shared pieces used by every processor:
  - OperationOptions      raw JSON object handed over by the caller
  - decode_options        typed, per-processor view of that object
  - derive_output_path    `<stem><suffix>.<ext>` next to the input (or in `output_path`)
  - simulate_work         stand-in for the CAD read / write cycle
  - Outcome               success payload wrapped by `ResultRecord::Success`

No processor touches the filesystem yet; the figures they report are fixed
placeholders until a DXF backend is wired in.
*/

pub mod cleaner;
pub mod exploder;
pub mod flattener;
pub mod merger;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::dispatch::Action;
use crate::error::CommandError;

/// Options bundle exactly as the caller sent it.
pub type OperationOptions = serde_json::Map<String, serde_json::Value>;

/// A single CAD transformation.
pub trait CadProcessor {
    /// Action this processor was registered under.
    fn action(&self) -> Action;

    /// Human-readable name (for `list` and logs).
    fn name(&self) -> &'static str;

    /// Suffix inserted before the extension of the output file.
    fn output_suffix(&self) -> &'static str;

    /// Run the operation against `file_path`.
    ///
    /// Business errors are returned as [`CommandError`] inside the `anyhow::Error`;
    /// anything else is treated as a fault by the caller.
    fn execute(&self, file_path: &Path, options: &OperationOptions) -> Result<Outcome>;
}

/* ---- Outcome ---- */

/// Successful result of one processor run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub action: Action,
    pub output_file: PathBuf,
    /// Processor-specific fields, flattened next to `action` / `output_file`.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Outcome {
    pub fn new(action: Action, output_file: PathBuf) -> Self {
        Self {
            action,
            output_file,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra payload field.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, serde_json::Error> {
        let v = serde_json::to_value(value)?;
        self.extra.insert(key.to_string(), v);
        Ok(self)
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/* ---- Shared helpers ---- */

/// Reject an empty input path. Existence is not checked.
pub fn ensure_file_path(file_path: &Path) -> Result<(), CommandError> {
    if file_path.as_os_str().is_empty() {
        return Err(CommandError::EmptyFilePath);
    }
    Ok(())
}

/// Decode the raw options into a processor's typed options struct.
pub fn decode_options<T: DeserializeOwned>(
    action: Action,
    options: &OperationOptions,
) -> Result<T, CommandError> {
    serde_json::from_value(serde_json::Value::Object(options.clone()))
        .map_err(|source| CommandError::InvalidOptions { action, source })
}

/// `output_path` as sent by the frontend: an empty string means "next to the input".
pub fn output_dir(configured: Option<&Path>) -> Option<&Path> {
    configured.filter(|p| !p.as_os_str().is_empty())
}

/// Build the output path for `input`: `<stem><suffix>[.<ext>]`, placed in
/// `output_dir` when given, otherwise beside the input.
pub fn derive_output_path(
    input: &Path,
    suffix: &str,
    output_dir: Option<&Path>,
) -> Result<PathBuf, CommandError> {
    let mut stem = input
        .file_stem()
        .ok_or_else(|| CommandError::InvalidFilePath(input.to_path_buf()))?;
    let mut ext = input.extension();

    // `.dxf` is all extension: empty stem, so it becomes `_cleaned.dxf`.
    if ext.is_none()
        && let Some(rest) = stem.to_str().and_then(|s| s.strip_prefix('.'))
        && !rest.is_empty()
    {
        ext = Some(OsStr::new(rest));
        stem = OsStr::new("");
    }

    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = ext {
        name.push(".");
        name.push(ext);
    }

    Ok(match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    })
}

/// Block for `delay` in place of real CAD work.
pub fn simulate_work(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    trace!(delay_ms = delay.as_millis() as u64, "simulating processing delay");
    std::thread::sleep(delay);
}
