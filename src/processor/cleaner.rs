//! `smart_clean`: purge unreferenced blocks, empty entities and duplicate /
//! overlapping geometry.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{
    CadProcessor, OperationOptions, Outcome, decode_options, derive_output_path, ensure_file_path,
    output_dir, simulate_work,
};
use crate::dispatch::Action;

const SUFFIX: &str = "_cleaned";
const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanOptions {
    /// Directory for the cleaned file (empty / absent: beside the input)
    pub output_path: Option<PathBuf>,
}

/// What a clean pass removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub deleted_lines: u32,
    pub purged_blocks: u32,
    pub removed_layers: Vec<String>,
}

impl CleanReport {
    // Placeholder figures; no drawing is inspected yet.
    fn placeholder() -> Self {
        Self {
            deleted_lines: 24,
            purged_blocks: 3,
            removed_layers: vec!["Temp".into(), "Defpoints".into()],
        }
    }
}

pub struct SmartCleaner {
    delay: Duration,
}

impl SmartCleaner {
    pub fn new(delay_override: Option<Duration>) -> Self {
        Self {
            delay: delay_override.unwrap_or(DEFAULT_DELAY),
        }
    }
}

impl CadProcessor for SmartCleaner {
    fn action(&self) -> Action {
        Action::SmartClean
    }

    fn name(&self) -> &'static str {
        "Smart Cleaner"
    }

    fn output_suffix(&self) -> &'static str {
        SUFFIX
    }

    fn execute(&self, file_path: &Path, options: &OperationOptions) -> Result<Outcome> {
        ensure_file_path(file_path)?;
        let opts: CleanOptions = decode_options(self.action(), options)?;
        let output = derive_output_path(file_path, SUFFIX, output_dir(opts.output_path.as_deref()))?;

        info!(file = %file_path.display(), "cleaning drawing");
        simulate_work(self.delay);

        Ok(Outcome::new(self.action(), output)
            .with("message", "Clean complete")?
            .with("original_file", file_path)?
            .with("report", CleanReport::placeholder())?)
    }
}
