//! `layer_merge`: move every layer matching `source_pattern` into `target_layer`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tracing::info;

use super::{
    CadProcessor, OperationOptions, Outcome, decode_options, derive_output_path, ensure_file_path,
    output_dir, simulate_work,
};
use crate::dispatch::Action;

const SUFFIX: &str = "_merged";
const DEFAULT_DELAY: Duration = Duration::from_millis(500);
const PLACEHOLDER_MERGED_LAYERS: u32 = 5;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    /// Layer receiving the merged entities
    pub target_layer: String,
    /// Wildcard selecting source layers
    pub source_pattern: String,
    pub output_path: Option<PathBuf>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            target_layer: "0".to_string(),
            source_pattern: "*".to_string(),
            output_path: None,
        }
    }
}

pub struct LayerMerger {
    delay: Duration,
}

impl LayerMerger {
    pub fn new(delay_override: Option<Duration>) -> Self {
        Self {
            delay: delay_override.unwrap_or(DEFAULT_DELAY),
        }
    }
}

impl CadProcessor for LayerMerger {
    fn action(&self) -> Action {
        Action::LayerMerge
    }

    fn name(&self) -> &'static str {
        "Layer Merger"
    }

    fn output_suffix(&self) -> &'static str {
        SUFFIX
    }

    fn execute(&self, file_path: &Path, options: &OperationOptions) -> Result<Outcome> {
        ensure_file_path(file_path)?;
        let opts: MergeOptions = decode_options(self.action(), options)?;
        let output = derive_output_path(file_path, SUFFIX, output_dir(opts.output_path.as_deref()))?;

        info!(
            file = %file_path.display(),
            "merging layers matching '{}' into '{}'", opts.source_pattern, opts.target_layer
        );
        simulate_work(self.delay);

        let details = format!(
            "Merged {PLACEHOLDER_MERGED_LAYERS} layers into {}",
            opts.target_layer
        );
        Ok(Outcome::new(self.action(), output)
            .with("message", "Layer merge complete")?
            .with("target_layer", &opts.target_layer)?
            .with("source_pattern", &opts.source_pattern)?
            .with("details", details)?)
    }
}
