//! `flatten`: force every entity onto the Z = 0 plane.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{
    CadProcessor, OperationOptions, Outcome, decode_options, derive_output_path, ensure_file_path,
    output_dir, simulate_work,
};
use crate::dispatch::Action;

const SUFFIX: &str = "_flattened";
const DEFAULT_DELAY: Duration = Duration::from_millis(500);
const PLACEHOLDER_FLATTENED: u32 = 18;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlattenOptions {
    pub output_path: Option<PathBuf>,
}

pub struct Flattener {
    delay: Duration,
}

impl Flattener {
    pub fn new(delay_override: Option<Duration>) -> Self {
        Self {
            delay: delay_override.unwrap_or(DEFAULT_DELAY),
        }
    }
}

impl CadProcessor for Flattener {
    fn action(&self) -> Action {
        Action::Flatten
    }

    fn name(&self) -> &'static str {
        "Flattener"
    }

    fn output_suffix(&self) -> &'static str {
        SUFFIX
    }

    fn execute(&self, file_path: &Path, options: &OperationOptions) -> Result<Outcome> {
        ensure_file_path(file_path)?;
        let opts: FlattenOptions = decode_options(self.action(), options)?;
        let output = derive_output_path(file_path, SUFFIX, output_dir(opts.output_path.as_deref()))?;

        info!(file = %file_path.display(), "flattening drawing to Z=0");
        simulate_work(self.delay);

        Ok(Outcome::new(self.action(), output)
            .with("message", "Flatten complete (all entities on Z=0)")?
            .with("report", json!({ "flattened_entities": PLACEHOLDER_FLATTENED }))?)
    }
}
