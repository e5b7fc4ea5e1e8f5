//! `explode`: mark block references for explosion by moving them onto a
//! dedicated marker layer.

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

const SUFFIX: &str = "_marked";
const DEFAULT_DELAY: Duration = Duration::from_millis(500);
pub const MARKER_LAYER: &str = "BLOCKS_TO_EXPLODE";
const PLACEHOLDER_INSERTS: u32 = 7;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplodeOptions {
    pub output_path: Option<PathBuf>,
}

pub struct Exploder {
    delay: Duration,
}

impl Exploder {
    pub fn new(delay_override: Option<Duration>) -> Self {
        Self {
            delay: delay_override.unwrap_or(DEFAULT_DELAY),
        }
    }
}

impl CadProcessor for Exploder {
    fn action(&self) -> Action {
        Action::Explode
    }

    fn name(&self) -> &'static str {
        "Exploder"
    }

    fn output_suffix(&self) -> &'static str {
        SUFFIX
    }

    fn execute(&self, file_path: &Path, options: &OperationOptions) -> Result<Outcome> {
        ensure_file_path(file_path)?;
        let opts: ExplodeOptions = decode_options(self.action(), options)?;
        let output = derive_output_path(file_path, SUFFIX, output_dir(opts.output_path.as_deref()))?;

        info!(file = %file_path.display(), "marking block references on {MARKER_LAYER}");
        simulate_work(self.delay);

        Ok(Outcome::new(self.action(), output)
            .with(
                "message",
                format!("Marked {PLACEHOLDER_INSERTS} block references on {MARKER_LAYER}"),
            )?
            .with(
                "report",
                json!({
                    "marked_inserts": PLACEHOLDER_INSERTS,
                    "marker_layer": MARKER_LAYER,
                }),
            )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explode_marks_inserts() {
        let out = Exploder::new(Some(Duration::ZERO))
            .execute(Path::new("C:/Projects/Arch.dxf"), &OperationOptions::new())
            .unwrap();
        assert_eq!(out.output_file, PathBuf::from("C:/Projects/Arch_marked.dxf"));
        assert_eq!(
            out.get("report"),
            Some(&json!({"marked_inserts": 7, "marker_layer": "BLOCKS_TO_EXPLODE"}))
        );
        assert_eq!(
            out.get("message"),
            Some(&json!("Marked 7 block references on BLOCKS_TO_EXPLODE"))
        );
    }
}
