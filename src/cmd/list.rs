/*!
`list.rs`

Implements the `list` subcommand: enumerate the registered actions.

JSON Output Shape (--json):
{
  "status": "success",
  "count": 4,
  "actions": [
    { "name": "smart_clean", "title": "Smart Cleaner", "output_suffix": "_cleaned" },
    ...
  ]
}
*/

use anyhow::{Context, Result};
use clap::Args;

use crate::dispatch::Dispatcher;

/// CLI arguments for `cad-automator list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the list subcommand.
pub fn execute_list(args: ListArgs, dispatcher: &Dispatcher) -> Result<()> {
    let text = render(&args, dispatcher)?;
    println!("{text}");
    Ok(())
}

fn render(args: &ListArgs, dispatcher: &Dispatcher) -> Result<String> {
    let registry = dispatcher.registry();

    if args.json {
        let items: Vec<_> = registry
            .iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.action(),
                    "title": p.name(),
                    "output_suffix": p.output_suffix(),
                })
            })
            .collect();
        let doc = serde_json::json!({
            "status": "success",
            "count": items.len(),
            "actions": items,
        });
        return serde_json::to_string(&doc).context("failed to serialize action list");
    }

    let width = registry
        .iter()
        .map(|p| p.action().as_str().len())
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!("Actions ({})", registry.len())];
    for p in &registry {
        lines.push(format!(
            "  {:<width$}  {} (output: <name>{}.<ext>)",
            p.action().as_str(),
            p.name(),
            p.output_suffix(),
        ));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_lists_every_action() {
        let out = render(&ListArgs { json: true }, &Dispatcher::default()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["status"], "success");
        assert_eq!(v["count"], 4);
        assert_eq!(v["actions"][1]["name"], "layer_merge");
        assert_eq!(v["actions"][1]["output_suffix"], "_merged");
    }

    #[test]
    fn text_output_has_header_and_rows() {
        let out = render(&ListArgs { json: false }, &Dispatcher::default()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Actions (4)");
        assert!(lines[1].contains("smart_clean") && lines[1].contains("Smart Cleaner"));
        assert_eq!(lines.len(), 5);
    }
}
