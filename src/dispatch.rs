/*!
Command dispatch: `Action` (closed set of registered commands) and the
`Dispatcher` that turns a command name into a ready-to-run processor.

Registered actions:
  smart_clean  - SmartCleaner
  layer_merge  - LayerMerger
  flatten      - Flattener
  explode      - Exploder

The dispatcher is the only place that validates a command name. Processors
never re-check which action they were resolved for.
*/

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::CommandError;
use crate::processor::CadProcessor;
use crate::processor::cleaner::SmartCleaner;
use crate::processor::exploder::Exploder;
use crate::processor::flattener::Flattener;
use crate::processor::merger::LayerMerger;

/// Every command the backend understands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Purge unreferenced blocks, empty entities and overlapping geometry
    SmartClean,
    /// Merge layers matching a pattern into one target layer
    LayerMerge,
    /// Force all geometry onto the Z = 0 plane
    Flatten,
    /// Mark block references for explosion
    Explode,
}

impl Action {
    /// All variants, in the order `list` shows them.
    pub const fn variants() -> &'static [Action] {
        &[
            Action::SmartClean,
            Action::LayerMerge,
            Action::Flatten,
            Action::Explode,
        ]
    }

    /// Wire name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::SmartClean => "smart_clean",
            Action::LayerMerge => "layer_merge",
            Action::Flatten => "flatten",
            Action::Explode => "explode",
        }
    }

    /// Exact lookup by wire name. No trimming, no case folding.
    pub fn from_wire(s: &str) -> Option<Self> {
        Action::variants().iter().copied().find(|a| a.as_str() == s)
    }
}

impl FromStr for Action {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_wire(s).ok_or_else(|| CommandError::UnknownCommand(s.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves command names to processors.
///
/// Holds only the delay override from [`Settings`]; every resolution builds a
/// fresh, stateless processor.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    delay_override: Option<Duration>,
}

impl Dispatcher {
    pub fn new(settings: &Settings) -> Self {
        Self {
            delay_override: settings.delay_override,
        }
    }

    /// Resolve a raw command name. Fails with [`CommandError::UnknownCommand`]
    /// for anything outside the registry.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn CadProcessor>, CommandError> {
        let action: Action = name.parse()?;
        debug!(command = name, %action, "resolved command");
        Ok(self.resolve_action(action))
    }

    pub fn resolve_action(&self, action: Action) -> Box<dyn CadProcessor> {
        let delay = self.delay_override;
        match action {
            Action::SmartClean => Box::new(SmartCleaner::new(delay)),
            Action::LayerMerge => Box::new(LayerMerger::new(delay)),
            Action::Flatten => Box::new(Flattener::new(delay)),
            Action::Explode => Box::new(Exploder::new(delay)),
        }
    }

    /// One processor per registered action.
    pub fn registry(&self) -> Vec<Box<dyn CadProcessor>> {
        Action::variants()
            .iter()
            .map(|a| self.resolve_action(*a))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_resolves() {
        let d = Dispatcher::default();
        for action in Action::variants() {
            let p = d.resolve(action.as_str()).unwrap();
            assert_eq!(p.action(), *action);
        }
    }

    #[test]
    fn unregistered_names_fail() {
        let d = Dispatcher::default();
        for name in ["unknown_op", "", "smart-clean", "layer merge"] {
            match d.resolve(name) {
                Err(CommandError::UnknownCommand(n)) => assert_eq!(n, name),
                other => panic!("expected UnknownCommand for {name:?}, got {:?}", other.map(|p| p.action())),
            }
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Action::from_wire("smart_clean"), Some(Action::SmartClean));
        let d = Dispatcher::default();
        for name in ["SMART_CLEAN", " smart_clean ", "Layer_Merge", "explodes"] {
            assert!(
                matches!(d.resolve(name), Err(CommandError::UnknownCommand(n)) if n == name),
                "{name:?} should be unknown"
            );
        }
    }

    #[test]
    fn resolving_twice_gives_same_contract() {
        let d = Dispatcher::default();
        let a = d.resolve("layer_merge").unwrap();
        let b = d.resolve("layer_merge").unwrap();
        assert_eq!(a.action(), b.action());
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn registry_covers_every_action() {
        let names: Vec<_> = Dispatcher::default()
            .registry()
            .iter()
            .map(|p| p.action().as_str())
            .collect();
        assert_eq!(names, ["smart_clean", "layer_merge", "flatten", "explode"]);
    }

    #[test]
    fn display_and_serialize_agree() {
        for action in Action::variants() {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json, serde_json::json!(action.to_string()));
        }
    }
}
