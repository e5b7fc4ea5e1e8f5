//! Runtime settings resolved once per process.
//!
//! Precedence: `--delay-ms` flag > `CAD_AUTOMATOR_DELAY_MS` env > per-operation default.

use std::time::Duration;

use tracing::warn;

pub const DELAY_ENV: &str = "CAD_AUTOMATOR_DELAY_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Replaces every operation's simulated processing delay when set.
    pub delay_override: Option<Duration>,
}

impl Settings {
    pub fn resolve(delay_flag: Option<u64>) -> Self {
        let env = std::env::var(DELAY_ENV).ok();
        Self::from_sources(delay_flag, env.as_deref())
    }

    fn from_sources(delay_flag: Option<u64>, env: Option<&str>) -> Self {
        let delay_ms = delay_flag.or_else(|| {
            let raw = env.map(str::trim).filter(|s| !s.is_empty())?;
            match raw.parse::<u64>() {
                Ok(ms) => Some(ms),
                Err(e) => {
                    warn!("ignoring {DELAY_ENV}={raw:?}: {e}");
                    None
                }
            }
        });
        Settings {
            delay_override: delay_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env() {
        let s = Settings::from_sources(Some(5), Some("900"));
        assert_eq!(s.delay_override, Some(Duration::from_millis(5)));
    }

    #[test]
    fn env_used_without_flag() {
        let s = Settings::from_sources(None, Some(" 0 "));
        assert_eq!(s.delay_override, Some(Duration::ZERO));
    }

    #[test]
    fn blank_or_garbage_env_ignored() {
        assert_eq!(Settings::from_sources(None, Some("   ")), Settings::default());
        assert_eq!(Settings::from_sources(None, Some("fast")), Settings::default());
        assert_eq!(Settings::from_sources(None, None), Settings::default());
    }
}
