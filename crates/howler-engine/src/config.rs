//! Engine tuning knobs, loadable from a TOML file.
//!
//! Every timeout has a default calibrated against the live game's pacing;
//! the file only needs the keys it wants to override.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Main loop cadence.
    pub poll_interval_ms: u64,
    /// Re-snapshot cadence inside a blocking wait.
    pub wait_interval_ms: u64,
    /// How long to wait for a per-target action icon after arming an ability.
    pub ability_timeout_ms: u64,
    /// How long the wolf kill prompt is waited for at nightfall.
    pub night_prompt_timeout_ms: u64,
    /// How long a voting sub-phase is allowed to run.
    pub vote_phase_timeout_ms: u64,
    /// How long matchmaking may search before the attempt is abandoned.
    pub matchmaking_timeout_ms: u64,
    /// Continuous lobby residence beyond this triggers a page reload.
    pub lobby_dwell_ceiling_ms: u64,
    /// Attempts for a click that must visibly take effect before giving up.
    pub click_retry_limit: u32,
    /// Pause after a phase-changing action, letting the page re-render.
    pub settle_delay_ms: u64,
    /// Upper bound of the randomized pre-action pause.
    pub click_jitter_ms: u64,
    /// Most ability markers a shooter scan will place in one night.
    pub shooter_marker_cap: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 3_000,
            wait_interval_ms: 500,
            ability_timeout_ms: 15_000,
            night_prompt_timeout_ms: 20_000,
            vote_phase_timeout_ms: 30_000,
            matchmaking_timeout_ms: 120_000,
            lobby_dwell_ceiling_ms: 120_000,
            click_retry_limit: 3,
            settle_delay_ms: 1_500,
            click_jitter_ms: 250,
            shooter_marker_cap: 4,
        }
    }
}

impl BotConfig {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| EngineError::Config(e.to_string()))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn wait_interval(&self) -> Duration {
        Duration::from_millis(self.wait_interval_ms)
    }

    pub fn ability_timeout(&self) -> Duration {
        Duration::from_millis(self.ability_timeout_ms)
    }

    pub fn night_prompt_timeout(&self) -> Duration {
        Duration::from_millis(self.night_prompt_timeout_ms)
    }

    pub fn vote_phase_timeout(&self) -> Duration {
        Duration::from_millis(self.vote_phase_timeout_ms)
    }

    pub fn matchmaking_timeout(&self) -> Duration {
        Duration::from_millis(self.matchmaking_timeout_ms)
    }

    pub fn lobby_dwell_ceiling(&self) -> Duration {
        Duration::from_millis(self.lobby_dwell_ceiling_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let c = BotConfig::default();
        assert_eq!(c.poll_interval(), Duration::from_secs(3));
        assert_eq!(c.click_retry_limit, 3);
        assert_eq!(c.shooter_marker_cap, 4);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "poll_interval_ms = 1000\nclick_retry_limit = 5").unwrap();
        let c = BotConfig::load(f.path()).unwrap();
        assert_eq!(c.poll_interval_ms, 1_000);
        assert_eq!(c.click_retry_limit, 5);
        assert_eq!(c.wait_interval_ms, 500);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "poll_interval_ms = \"soon\"").unwrap();
        assert!(matches!(
            BotConfig::load(f.path()),
            Err(EngineError::Config(_))
        ));
    }
}
