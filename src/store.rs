//! Persisted preferences.
//!
//! A small JSON file under the home directory holding the running flag and
//! the operating player's name. Read once at startup so a restarted process
//! resumes in the state it was left in; rewritten on every control toggle.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Preferences {
    pub running: bool,
    pub name: String,
}

/// Default store location: `~/.howler/prefs.json`.
pub(crate) fn default_path() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".howler").join("prefs.json"))
        .unwrap_or_else(|| PathBuf::from(".howler-prefs.json"))
}

/// Load preferences. A missing or unreadable file yields the defaults; a
/// malformed one is logged and ignored rather than failing startup.
pub(crate) fn load(path: &Path) -> Preferences {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Preferences::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(prefs) => prefs,
        Err(e) => {
            warn!("ignoring malformed preference file: {}", e);
            Preferences::default()
        }
    }
}

pub(crate) fn save(path: &Path, prefs: &Preferences) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(prefs)?)?;
    Ok(())
}
