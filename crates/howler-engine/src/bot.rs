//! The loop controller: owns the running flag, the operating name and the
//! lobby dwell clock, and drives one classification-dispatch cycle per tick.
//!
//! One logical actor, no overlapping iterations: the next cycle is only
//! scheduled after the current one settles, success or error. A bad cycle is
//! logged and the loop carries on; nothing short of a stop request ends it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use howler_dom::Page;

use crate::config::BotConfig;
use crate::error::EngineError;
use crate::phase::{self, GamePhase};
use crate::policy;

/// Tracks continuous residence in the lobby. Crossing the ceiling fires
/// once per crossing; the clock restarts after each fire so a lobby that
/// stays stuck fires again a full ceiling later, not every cycle.
#[derive(Debug, Default)]
pub struct LobbyDwell {
    entered: Option<Instant>,
}

impl LobbyDwell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock. Returns true when the ceiling was just crossed.
    pub fn update(&mut self, now: Instant, in_lobby: bool, ceiling: Duration) -> bool {
        if !in_lobby {
            self.entered = None;
            return false;
        }
        match self.entered {
            None => {
                self.entered = Some(now);
                false
            }
            Some(since) if now.duration_since(since) >= ceiling => {
                self.entered = Some(now);
                true
            }
            Some(_) => false,
        }
    }
}

/// Externally visible controller state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotStatus {
    pub enabled: bool,
    pub name: String,
}

/// Owns the lifecycle state the loop consults each cycle. Constructed once
/// per session; the control surface flips `enabled` and rewrites `name`
/// while the loop runs.
pub struct BotController {
    page: Arc<dyn Page>,
    cfg: BotConfig,
    enabled: AtomicBool,
    stopped: AtomicBool,
    name: RwLock<String>,
}

impl BotController {
    pub fn new(page: Arc<dyn Page>, cfg: BotConfig, name: &str) -> Self {
        Self {
            page,
            cfg,
            enabled: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            name: RwLock::new(name.to_string()),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        info!(enabled, "controller toggled");
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_name(&self, name: &str) {
        *self.name.write() = name.to_string();
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    /// Request the loop to end at its next boundary. An in-flight cycle
    /// finishes first; clicks cannot be aborted mid-flight.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn status(&self) -> BotStatus {
        BotStatus {
            enabled: self.is_enabled(),
            name: self.name(),
        }
    }

    /// Drive the loop until [`stop`](Self::stop) is called.
    pub async fn run(&self) {
        info!("control loop started");
        let mut dwell = LobbyDwell::new();
        while !self.stopped.load(Ordering::Relaxed) {
            if self.is_enabled() {
                if let Err(e) = self.cycle(&mut dwell).await {
                    error!("cycle failed: {}", e);
                }
            }
            tokio::time::sleep(self.cfg.poll_interval()).await;
        }
        info!("control loop stopped");
    }

    /// One cycle: classify the page from a fresh snapshot and dispatch to
    /// the phase's handler. Nothing is carried over from previous cycles.
    async fn cycle(&self, dwell: &mut LobbyDwell) -> Result<(), EngineError> {
        let snap = self.page.snapshot().await?;
        let current = phase::classify(&snap);
        debug!(phase = ?current, "cycle");

        let in_lobby = current == GamePhase::Lobby;
        if dwell.update(Instant::now(), in_lobby, self.cfg.lobby_dwell_ceiling()) {
            warn!("lobby dwell ceiling exceeded; reloading");
            self.page.reload().await?;
            return Ok(());
        }

        let name = self.name();
        let page = self.page.as_ref();
        match current {
            GamePhase::InGameDay => policy::day::handle(page, &self.cfg, &snap, &name).await,
            GamePhase::InGameNight => policy::night::handle(page, &self.cfg, &snap, &name).await,
            GamePhase::PostGame => policy::postgame::handle(page, &self.cfg, &snap, &name).await,
            GamePhase::Lobby => policy::lobby::handle(page, &self.cfg, &snap, &name).await,
            GamePhase::RoleSelection => {
                policy::role_select::handle(page, &self.cfg, &snap, &name).await
            }
            // Menu and unknown screens get no action; the next cycle
            // reclassifies from scratch.
            GamePhase::CustomLobby
            | GamePhase::HomeScreen
            | GamePhase::GameScreen
            | GamePhase::Unknown => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "bot_tests.rs"]
mod tests;
