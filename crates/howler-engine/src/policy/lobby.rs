//! Lobby handling: start the game when the button is live, and reload out
//! of matchmaking deadlocks instead of waiting on them.
//!
//! The dwell-time ceiling that catches a silently stuck lobby lives in the
//! loop controller; this handler only reacts to what the current snapshot
//! shows.

use tracing::warn;

use howler_dom::{Page, PageSnapshot};

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Locator, Select};
use crate::error::EngineError;
use crate::ui;

pub async fn handle(
    page: &dyn Page,
    cfg: &BotConfig,
    snap: &PageSnapshot,
    _name: &str,
) -> Result<(), EngineError> {
    if snap.contains_text(ui::MORE_PLAYERS) {
        // No in-page action recovers from this; a fresh page does.
        warn!("lobby reports too few players; reloading");
        page.reload().await?;
        return Ok(());
    }

    if snap.contains_text(ui::START_GAME) {
        let d = Dispatcher::new(page, cfg.click_jitter_ms);
        // Resolution fails while the button is disabled or hidden; the next
        // cycle tries again.
        d.click(snap, Locator::ExactText(ui::START_GAME), Select::Innermost)
            .await;
    }
    Ok(())
}
