//! Post-game teardown: acknowledge the result, queue for the next game,
//! and confirm the leave dialog when one appears.
//!
//! Every click is verified by watching its triggering text disappear. A
//! click that never takes effect within the retry budget means the page is
//! wedged, and a full reload is the only reliable recovery.

use tracing::warn;

use howler_dom::{query, wait_for_text, Page, PageSnapshot, WaitOpts};

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Locator, Select};
use crate::error::EngineError;
use crate::ui;

/// How close an OK button must sit to a Cancel button to count as the leave
/// confirmation dialog rather than some unrelated OK.
const DIALOG_PROXIMITY: f64 = 250.0;

pub async fn handle(
    page: &dyn Page,
    cfg: &BotConfig,
    _snap: &PageSnapshot,
    _name: &str,
) -> Result<(), EngineError> {
    let d = Dispatcher::new(page, cfg.click_jitter_ms);

    if !click_until_gone(page, cfg, &d, ui::CONTINUE, cfg.ability_timeout()).await? {
        warn!("result screen stuck on '{}'; reloading", ui::CONTINUE);
        page.reload().await?;
        return Ok(());
    }

    // Matchmaking can be slow to offer the rematch button.
    if !click_until_gone(page, cfg, &d, ui::PLAY_AGAIN, cfg.matchmaking_timeout()).await? {
        warn!("result screen stuck on '{}'; reloading", ui::PLAY_AGAIN);
        page.reload().await?;
        return Ok(());
    }

    confirm_leave_dialog(page, &d).await
}

/// Wait for `text` to show up, then click it until it disappears. A text
/// that never appears is fine; a text that refuses to go away is not.
async fn click_until_gone(
    page: &dyn Page,
    cfg: &BotConfig,
    d: &Dispatcher<'_>,
    text: &str,
    appear_timeout: std::time::Duration,
) -> Result<bool, EngineError> {
    let opts = WaitOpts::new(appear_timeout).interval(cfg.wait_interval());
    let Some((mut snap, _)) = wait_for_text(page, &opts, text).await else {
        return Ok(true);
    };

    for _ in 0..cfg.click_retry_limit {
        d.click(&snap, Locator::ExactText(text), Select::Innermost).await;
        tokio::time::sleep(cfg.settle_delay()).await;
        snap = page.snapshot().await?;
        if !snap.contains_text(text) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Click OK on the leave-confirmation dialog, identified by an OK control
/// sitting next to a Cancel control. Stray OK buttons elsewhere on the page
/// are left alone.
async fn confirm_leave_dialog(page: &dyn Page, d: &Dispatcher<'_>) -> Result<(), EngineError> {
    let snap = page.snapshot().await?;
    let oks = query::find_exact_text(&snap, ui::OK);
    let cancels = query::find_exact_text(&snap, ui::CANCEL);

    let paired_ok = oks.iter().copied().find(|&ok| {
        let Some(ok_node) = snap.node(ok) else {
            return false;
        };
        let (ox, oy) = ok_node.bounding_box.center();
        cancels.iter().any(|&cancel| {
            snap.node(cancel).is_some_and(|c| {
                let (cx, cy) = c.bounding_box.center();
                ((ox - cx).powi(2) + (oy - cy).powi(2)).sqrt() <= DIALOG_PROXIMITY
            })
        })
    });

    if let Some(ok) = paired_ok {
        d.click(&snap, Locator::Node(ok), Select::Innermost).await;
    }
    Ok(())
}

#[cfg(test)]
#[path = "postgame_tests.rs"]
mod tests;
