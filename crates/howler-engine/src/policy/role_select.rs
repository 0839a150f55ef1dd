//! Role-selection handling.
//!
//! One strategic pre-commitment: when an Instigator is in the offered role
//! set, claim Cupid before anyone else does. Every other offer is left to
//! the game's own assignment.

use tracing::info;

use howler_dom::{Page, PageSnapshot};

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Locator, Select};
use crate::error::EngineError;
use crate::ui;

use super::CUPID_RE;

pub async fn handle(
    page: &dyn Page,
    cfg: &BotConfig,
    snap: &PageSnapshot,
    _name: &str,
) -> Result<(), EngineError> {
    if !snap.contains_text(ui::INSTIGATOR) {
        return Ok(());
    }
    info!("instigator offered; claiming cupid");
    let d = Dispatcher::new(page, cfg.click_jitter_ms);
    d.click(snap, Locator::Image(&CUPID_RE), Select::Innermost).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{GamePage, ScriptedPage};

    fn cfg() -> BotConfig {
        BotConfig {
            click_jitter_ms: 0,
            ..BotConfig::default()
        }
    }

    #[tokio::test]
    async fn instigator_triggers_a_cupid_claim() {
        let mut gp = GamePage::new();
        gp.text("Choose your role");
        gp.text(ui::INSTIGATOR);
        let cupid = gp.icon("roles/cupid.png");
        let snap = gp.finish();
        let center = snap.node(cupid).unwrap().bounding_box.center();

        let page = ScriptedPage::single(snap.clone());
        handle(&page, &cfg(), &snap, "Hunter").await.unwrap();
        assert_eq!(page.clicks(), vec![center]);
    }

    #[tokio::test]
    async fn no_instigator_means_no_claim() {
        let mut gp = GamePage::new();
        gp.text("Choose your role");
        gp.icon("roles/cupid.png");
        let snap = gp.finish();

        let page = ScriptedPage::single(snap.clone());
        handle(&page, &cfg(), &snap, "Hunter").await.unwrap();
        assert!(page.actions().is_empty());
    }
}
