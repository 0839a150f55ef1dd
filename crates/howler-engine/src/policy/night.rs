//! Night-phase policy for the wolf roles.
//!
//! A wolf only acts at night when coupled to a non-wolf partner: a solo wolf
//! pairing or an all-wolf pairing leaves no one to protect or signal, so the
//! handler returns without acting.

use tracing::debug;

use howler_dom::{wait_for_image, wait_for_text, Page, PageSnapshot};

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Locator, Select};
use crate::error::EngineError;
use crate::extract;
use crate::phase;
use crate::player::{Partner, PlayerInfo};
use crate::roles::RoleTag;
use crate::ui;

use super::{game_wait, JUNIOR_MARK_RE, SPLIT_MARK_RE};

pub async fn handle(
    page: &dyn Page,
    cfg: &BotConfig,
    snap: &PageSnapshot,
    name: &str,
) -> Result<(), EngineError> {
    if phase::game_over(snap) {
        return Ok(());
    }
    let info = extract::player_info(snap, name);
    if !info.role.is_wolf() {
        return Ok(());
    }
    let Some(partner) = info.non_wolf_partner() else {
        debug!("no non-wolf partner; nothing to do tonight");
        return Ok(());
    };
    let d = Dispatcher::new(page, cfg.click_jitter_ms);

    match info.role {
        RoleTag::JuniorWerewolf | RoleTag::SplitWolf => {
            tag_teammate_target(page, cfg, &d, &info, partner).await
        }
        _ => choose_victim(page, cfg, &d, &info, partner).await,
    }
}

/// Click the partner's roster row in the current snapshot.
async fn click_partner_row(d: &Dispatcher<'_>, snap: &PageSnapshot, seat: u32) -> bool {
    let rows = extract::roster_rows(snap);
    match extract::find_row_by_seat(snap, &rows, seat) {
        Some(row) => d.click(snap, Locator::Node(row), Select::Innermost).await,
        None => false,
    }
}

/// Plain wolf: announce the kill target, cast the night vote onto the
/// partner, then watch the voting sub-phase and re-correct any vote that
/// landed on a Junior Werewolf by mistake.
async fn choose_victim(
    page: &dyn Page,
    cfg: &BotConfig,
    d: &Dispatcher<'_>,
    info: &PlayerInfo,
    partner: Partner,
) -> Result<(), EngineError> {
    let opts = game_wait(cfg, cfg.night_prompt_timeout());
    let Some((snap, _)) = wait_for_text(page, &opts, ui::NIGHT_PROMPT).await else {
        return Ok(());
    };
    if phase::game_over(&snap) {
        return Ok(());
    }

    // Warn teammates when the target is the Priest; the kill can bounce.
    let message = if partner.role == RoleTag::Priest {
        format!("{} {}", ui::PRIEST_WARNING, partner.seat)
    } else {
        partner.seat.to_string()
    };
    d.type_chat(&snap, &message).await;

    let suppress = partner.role == RoleTag::Priest && info.role != RoleTag::JuniorWerewolf;
    if !suppress {
        click_partner_row(d, &snap, partner.seat).await;
    }

    let opts = game_wait(cfg, cfg.vote_phase_timeout());
    let Some((snap, _)) = wait_for_text(page, &opts, ui::VOTING).await else {
        return Ok(());
    };
    if phase::game_over(&snap) {
        return Ok(());
    }
    let rows = extract::roster_rows(&snap);
    for &row in &rows {
        if extract::row_role(&snap, row) != RoleTag::JuniorWerewolf
            || !extract::row_has_icon(&snap, row, ui::WOLF_VOTE_MARKER)
        {
            continue;
        }
        debug!("wolf vote drifted onto a junior; re-casting");
        if partner.role != RoleTag::Priest {
            click_partner_row(d, &snap, partner.seat).await;
        }
    }
    Ok(())
}

/// Junior Werewolf / Split Wolf: ask teammates for their pick, place the
/// role's selection marker, then infer the teammate-chosen seat from chat
/// digits and mark that roster entry too.
async fn tag_teammate_target(
    page: &dyn Page,
    cfg: &BotConfig,
    d: &Dispatcher<'_>,
    info: &PlayerInfo,
    partner: Partner,
) -> Result<(), EngineError> {
    let mark = match info.role {
        RoleTag::SplitWolf => &*SPLIT_MARK_RE,
        _ => &*JUNIOR_MARK_RE,
    };

    let opts = game_wait(cfg, cfg.night_prompt_timeout());
    let Some((snap, _)) = wait_for_text(page, &opts, ui::NIGHT_PROMPT).await else {
        return Ok(());
    };
    if phase::game_over(&snap) {
        return Ok(());
    }

    d.type_chat(&snap, &format!("who? mine is {}", partner.seat))
        .await;
    if partner.role != RoleTag::Priest {
        click_partner_row(d, &snap, partner.seat).await;
    }

    // The marker control only appears once the secondary timer starts.
    tokio::time::sleep(cfg.settle_delay()).await;
    let opts = game_wait(cfg, cfg.ability_timeout());
    let Some((snap, id)) = wait_for_image(page, &opts, mark).await else {
        return Ok(());
    };
    if phase::game_over(&snap) {
        return Ok(());
    }
    d.click(&snap, Locator::Node(id), Select::Innermost).await;

    // Let the chat catch up, then read the teammates' pick out of it.
    tokio::time::sleep(cfg.settle_delay()).await;
    let snap = page.snapshot().await?;
    if phase::game_over(&snap) {
        return Ok(());
    }
    let mut exclude = info.partner_seats();
    if let Some(seat) = info.seat {
        exclude.push(seat);
    }
    let transcript = extract::chat_transcript(&snap);
    let target = extract::extract_numbers(&transcript)
        .into_iter()
        .find(|n| !exclude.contains(n));
    let Some(target) = target else {
        debug!("no teammate target found in chat");
        return Ok(());
    };

    let rows = extract::roster_rows(&snap);
    if let Some(row) = extract::find_row_by_seat(&snap, &rows, target) {
        d.click(&snap, Locator::Image(mark), Select::OutermostWithin(row))
            .await;
    }

    // Confirm the action landed before handing back to the loop.
    let opts = game_wait(cfg, cfg.vote_phase_timeout());
    wait_for_text(page, &opts, ui::VOTING).await;
    Ok(())
}

#[cfg(test)]
#[path = "night_tests.rs"]
mod tests;
