//! Day-phase policy.
//!
//! Uncoupled wolves signal their seat number to teammates through chat,
//! uncoupled ability holders (Priest, Shooter) follow the day vote, and a
//! wolf coupled to a villager throws the day vote onto the partner.

use tracing::debug;

use howler_dom::{wait_for_image, wait_for_image_count, Page, PageSnapshot};

use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Locator, Select};
use crate::error::EngineError;
use crate::extract;
use crate::phase;
use crate::player::PlayerInfo;
use crate::roles::RoleTag;
use crate::ui;

use super::{
    game_wait, BULLET_RE, DAY_VOTE_RE, HOLY_WATER_RE, PRIEST_TRIGGER_RE, SHOOTER_TRIGGER_RE,
};

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
    let d = Dispatcher::new(page, cfg.click_jitter_ms);

    if !info.is_wolf_coupled() {
        if info.role.is_wolf() {
            signal_own_seat(&d, snap, &info).await;
        } else if matches!(info.role, RoleTag::Priest | RoleTag::Shooter) {
            follow_day_vote(page, cfg, &d, info.role).await;
        }
        return Ok(());
    }

    // Wolf-coupled: the pair wins together, so the day vote goes onto the
    // non-wolf partner. Skip when this cycle's vote already landed there.
    if let Some(partner) = info.non_wolf_partner() {
        let rows = extract::roster_rows(snap);
        if let Some(row) = extract::find_row_by_seat(snap, &rows, partner.seat) {
            if extract::row_has_icon(snap, row, ui::DAY_VOTE_MARKER) {
                debug!("pair vote already cast");
            } else {
                d.click(snap, Locator::Node(row), Select::Innermost).await;
            }
        }
    }

    match info.role {
        RoleTag::Priest => apply_holy_water(page, cfg, &d, snap).await,
        RoleTag::Shooter => shoot_marked_outsider(page, cfg, &d, &info).await,
        _ => {}
    }
    Ok(())
}

/// Type the player's own seat into chat so teammates converge on one target.
/// Idempotent: a transcript already naming the seat means nothing to do.
async fn signal_own_seat(d: &Dispatcher<'_>, snap: &PageSnapshot, info: &PlayerInfo) {
    let Some(seat) = info.seat else {
        return;
    };
    let transcript = extract::chat_transcript(snap);
    if extract::extract_numbers(&transcript).contains(&seat) {
        debug!("seat {} already signaled", seat);
        return;
    }
    d.type_chat(snap, &seat.to_string()).await;
}

/// Uncoupled ability holder: once the day vote settles on someone, arm the
/// role's trigger and apply the ability to the marked roster entry.
async fn follow_day_vote(page: &dyn Page, cfg: &BotConfig, d: &Dispatcher<'_>, role: RoleTag) {
    let (trigger, action) = match role {
        RoleTag::Priest => (&*PRIEST_TRIGGER_RE, &*HOLY_WATER_RE),
        _ => (&*SHOOTER_TRIGGER_RE, &*BULLET_RE),
    };

    let opts = game_wait(cfg, cfg.ability_timeout());
    let Some((snap, _)) = wait_for_image(page, &opts, &DAY_VOTE_RE).await else {
        return;
    };
    if phase::game_over(&snap) {
        return;
    }
    if !d.click(&snap, Locator::Image(trigger), Select::Innermost).await {
        return;
    }

    let opts = game_wait(cfg, cfg.ability_timeout());
    let Some((snap, _)) = wait_for_image(page, &opts, action).await else {
        return;
    };
    if phase::game_over(&snap) {
        return;
    }
    let rows = extract::roster_rows(&snap);
    let marked = rows
        .iter()
        .copied()
        .find(|&row| extract::row_has_icon(&snap, row, ui::DAY_VOTE_MARKER));
    match marked {
        Some(row) => {
            d.click(&snap, Locator::Image(action), Select::OutermostWithin(row))
                .await;
        }
        None => {
            d.click(&snap, Locator::Image(action), Select::Innermost).await;
        }
    }
}

/// Coupled Priest: arm the trigger, then douse whichever roster entry shows
/// the holy-water marker.
async fn apply_holy_water(page: &dyn Page, cfg: &BotConfig, d: &Dispatcher<'_>, snap: &PageSnapshot) {
    if !d
        .click(snap, Locator::Image(&PRIEST_TRIGGER_RE), Select::Innermost)
        .await
    {
        return;
    }
    let opts = game_wait(cfg, cfg.ability_timeout());
    let Some((snap, id)) = wait_for_image(page, &opts, &HOLY_WATER_RE).await else {
        return;
    };
    if phase::game_over(&snap) {
        return;
    }
    d.click(&snap, Locator::Node(id), Select::Innermost).await;
}

/// Coupled Shooter: scan for a voted-for target who is neither self nor a
/// partner, widening the required marker count step by step. The cap keeps
/// the search bounded.
async fn shoot_marked_outsider(
    page: &dyn Page,
    cfg: &BotConfig,
    d: &Dispatcher<'_>,
    info: &PlayerInfo,
) {
    let mut exclude = info.partner_seats();
    if let Some(seat) = info.seat {
        exclude.push(seat);
    }

    let cap = cfg.shooter_marker_cap.max(2) as usize;
    for threshold in 2..=cap {
        let opts = game_wait(cfg, cfg.ability_timeout());
        let Some(snap) = wait_for_image_count(page, &opts, &DAY_VOTE_RE, threshold).await else {
            return;
        };
        if phase::game_over(&snap) {
            return;
        }

        let rows = extract::roster_rows(&snap);
        let target = rows.iter().copied().find(|&row| {
            extract::row_has_icon(&snap, row, ui::DAY_VOTE_MARKER)
                && extract::row_seat(&snap, row).is_some_and(|s| !exclude.contains(&s))
        });
        let Some(target) = target else {
            debug!("no eligible target at {} markers", threshold);
            continue;
        };
        let Some(target_seat) = extract::row_seat(&snap, target) else {
            continue;
        };

        if !d
            .click(&snap, Locator::Image(&SHOOTER_TRIGGER_RE), Select::Innermost)
            .await
        {
            return;
        }
        let opts = game_wait(cfg, cfg.ability_timeout());
        let Some((snap, _)) = wait_for_image(page, &opts, &BULLET_RE).await else {
            return;
        };
        if phase::game_over(&snap) {
            return;
        }
        let rows = extract::roster_rows(&snap);
        if let Some(row) = extract::find_row_by_seat(&snap, &rows, target_seat) {
            d.click(&snap, Locator::Image(&BULLET_RE), Select::OutermostWithin(row))
                .await;
        }
        return;
    }
}

#[cfg(test)]
#[path = "day_tests.rs"]
mod tests;
