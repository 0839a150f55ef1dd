//! Top-level page classification.
//!
//! An ordered cascade of text-containment checks. Order matters: a
//! transitional screen can satisfy several predicates at once, so the more
//! dominant states (post-game, in-game) are tested before the menu states.
//! Nothing is sticky; every cycle reclassifies from scratch.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use howler_dom::PageSnapshot;

use crate::ui;

/// Top-level page state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Lobby,
    RoleSelection,
    InGameDay,
    InGameNight,
    PostGame,
    CustomLobby,
    HomeScreen,
    GameScreen,
    Unknown,
}

/// A line of page text that is the in-game timer label, e.g. "Day 2".
static TIMER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(Day|Night)(?: \d+)?$").expect("timer pattern"));

/// True iff the page shows a game-over state (victory, defeat, draw, or the
/// continue prompt). Role logic must abort without acting when this holds.
pub fn game_over(snap: &PageSnapshot) -> bool {
    ui::GAME_OVER_TEXTS.iter().any(|t| snap.contains_text(t))
}

/// The in-game timer label line, or an empty string when absent.
///
/// The empty-string case deliberately classifies as night below; the game's
/// own UI contract is undocumented and this matches its observed behavior.
pub fn timer_label(snap: &PageSnapshot) -> String {
    TIMER_RE
        .find(&snap.full_text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Day iff the label leads with the day prefix; anything else, including an
/// empty label, is night.
fn day_night(label: &str) -> GamePhase {
    if label.starts_with(ui::DAY_LABEL) {
        GamePhase::InGameDay
    } else {
        GamePhase::InGameNight
    }
}

/// Classify the snapshot. First matching predicate in the fixed priority
/// order wins.
pub fn classify(snap: &PageSnapshot) -> GamePhase {
    if game_over(snap) {
        return GamePhase::PostGame;
    }

    let label = timer_label(snap);
    let night_cue =
        snap.contains_text(ui::NIGHT_PROMPT) || snap.contains_text(ui::VOTING);
    if !label.is_empty() || night_cue {
        return day_night(&label);
    }

    if snap.contains_text(ui::ROLE_SELECTION) {
        return GamePhase::RoleSelection;
    }
    if snap.contains_text(ui::CUSTOM_LOBBY) {
        return GamePhase::CustomLobby;
    }
    if snap.contains_text(ui::START_GAME)
        || snap.contains_text(ui::MORE_PLAYERS)
        || snap.contains_text(ui::WAITING_FOR_PLAYERS)
    {
        return GamePhase::Lobby;
    }
    if snap.contains_text(ui::QUICK_GAME) {
        return GamePhase::GameScreen;
    }
    if snap.contains_text(ui::HOME_PLAY) {
        return GamePhase::HomeScreen;
    }

    GamePhase::Unknown
}
