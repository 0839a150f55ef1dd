//! Role-conditioned decision logic, one module per top-level phase.
//!
//! Every handler is re-entered from scratch each polling cycle with a fresh
//! snapshot. Handlers never throw over missing elements; anything that cannot
//! be resolved right now is skipped until the next cycle. Only transport
//! failures (unreadable page, failed reload) propagate to the loop, which
//! logs them and carries on.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use howler_dom::WaitOpts;

use crate::config::BotConfig;
use crate::ui;

pub mod day;
pub mod lobby;
pub mod night;
pub mod postgame;
pub mod role_select;

macro_rules! icon_re {
    ($name:ident, $fragment:expr) => {
        pub(crate) static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(&regex::escape($fragment)).expect("icon pattern"));
    };
}

icon_re!(DAY_VOTE_RE, ui::DAY_VOTE_MARKER);
icon_re!(PRIEST_TRIGGER_RE, ui::PRIEST_TRIGGER);
icon_re!(HOLY_WATER_RE, ui::HOLY_WATER);
icon_re!(SHOOTER_TRIGGER_RE, ui::SHOOTER_TRIGGER);
icon_re!(BULLET_RE, ui::BULLET);
icon_re!(JUNIOR_MARK_RE, ui::JUNIOR_MARK);
icon_re!(SPLIT_MARK_RE, ui::SPLIT_MARK);
icon_re!(CUPID_RE, ui::CUPID_ICON);

/// Wait options for in-game waits: engine cadence, aborted the moment the
/// game ends. Every wait carries a timeout; the loop can never block forever.
pub(crate) fn game_wait(cfg: &BotConfig, timeout: Duration) -> WaitOpts {
    WaitOpts::new(timeout)
        .interval(cfg.wait_interval())
        .cancel_on(ui::GAME_OVER_TEXTS)
}
