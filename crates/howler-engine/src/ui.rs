//! Text fragments and icon-filename fragments of the game's rendered UI.
//!
//! The page offers no structured data; these strings are the whole contract.
//! They are centralized here so a UI revision on the game's side is a
//! one-file fix.

// ---------------------------------------------------------------------------
// Page text fragments
// ---------------------------------------------------------------------------

pub const VICTORY: &str = "Victory";
pub const DEFEAT: &str = "Defeat";
pub const DRAW: &str = "Draw";
pub const CONTINUE: &str = "Continue";

/// Any of these visible means the game has ended; role logic must hard-abort.
pub const GAME_OVER_TEXTS: &[&str] = &[VICTORY, DEFEAT, DRAW, CONTINUE];

pub const PLAY_AGAIN: &str = "Play again";
pub const OK: &str = "OK";
pub const CANCEL: &str = "Cancel";

pub const ROLE_SELECTION: &str = "Choose your role";
pub const INSTIGATOR: &str = "Instigator";

pub const START_GAME: &str = "START GAME";
pub const MORE_PLAYERS: &str = "More players required";
pub const WAITING_FOR_PLAYERS: &str = "Waiting for players";
pub const CUSTOM_LOBBY: &str = "Custom game";
pub const HOME_PLAY: &str = "PLAY";
pub const QUICK_GAME: &str = "Quick game";

/// Leading text of the in-game timer label on day phases.
pub const DAY_LABEL: &str = "Day";

/// Night kill-target prompt shown to wolf roles.
pub const NIGHT_PROMPT: &str = "Choose a victim";
/// Voting sub-phase header, day and night.
pub const VOTING: &str = "Voting";

/// Prefix for kill messages when the chosen target is the Priest, so
/// teammates know the kill can bounce.
pub const PRIEST_WARNING: &str = "priest!";

// ---------------------------------------------------------------------------
// Icon filename fragments
// ---------------------------------------------------------------------------

/// Pairing sticker shown on coupled players' roster entries.
pub const PAIR_STICKER: &str = "lovers";

/// Day-vote selection marker on a roster entry.
pub const DAY_VOTE_MARKER: &str = "vote-day";
/// Werewolf night-vote marker on a roster entry.
pub const WOLF_VOTE_MARKER: &str = "vote-werewolf";

/// Priest ability trigger and its per-target action icon.
pub const PRIEST_TRIGGER: &str = "icon-priest";
pub const HOLY_WATER: &str = "holy-water";

/// Shooter ability trigger and its per-target action icon.
pub const SHOOTER_TRIGGER: &str = "icon-gunner";
pub const BULLET: &str = "bullet";

/// Selection markers for the wolf tagging roles.
pub const JUNIOR_MARK: &str = "mark-junior";
pub const SPLIT_MARK: &str = "mark-split";

/// Chat send control.
pub const SEND_ICON: &str = "icon-send";
pub const SEND_TEXT: &str = "Send";

/// Cupid role icon, claimed preemptively when an Instigator is present.
pub const CUPID_ICON: &str = "cupid";

/// Icon fragments that decorate a roster entry without being its role icon:
/// vote markers, cosmetic skins, the pairing sticker, ability markers.
pub const DECORATION_ICONS: &[&str] = &[
    DAY_VOTE_MARKER,
    WOLF_VOTE_MARKER,
    PAIR_STICKER,
    HOLY_WATER,
    BULLET,
    JUNIOR_MARK,
    SPLIT_MARK,
    "skin",
    "emote",
];

/// True iff the filename is a decoration rather than a role icon.
pub fn is_decoration(filename: &str) -> bool {
    DECORATION_ICONS.iter().any(|d| filename.contains(d))
}
