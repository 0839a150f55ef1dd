//! Game engine: state extraction, phase classification and role policies
//! for a social-deduction web game observed purely through its rendered DOM.
//!
//! The page offers no structured data. Every cycle the engine rebuilds its
//! entire view of the game from a fresh [`howler_dom::PageSnapshot`], decides
//! role-appropriate actions and dispatches them as synthetic input. Nothing
//! survives from one cycle to the next except the controller's own lifecycle
//! state.

pub mod bot;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod extract;
pub mod phase;
pub mod player;
pub mod policy;
pub mod roles;
pub mod ui;

#[cfg(test)]
pub(crate) mod testutil;

pub use bot::{BotController, BotStatus, LobbyDwell};
pub use config::BotConfig;
pub use error::EngineError;
pub use phase::GamePhase;
pub use player::{Partner, PlayerInfo};
pub use roles::{role_from_image, RoleTag, WOLF_ROLES};
