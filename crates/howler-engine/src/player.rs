//! The operating player's view of the game, rebuilt every polling cycle.

use serde::{Deserialize, Serialize};

use crate::roles::RoleTag;

/// A paired ("couple") player. Seat and role always travel together: a
/// pairing whose role icon cannot be resolved is still recorded, with
/// [`RoleTag::Unknown`], never silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    pub seat: u32,
    pub role: RoleTag,
}

/// Snapshot-scoped state of the operating player. Nothing here survives a
/// polling cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// The operating player's in-game display name (externally configured).
    pub name: String,

    /// Seat number parsed from the player's own roster entry.
    pub seat: Option<u32>,

    /// The operating player's own role.
    pub role: RoleTag,

    /// Up to two paired players, self excluded, padded with `None`.
    pub partners: [Option<Partner>; 2],
}

impl PlayerInfo {
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seat: None,
            role: RoleTag::Unknown,
            partners: [None, None],
        }
    }

    /// True iff either paired partner is on the wolf team.
    pub fn is_wolf_coupled(&self) -> bool {
        self.partners.iter().flatten().any(|p| p.role.is_wolf())
    }

    /// The first paired partner who is not on the wolf team.
    pub fn non_wolf_partner(&self) -> Option<Partner> {
        self.partners
            .iter()
            .flatten()
            .find(|p| !p.role.is_wolf())
            .copied()
    }

    /// Seats of all known partners.
    pub fn partner_seats(&self) -> Vec<u32> {
        self.partners.iter().flatten().map(|p| p.seat).collect()
    }
}
