//! Role tags and the icon-filename classification table.

use serde::{Deserialize, Serialize};

/// Normalized role tag for a roster entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    Wolf,
    JuniorWerewolf,
    SplitWolf,
    Priest,
    Shooter,
    /// A recognized role icon with no dedicated policy.
    Other,
    /// No role icon could be resolved.
    Unknown,
}

/// Role tags on the wolf team.
pub const WOLF_ROLES: [RoleTag; 3] = [RoleTag::Wolf, RoleTag::JuniorWerewolf, RoleTag::SplitWolf];

impl RoleTag {
    /// True iff this tag is on the wolf team.
    pub fn is_wolf(self) -> bool {
        WOLF_ROLES.contains(&self)
    }
}

/// Ordered icon-filename substring table. First matching substring wins, so
/// the junior/split variants must precede the plain werewolf entry.
const ROLE_IMAGE_TABLE: &[(&str, RoleTag)] = &[
    ("werewolf-junior", RoleTag::JuniorWerewolf),
    ("junior-werewolf", RoleTag::JuniorWerewolf),
    ("split-wolf", RoleTag::SplitWolf),
    ("werewolf-split", RoleTag::SplitWolf),
    ("werewolf", RoleTag::Wolf),
    ("priest", RoleTag::Priest),
    ("gunner", RoleTag::Shooter),
];

/// Classify a role icon filename. Pure function over the static table;
/// anything unrecognized is `Other`.
pub fn role_from_image(filename: &str) -> RoleTag {
    for (fragment, role) in ROLE_IMAGE_TABLE {
        if filename.contains(fragment) {
            return *role;
        }
    }
    RoleTag::Other
}
