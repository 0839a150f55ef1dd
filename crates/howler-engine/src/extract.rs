//! Page state extraction: roster rows, pairings, roles, chat.
//!
//! The roster has no stable markup, only a layout signature: each alive
//! player's entry leads with a seat number and carries a stack of icons.
//! Everything here tolerates partial information; a missing piece degrades
//! to `None`/`Unknown`, never to an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use howler_dom::{NodeId, PageSnapshot};

use crate::player::{Partner, PlayerInfo};
use crate::roles::{role_from_image, RoleTag};
use crate::ui;

/// Leading seat number of a roster entry.
static SEAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})\b").expect("seat pattern"));

/// Any standalone 1-2 digit number, for chat transcript mining.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\b").expect("number pattern"));

/// Enumerate the currently-alive roster rows.
///
/// A row is anchored on a visible node whose direct text leads with a seat
/// number; the row itself is that node, or its parent when the icons hang
/// off a sibling. Digit runs without nearby icons (timers, counters) are not
/// roster entries, and nothing inside the chat panel ever is: transcript
/// lines lead with seat numbers too, and the panel's send icon would
/// otherwise satisfy the parent fallback.
pub fn roster_rows(snap: &PageSnapshot) -> Vec<NodeId> {
    let chat = chat_panel(snap);
    let mut rows = Vec::new();
    for node in &snap.nodes {
        if !node.is_visible() || !SEAT_RE.is_match(&node.text) {
            continue;
        }
        if chat.is_some_and(|panel| node.id == panel || snap.is_descendant_of(node.id, panel)) {
            continue;
        }
        let row = if !snap.subtree_images(node.id).is_empty() {
            node.id
        } else if let Some(parent) = node.parent {
            if snap.subtree_images(parent).is_empty() {
                continue;
            }
            parent
        } else {
            continue;
        };
        if !rows.contains(&row) {
            rows.push(row);
        }
    }
    rows
}

/// Seat number of a roster row.
pub fn row_seat(snap: &PageSnapshot, row: NodeId) -> Option<u32> {
    let text = snap.subtree_text(row);
    SEAT_RE
        .captures(&text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Resolve a roster row's role: walk its icon list from the end backwards,
/// skipping decorations (vote markers, skins, the pairing sticker), and map
/// the first remaining icon through the role table.
pub fn row_role(snap: &PageSnapshot, row: NodeId) -> RoleTag {
    for image in snap.subtree_images(row).into_iter().rev() {
        if ui::is_decoration(image) {
            continue;
        }
        return role_from_image(image);
    }
    RoleTag::Unknown
}

/// True iff the row carries the pairing sticker.
pub fn row_is_paired(snap: &PageSnapshot, row: NodeId) -> bool {
    snap.subtree_images(row)
        .iter()
        .any(|img| img.contains(ui::PAIR_STICKER))
}

/// True iff the row shows an icon matching `fragment`.
pub fn row_has_icon(snap: &PageSnapshot, row: NodeId, fragment: &str) -> bool {
    snap.subtree_images(row).iter().any(|img| img.contains(fragment))
}

/// The roster row with the given seat number.
pub fn find_row_by_seat(snap: &PageSnapshot, rows: &[NodeId], seat: u32) -> Option<NodeId> {
    rows.iter()
        .copied()
        .find(|&row| row_seat(snap, row) == Some(seat))
}

/// Build the operating player's [`PlayerInfo`] from the current snapshot.
///
/// Tolerates zero, one or two pairings; pads the partner list to exactly two
/// slots. A paired row with an unresolvable role icon is recorded with
/// [`RoleTag::Unknown`].
pub fn player_info(snap: &PageSnapshot, name: &str) -> PlayerInfo {
    let rows = roster_rows(snap);

    let own_row = rows
        .iter()
        .copied()
        .find(|&row| snap.subtree_text(row).contains(name));

    let mut info = PlayerInfo::unknown(name);
    if let Some(own) = own_row {
        info.seat = row_seat(snap, own);
        info.role = row_role(snap, own);
    } else {
        debug!("own roster entry not found for '{}'", name);
    }

    let mut slot = 0;
    for &row in &rows {
        if slot >= 2 {
            break;
        }
        if Some(row) == own_row || !row_is_paired(snap, row) {
            continue;
        }
        if let Some(seat) = row_seat(snap, row) {
            info.partners[slot] = Some(Partner {
                seat,
                role: row_role(snap, row),
            });
            slot += 1;
        }
    }

    info
}

/// The chat panel: the container two parent hops above the chat input. The
/// page keeps messages and the input under one panel; two hops covers both
/// layouts seen in the wild.
fn chat_panel(snap: &PageSnapshot) -> Option<NodeId> {
    let input = snap
        .nodes
        .iter()
        .find(|n| n.is_visible() && matches!(n.tag_name.as_str(), "input" | "textarea"))?;

    let mut scope = input.id;
    for _ in 0..2 {
        match snap.node(scope).and_then(|n| n.parent) {
            Some(parent) => scope = parent,
            None => break,
        }
    }
    Some(scope)
}

/// The chat transcript: the text of the panel enclosing the chat input.
pub fn chat_transcript(snap: &PageSnapshot) -> String {
    match chat_panel(snap) {
        Some(panel) => snap.subtree_text(panel),
        None => String::new(),
    }
}

/// All standalone 1-2 digit numbers in `text`, in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<u32> {
    NUMBER_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
