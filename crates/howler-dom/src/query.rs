//! Pure query primitives over a [`PageSnapshot`].
//!
//! All functions here are side-effect free and operate on a single snapshot,
//! so callers can be unit-tested without a browser. Only visible nodes are
//! ever returned; acting on hidden/ghost elements is how automation gets
//! flagged.

use regex::Regex;

use crate::snapshot::{NodeId, PageSnapshot};

/// Visible nodes whose direct text contains `fragment`, document order.
pub fn find_text(snap: &PageSnapshot, fragment: &str) -> Vec<NodeId> {
    snap.nodes
        .iter()
        .filter(|n| n.is_visible() && n.text.contains(fragment))
        .map(|n| n.id)
        .collect()
}

/// Visible nodes whose direct text contains `word` on word boundaries.
///
/// "1" must not match inside "11"; seat numbers make this distinction matter.
pub fn find_exact_text(snap: &PageSnapshot, word: &str) -> Vec<NodeId> {
    let pattern = format!(r"\b{}\b", regex::escape(word));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };
    snap.nodes
        .iter()
        .filter(|n| n.is_visible() && re.is_match(&n.text))
        .map(|n| n.id)
        .collect()
}

/// Visible `img` nodes whose source matches `pattern`, document order.
pub fn find_image(snap: &PageSnapshot, pattern: &Regex) -> Vec<NodeId> {
    snap.nodes
        .iter()
        .filter(|n| {
            n.is_visible()
                && n.image_src
                    .as_deref()
                    .is_some_and(|src| pattern.is_match(src))
        })
        .map(|n| n.id)
        .collect()
}

/// Count of visible images matching `pattern`.
pub fn image_count(snap: &PageSnapshot, pattern: &Regex) -> usize {
    find_image(snap, pattern).len()
}

/// Deterministic tie-break: the most deeply nested candidate.
///
/// Used when several nested containers share the same text/image, to avoid
/// clicking an oversized wrapper. Earlier document order wins among equals.
pub fn innermost(snap: &PageSnapshot, candidates: &[NodeId]) -> Option<NodeId> {
    candidates
        .iter()
        .copied()
        .max_by_key(|&id| (snap.depth(id), std::cmp::Reverse(id)))
}

/// Deterministic tie-break: the least deeply nested candidate inside
/// `container`. Used when clicking a roster row as a whole.
pub fn outermost_within(
    snap: &PageSnapshot,
    candidates: &[NodeId],
    container: NodeId,
) -> Option<NodeId> {
    candidates
        .iter()
        .copied()
        .filter(|&id| id == container || snap.is_descendant_of(id, container))
        .min_by_key(|&id| (snap.depth(id), id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{NodeSpec, SnapshotBuilder};

    fn nested() -> (PageSnapshot, NodeId, NodeId, NodeId) {
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div"));
        let outer = b.push(NodeSpec::visible("div").under(root).text("Continue"));
        let inner = b.push(NodeSpec::visible("span").under(outer).text("Continue"));
        (b.finish(), root, outer, inner)
    }

    #[test]
    fn find_text_returns_all_matches() {
        let (snap, _, outer, inner) = nested();
        assert_eq!(find_text(&snap, "Continue"), vec![outer, inner]);
    }

    #[test]
    fn find_text_skips_hidden_nodes() {
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div"));
        b.push(NodeSpec {
            parent: Some(root),
            tag: "div",
            text: "Continue".into(),
            visible: false,
            ..Default::default()
        });
        let snap = b.finish();
        assert!(find_text(&snap, "Continue").is_empty());
    }

    #[test]
    fn exact_text_respects_word_boundaries() {
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div"));
        let eleven = b.push(NodeSpec::visible("div").under(root).text("11 Bob"));
        let one = b.push(NodeSpec::visible("div").under(root).text("1 Alice"));
        let snap = b.finish();
        assert_eq!(find_exact_text(&snap, "1"), vec![one]);
        assert_eq!(find_exact_text(&snap, "11"), vec![eleven]);
    }

    #[test]
    fn innermost_prefers_deepest_then_first() {
        let (snap, _, outer, inner) = nested();
        assert_eq!(innermost(&snap, &[outer, inner]), Some(inner));
        // Equal depth: earlier document order wins.
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div"));
        let a = b.push(NodeSpec::visible("div").under(root).text("x"));
        let c = b.push(NodeSpec::visible("div").under(root).text("x"));
        let snap2 = b.finish();
        assert_eq!(innermost(&snap2, &[a, c]), Some(a));
    }

    #[test]
    fn outermost_scoped_to_container() {
        let (snap, root, outer, inner) = nested();
        assert_eq!(outermost_within(&snap, &[outer, inner], root), Some(outer));
        // Candidates outside the container are ignored.
        assert_eq!(outermost_within(&snap, &[root], outer), None);
        assert_eq!(outermost_within(&snap, &[inner], outer), Some(inner));
    }

    #[test]
    fn image_queries_match_filename_patterns() {
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div"));
        b.push(NodeSpec::visible("img").under(root).image("icons/role-werewolf.png"));
        b.push(NodeSpec::visible("img").under(root).image("icons/vote-day.png"));
        b.push(NodeSpec::visible("img").under(root).image("icons/vote-day.png"));
        let snap = b.finish();
        let wolf = Regex::new("werewolf").unwrap();
        let vote = Regex::new("vote-day").unwrap();
        assert_eq!(find_image(&snap, &wolf).len(), 1);
        assert_eq!(image_count(&snap, &vote), 2);
    }
}
