//! Action dispatch: resolve a logical locator to one concrete clickable
//! element and request a synthetic click through the page's input transport.
//!
//! Failures here are resolved no-ops, never exceptions: a missing element or
//! a refused injection is logged and reported as `false`, and the caller
//! skips the action for this cycle.

use rand::Rng;
use regex::Regex;
use tracing::{debug, warn};

use howler_dom::{query, MouseButton, NodeId, Page, PageSnapshot};

use crate::ui;

/// A logical click target.
pub enum Locator<'a> {
    /// A concrete node from the current snapshot.
    Node(NodeId),
    /// Any visible node whose text contains the fragment.
    Text(&'a str),
    /// Any visible node whose text contains the word on word boundaries.
    ExactText(&'a str),
    /// Any visible image whose filename matches the pattern.
    Image(&'a Regex),
}

/// Tie-break when a locator matches several nodes.
pub enum Select {
    /// The most deeply nested match; avoids oversized wrappers.
    Innermost,
    /// The least deeply nested match inside the given container; used for
    /// clicking a roster row as a whole.
    OutermostWithin(NodeId),
}

pub struct Dispatcher<'a> {
    page: &'a dyn Page,
    jitter_ms: u64,
}

impl<'a> Dispatcher<'a> {
    pub fn new(page: &'a dyn Page, jitter_ms: u64) -> Self {
        Self { page, jitter_ms }
    }

    /// Short randomized pause before acting. Uniform cadence reads as
    /// automation.
    async fn pause(&self) {
        if self.jitter_ms > 0 {
            let ms = rand::thread_rng().gen_range(0..=self.jitter_ms);
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
    }

    /// Resolve `locator` under `select` to a single clickable node.
    fn resolve(
        &self,
        snap: &PageSnapshot,
        locator: &Locator<'_>,
        select: &Select,
    ) -> Option<NodeId> {
        let candidates: Vec<NodeId> = match locator {
            Locator::Node(id) => vec![*id],
            Locator::Text(fragment) => query::find_text(snap, fragment),
            Locator::ExactText(word) => query::find_exact_text(snap, word),
            Locator::Image(pattern) => query::find_image(snap, pattern),
        };
        if candidates.is_empty() {
            return None;
        }

        let chosen = match select {
            Select::Innermost => query::innermost(snap, &candidates),
            Select::OutermostWithin(container) => {
                query::outermost_within(snap, &candidates, *container)
            }
        }?;

        // The match itself may be a label or icon; the clickable element is
        // the nearest enclosing interactive, enabled, visible node.
        snap.enclosing_interactive(chosen)
    }

    /// Click the element `locator` resolves to. Returns whether a click was
    /// actually dispatched.
    pub async fn click(
        &self,
        snap: &PageSnapshot,
        locator: Locator<'_>,
        select: Select,
    ) -> bool {
        let Some(target) = self.resolve(snap, &locator, &select) else {
            debug!("click target not resolvable this cycle");
            return false;
        };
        let Some(node) = snap.node(target) else {
            return false;
        };
        let (x, y) = node.bounding_box.center();

        self.pause().await;
        match self.page.click(x, y, MouseButton::Left).await {
            Ok(()) => true,
            Err(e) => {
                warn!("click dispatch failed: {}", e);
                false
            }
        }
    }

    /// Type `text` into the in-game chat and send it. The value is written
    /// through the platform's native setter so the page's own state picks it
    /// up, then the send control is clicked.
    pub async fn type_chat(&self, snap: &PageSnapshot, text: &str) -> bool {
        let input = snap
            .nodes
            .iter()
            .find(|n| n.is_visible() && matches!(n.tag_name.as_str(), "input" | "textarea"));
        let Some(input) = input else {
            debug!("no chat input visible");
            return false;
        };
        let (x, y) = input.bounding_box.center();

        self.pause().await;
        if let Err(e) = self.page.set_input_value(x, y, text).await {
            warn!("chat input write failed: {}", e);
            return false;
        }

        let send_re = match Regex::new(ui::SEND_ICON) {
            Ok(re) => re,
            Err(_) => return false,
        };
        if self
            .click(snap, Locator::Image(&send_re), Select::Innermost)
            .await
        {
            return true;
        }
        // Some layouts use a text button instead of an icon.
        self.click(snap, Locator::ExactText(ui::SEND_TEXT), Select::Innermost)
            .await
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
