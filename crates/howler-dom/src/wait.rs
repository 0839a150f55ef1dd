//! The single suspension primitive: poll a predicate against fresh snapshots
//! until it matches, a cancel condition appears, or the timeout elapses.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::page::Page;
use crate::query;
use crate::snapshot::{NodeId, PageSnapshot};

/// Options for [`wait_for`].
#[derive(Debug, Clone)]
pub struct WaitOpts {
    /// Give up after this long. Mandatory so the loop can never block forever.
    pub timeout: Duration,
    /// Re-evaluation cadence.
    pub interval: Duration,
    /// Text fragments that abort the wait when they appear in the page text.
    pub cancel_texts: Vec<String>,
}

impl WaitOpts {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: Duration::from_millis(500),
            cancel_texts: Vec::new(),
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn cancel_on(mut self, texts: &[&str]) -> Self {
        self.cancel_texts = texts.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Repeatedly evaluate `predicate` against fresh snapshots.
///
/// Resolves to the predicate's first `Some` result, or `None` when a cancel
/// text appears, the timeout elapses, or the page becomes unreadable. Cancel
/// conditions are checked before the predicate on every cycle, including the
/// first, so a wait that is already doomed resolves promptly.
///
/// Callers must treat `None` as "unavailable this cycle" and skip, not fail.
pub async fn wait_for<T, F>(page: &dyn Page, opts: &WaitOpts, mut predicate: F) -> Option<T>
where
    F: FnMut(&PageSnapshot) -> Option<T>,
{
    let deadline = Instant::now() + opts.timeout;
    loop {
        let snap = match page.snapshot().await {
            Ok(snap) => snap,
            Err(e) => {
                debug!("wait_for: snapshot failed: {}", e);
                return None;
            }
        };

        if opts
            .cancel_texts
            .iter()
            .any(|t| snap.contains_text(t))
        {
            debug!("wait_for: cancelled by page text");
            return None;
        }

        if let Some(result) = predicate(&snap) {
            return Some(result);
        }

        if Instant::now() + opts.interval > deadline {
            return None;
        }
        tokio::time::sleep(opts.interval).await;
    }
}

/// Wait until some visible node's text contains `fragment`.
pub async fn wait_for_text(
    page: &dyn Page,
    opts: &WaitOpts,
    fragment: &str,
) -> Option<(PageSnapshot, NodeId)> {
    wait_for(page, opts, |snap| {
        query::innermost(snap, &query::find_text(snap, fragment)).map(|id| (snap.clone(), id))
    })
    .await
}

/// Wait until some visible node's text contains `word` on word boundaries.
pub async fn wait_for_exact_text(
    page: &dyn Page,
    opts: &WaitOpts,
    word: &str,
) -> Option<(PageSnapshot, NodeId)> {
    wait_for(page, opts, |snap| {
        query::innermost(snap, &query::find_exact_text(snap, word)).map(|id| (snap.clone(), id))
    })
    .await
}

/// Wait until a visible image matching `pattern` appears.
pub async fn wait_for_image(
    page: &dyn Page,
    opts: &WaitOpts,
    pattern: &regex::Regex,
) -> Option<(PageSnapshot, NodeId)> {
    wait_for(page, opts, |snap| {
        query::find_image(snap, pattern)
            .first()
            .copied()
            .map(|id| (snap.clone(), id))
    })
    .await
}

/// Wait until at least `min` visible images match `pattern`.
pub async fn wait_for_image_count(
    page: &dyn Page,
    opts: &WaitOpts,
    pattern: &regex::Regex,
    min: usize,
) -> Option<PageSnapshot> {
    wait_for(page, opts, |snap| {
        (query::image_count(snap, pattern) >= min).then(|| snap.clone())
    })
    .await
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
