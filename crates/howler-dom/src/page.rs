//! The narrow capability surface the engine uses to talk to a live page.
//!
//! Everything above this trait (extraction, policy, the main loop) is
//! unit-testable against a scripted implementation; only the CDP transport in
//! [`crate::cdp`] touches a real browser.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::snapshot::PageSnapshot;

/// Mouse button for synthetic clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Page access errors.
#[derive(Debug, Error)]
pub enum PageError {
    /// The transport to the page is gone (tab closed, socket dropped).
    #[error("Page transport error: {0}")]
    Transport(String),

    /// The input-injection collaborator reported a failure.
    #[error("Input injection failed: {0}")]
    Injection(String),

    /// Snapshot capture produced something unparseable.
    #[error("Snapshot capture failed: {0}")]
    Capture(String),
}

/// A live page the bot can observe and poke.
///
/// Implementations must serialize against a single attached target; the
/// caller assumes one logical actor and never issues overlapping calls.
#[async_trait]
pub trait Page: Send + Sync {
    /// Capture a fresh snapshot of the page. Never cached.
    async fn snapshot(&self) -> Result<PageSnapshot, PageError>;

    /// Synthetic click at viewport coordinates: move, press, release.
    async fn click(&self, x: f64, y: f64, button: MouseButton) -> Result<(), PageError>;

    /// Set the value of the input element at the given point through the
    /// platform's native property setter and fire synthetic `input`/`change`
    /// events so the host page's own state picks up the change.
    async fn set_input_value(&self, x: f64, y: f64, text: &str) -> Result<(), PageError>;

    /// Hard recovery: reload the page.
    async fn reload(&self) -> Result<(), PageError>;
}
