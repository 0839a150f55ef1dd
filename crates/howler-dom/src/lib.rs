//! DOM capability layer for the howler autopilot.
//!
//! The live page is an external, untyped oracle: no structured data, only
//! rendered markup. This crate narrows it to a small, testable surface:
//!
//! - [`PageSnapshot`]: a flattened per-poll capture of the rendered tree,
//!   rebuilt from scratch every cycle.
//! - [`query`]: pure finders over a snapshot (text, image filename patterns,
//!   innermost/outermost tie-breaks).
//! - [`Page`]: the async capability trait the engine drives — snapshot,
//!   click, set-input-value, reload.
//! - [`wait`]: the single suspension primitive (`wait_for` and its
//!   specialized wrappers), with mandatory timeouts and cancel conditions.
//! - [`cdp`]: the real implementation over Chrome DevTools Protocol.

pub mod cdp;
mod page;
pub mod query;
mod snapshot;
pub mod wait;

pub use page::{MouseButton, Page, PageError};
pub use snapshot::{BoundingBox, NodeId, NodeSnapshot, NodeSpec, PageSnapshot, SnapshotBuilder};
pub use wait::{wait_for, wait_for_exact_text, wait_for_image, wait_for_image_count, wait_for_text, WaitOpts};
