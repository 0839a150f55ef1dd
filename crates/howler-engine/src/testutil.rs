//! Test support: synthetic game pages and a scripted [`Page`] double that
//! records every action the engine dispatches.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use howler_dom::{MouseButton, NodeId, NodeSpec, Page, PageError, PageSnapshot, SnapshotBuilder};

use crate::config::BotConfig;

/// Engine config with all timings collapsed so tests never wait on real
/// game pacing.
pub fn test_config() -> BotConfig {
    BotConfig {
        poll_interval_ms: 5,
        wait_interval_ms: 5,
        ability_timeout_ms: 40,
        night_prompt_timeout_ms: 40,
        vote_phase_timeout_ms: 40,
        matchmaking_timeout_ms: 40,
        lobby_dwell_ceiling_ms: 100,
        click_retry_limit: 2,
        settle_delay_ms: 0,
        click_jitter_ms: 0,
        shooter_marker_cap: 4,
    }
}

/// Row bbox layout used by [`GamePage::row`]: seat `n` renders at
/// `y = n * 100`, so a click's y coordinate identifies the row it hit.
pub fn row_center_y(seat: u32) -> f64 {
    seat as f64 * 100.0 + 20.0
}

/// Builder for synthetic in-game pages with a roster, chat panel and
/// free-floating ability icons.
pub struct GamePage {
    b: SnapshotBuilder,
    root: NodeId,
    roster: NodeId,
}

impl GamePage {
    pub fn new() -> Self {
        let mut b = SnapshotBuilder::new();
        let root = b.push(NodeSpec::visible("div").bbox(0.0, 0.0, 1280.0, 720.0));
        let roster = b.push(
            NodeSpec::visible("div")
                .under(root)
                .bbox(0.0, 80.0, 300.0, 600.0),
        );
        Self { b, root, roster }
    }

    /// Add a free text line (timer labels, prompts, banners).
    pub fn text(&mut self, line: &str) -> &mut Self {
        self.b
            .push(NodeSpec::visible("div").under(self.root).text(line));
        self
    }

    /// Add a roster row. Rows are clickable, as they are in the game.
    pub fn row(&mut self, seat: u32, name: &str, icons: &[&str]) -> NodeId {
        let row = self.b.push(
            NodeSpec::visible("div")
                .under(self.roster)
                .text(format!("{} {}", seat, name))
                .bbox(0.0, seat as f64 * 100.0, 300.0, 40.0)
                .interactive(),
        );
        for (i, icon) in icons.iter().enumerate() {
            self.b.push(
                NodeSpec::visible("img")
                    .under(row)
                    .image(*icon)
                    .bbox(200.0 + i as f64 * 36.0, seat as f64 * 100.0, 32.0, 32.0),
            );
        }
        row
    }

    /// Add a chat panel: transcript, input field and a send button at
    /// (900, 700).
    pub fn chat(&mut self, transcript: &str) -> &mut Self {
        let panel = self.b.push(
            NodeSpec::visible("div")
                .under(self.root)
                .bbox(800.0, 80.0, 400.0, 640.0),
        );
        self.b.push(
            NodeSpec::visible("div")
                .under(panel)
                .text(transcript)
                .bbox(800.0, 80.0, 400.0, 560.0),
        );
        let input_wrap = self.b.push(
            NodeSpec::visible("div")
                .under(panel)
                .bbox(800.0, 680.0, 400.0, 40.0),
        );
        self.b.push(
            NodeSpec::visible("textarea")
                .under(input_wrap)
                .bbox(810.0, 685.0, 280.0, 30.0)
                .interactive(),
        );
        let send = self.b.push(
            NodeSpec::visible("button")
                .under(input_wrap)
                .bbox(880.0, 685.0, 40.0, 30.0)
                .interactive(),
        );
        self.b.push(
            NodeSpec::visible("img")
                .under(send)
                .image("icon-send.png")
                .bbox(885.0, 690.0, 20.0, 20.0),
        );
        self
    }

    /// Add a clickable text button at (500, 600).
    pub fn button(&mut self, label: &str) -> NodeId {
        self.b.push(
            NodeSpec::visible("button")
                .under(self.root)
                .text(label)
                .bbox(500.0, 600.0, 120.0, 40.0)
                .interactive(),
        )
    }

    /// Add a visible but disabled text button.
    pub fn disabled_button(&mut self, label: &str) -> NodeId {
        self.b.push(
            NodeSpec::visible("button")
                .under(self.root)
                .text(label)
                .bbox(500.0, 600.0, 120.0, 40.0)
                .interactive()
                .disabled(),
        )
    }

    /// Add a free-floating clickable ability icon at (600, 650).
    pub fn icon(&mut self, src: &str) -> NodeId {
        let button = self.b.push(
            NodeSpec::visible("button")
                .under(self.root)
                .bbox(600.0, 650.0, 48.0, 48.0)
                .interactive(),
        );
        self.b.push(
            NodeSpec::visible("img")
                .under(button)
                .image(src)
                .bbox(604.0, 654.0, 40.0, 40.0),
        );
        button
    }

    pub fn finish(self) -> PageSnapshot {
        self.b.finish()
    }
}

/// One recorded side effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Click { x: f64, y: f64 },
    SetInput { text: String },
    Reload,
}

/// Scripted [`Page`]: serves queued snapshots (repeating the last once the
/// queue drains) and records every dispatched action.
pub struct ScriptedPage {
    queue: Mutex<VecDeque<PageSnapshot>>,
    last: Mutex<PageSnapshot>,
    actions: Mutex<Vec<Action>>,
}

impl ScriptedPage {
    pub fn single(snap: PageSnapshot) -> Self {
        Self::sequence(vec![snap])
    }

    pub fn sequence(snaps: Vec<PageSnapshot>) -> Self {
        let mut queue: VecDeque<PageSnapshot> = snaps.into_iter().collect();
        let last = queue.pop_back().unwrap_or_default();
        Self {
            queue: Mutex::new(queue),
            last: Mutex::new(last),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().clone()
    }

    pub fn clicks(&self) -> Vec<(f64, f64)> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Click { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::SetInput { text } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn reload_count(&self) -> usize {
        self.actions()
            .iter()
            .filter(|a| matches!(a, Action::Reload))
            .count()
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn snapshot(&self) -> Result<PageSnapshot, PageError> {
        if let Some(snap) = self.queue.lock().pop_front() {
            return Ok(snap);
        }
        Ok(self.last.lock().clone())
    }

    async fn click(&self, x: f64, y: f64, _button: MouseButton) -> Result<(), PageError> {
        self.actions.lock().push(Action::Click { x, y });
        Ok(())
    }

    async fn set_input_value(&self, _x: f64, _y: f64, text: &str) -> Result<(), PageError> {
        self.actions.lock().push(Action::SetInput {
            text: text.to_string(),
        });
        Ok(())
    }

    async fn reload(&self) -> Result<(), PageError> {
        self.actions.lock().push(Action::Reload);
        Ok(())
    }
}
