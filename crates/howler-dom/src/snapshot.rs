//! Flattened per-poll DOM capture.
//!
//! A [`PageSnapshot`] is rebuilt from the live page on every polling cycle and
//! discarded afterwards. Node ids are indices into the snapshot's node table
//! and are meaningless across snapshots.

use serde::{Deserialize, Serialize};

/// Index of a node within one [`PageSnapshot`]. Not stable across snapshots.
pub type NodeId = usize;

/// Bounding box for an element, in viewport coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the center point of this bounding box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// True iff the rendered box has actual area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// One element captured from the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Index of this node in the snapshot.
    pub id: NodeId,

    /// Parent node index, `None` for the root.
    pub parent: Option<NodeId>,

    /// Child node indices in document order.
    #[serde(default)]
    pub children: Vec<NodeId>,

    /// Tag name (lowercase).
    pub tag_name: String,

    /// Direct text content only, not text from children.
    pub text: String,

    /// Image source URL/filename for `img` elements.
    pub image_src: Option<String>,

    /// Bounding box in viewport coordinates.
    pub bounding_box: BoundingBox,

    /// Whether the element is rendered (not `display:none`/`visibility:hidden`
    /// and has a layout box assigned).
    pub visible: bool,

    /// Whether this is an interactive element (button/link/input, explicit
    /// click handler, button role, or pointer cursor).
    pub is_interactive: bool,

    /// Whether the element carries the `disabled` attribute.
    pub disabled: bool,
}

impl NodeSnapshot {
    /// Visibility gate used before every click: rendered, and the assigned
    /// layout box has non-zero area.
    pub fn is_visible(&self) -> bool {
        self.visible && self.bounding_box.has_area()
    }
}

/// A full capture of the page at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    /// All captured nodes; index == [`NodeSnapshot::id`].
    pub nodes: Vec<NodeSnapshot>,

    /// The page's visible text content, one line per text run.
    pub full_text: String,
}

impl PageSnapshot {
    pub fn node(&self, id: NodeId) -> Option<&NodeSnapshot> {
        self.nodes.get(id)
    }

    /// Length of the ancestor chain from this node to the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(p) = current {
            depth += 1;
            current = self.node(p).and_then(|n| n.parent);
        }
        depth
    }

    /// True iff `ancestor` appears on `id`'s parent chain.
    pub fn is_descendant_of(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.node(p).and_then(|n| n.parent);
        }
        false
    }

    /// All nodes in the subtree rooted at `id`, in document order, `id` first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            if let Some(node) = self.node(n) {
                // Reverse so document order pops first.
                for &c in node.children.iter().rev() {
                    stack.push(c);
                }
            }
        }
        out
    }

    /// Concatenated direct text of the subtree rooted at `id`, document order.
    pub fn subtree_text(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        for n in self.subtree(id) {
            if let Some(node) = self.node(n) {
                let t = node.text.trim();
                if !t.is_empty() {
                    parts.push(t);
                }
            }
        }
        parts.join(" ")
    }

    /// Image filenames in the subtree rooted at `id`, in document order.
    pub fn subtree_images(&self, id: NodeId) -> Vec<&str> {
        self.subtree(id)
            .into_iter()
            .filter_map(|n| self.node(n).and_then(|node| node.image_src.as_deref()))
            .collect()
    }

    /// Nearest self-or-ancestor that is interactive, visible and not disabled.
    pub fn enclosing_interactive(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(n) = current {
            let node = self.node(n)?;
            if node.is_interactive && !node.disabled && node.is_visible() {
                return Some(n);
            }
            current = node.parent;
        }
        None
    }

    /// Whether the page's visible text contains `fragment`.
    pub fn contains_text(&self, fragment: &str) -> bool {
        self.full_text.contains(fragment)
    }
}

/// Specification for one node fed to [`SnapshotBuilder`].
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub parent: Option<NodeId>,
    pub tag: &'static str,
    pub text: String,
    pub image: Option<String>,
    pub bbox: Option<BoundingBox>,
    pub visible: bool,
    pub interactive: bool,
    pub disabled: bool,
}

impl NodeSpec {
    /// A visible element with a default 100x20 box.
    pub fn visible(tag: &'static str) -> Self {
        Self {
            tag,
            visible: true,
            ..Default::default()
        }
    }

    pub fn under(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn image(mut self, src: impl Into<String>) -> Self {
        self.image = Some(src.into());
        self
    }

    pub fn bbox(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bbox = Some(BoundingBox::new(x, y, width, height));
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Incremental [`PageSnapshot`] assembly, used by the live CDP capture and by
/// tests that build synthetic pages.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    nodes: Vec<NodeSnapshot>,
    full_text: Option<String>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; returns its id. Parents must be pushed before children.
    pub fn push(&mut self, spec: NodeSpec) -> NodeId {
        let id = self.nodes.len();
        let bbox = spec
            .bbox
            .unwrap_or_else(|| BoundingBox::new(0.0, id as f64 * 24.0, 100.0, 20.0));
        if let Some(parent) = spec.parent {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.push(id);
            }
        }
        self.nodes.push(NodeSnapshot {
            id,
            parent: spec.parent,
            children: Vec::new(),
            tag_name: spec.tag.to_string(),
            text: spec.text,
            image_src: spec.image,
            bounding_box: bbox,
            visible: spec.visible,
            is_interactive: spec.interactive,
            disabled: spec.disabled,
        });
        id
    }

    /// Override the derived page text.
    pub fn full_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.full_text = Some(text.into());
        self
    }

    /// Finish the snapshot. Unless overridden, the page text is the visible
    /// nodes' direct text joined with newlines, mirroring `innerText`.
    pub fn finish(self) -> PageSnapshot {
        let full_text = self.full_text.unwrap_or_else(|| {
            self.nodes
                .iter()
                .filter(|n| n.visible && !n.text.trim().is_empty())
                .map(|n| n.text.trim())
                .collect::<Vec<_>>()
                .join("\n")
        });
        PageSnapshot {
            nodes: self.nodes,
            full_text,
        }
    }
}
