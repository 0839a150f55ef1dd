//! [`Page`] implementation backed by a live CDP session.

use async_trait::async_trait;
use tracing::debug;

use super::error::CdpError;
use super::protocol::CapturePayload;
use super::session::GameSession;
use crate::page::{MouseButton, Page, PageError};
use crate::snapshot::{BoundingBox, NodeSnapshot, PageSnapshot};

/// In-page capture script. Walks the rendered tree once and emits a flat
/// array in document order, parents before children, matching the
/// [`crate::snapshot::NodeSnapshot`] model.
const CAPTURE_JS: &str = r#"
(() => {
  const out = [];
  const walk = (el, parent) => {
    const id = out.length;
    const r = el.getBoundingClientRect();
    const cs = getComputedStyle(el);
    const visible = r.width > 0 && r.height > 0
      && cs.display !== 'none' && cs.visibility !== 'hidden';
    const direct = Array.from(el.childNodes)
      .filter(n => n.nodeType === Node.TEXT_NODE)
      .map(n => n.textContent)
      .join('').trim();
    const tag = el.tagName.toLowerCase();
    const interactive = !!(
      el.onclick
      || ['button', 'a', 'input', 'textarea', 'select'].includes(tag)
      || el.getAttribute('role') === 'button'
      || cs.cursor === 'pointer'
    );
    out.push({
      tag,
      text: direct,
      src: el.currentSrc || el.getAttribute('src') || null,
      x: r.x, y: r.y, w: r.width, h: r.height,
      visible,
      interactive,
      disabled: !!el.disabled,
      parent,
    });
    for (const c of el.children) walk(c, id);
  };
  if (document.body) walk(document.body, null);
  return JSON.stringify({ nodes: out, fullText: document.body ? document.body.innerText : '' });
})()
"#;

/// Build the script that sets an input's value through the native property
/// setter and fires synthetic input/change events, so a framework-controlled
/// input picks up the change. React and friends ignore plain `.value =`.
fn set_value_js(x: f64, y: f64, text: &str) -> String {
    let escaped = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
(() => {{
  const el = document.elementFromPoint({x}, {y});
  if (!el) return false;
  const input = el.matches('input, textarea') ? el : el.querySelector('input, textarea');
  if (!input) return false;
  const proto = input.tagName === 'TEXTAREA'
    ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
  const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
  setter.call(input, {escaped});
  input.dispatchEvent(new Event('input', {{ bubbles: true }}));
  input.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return true;
}})()
"#
    )
}

/// A live game tab accessed over CDP.
pub struct LivePage {
    session: GameSession,
}

impl LivePage {
    pub fn new(session: GameSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Detach the underlying CDP session. Best effort at shutdown; the tab
    /// keeps running without us.
    pub async fn detach(&self) -> Result<(), PageError> {
        self.session
            .detach()
            .await
            .map_err(|e| PageError::Transport(e.to_string()))
    }

    fn parse_capture(raw: &str) -> Result<PageSnapshot, CdpError> {
        let payload: CapturePayload = serde_json::from_str(raw)?;
        let mut nodes: Vec<NodeSnapshot> = Vec::with_capacity(payload.nodes.len());
        for (id, cap) in payload.nodes.into_iter().enumerate() {
            if let Some(parent) = cap.parent {
                if let Some(p) = nodes.get_mut(parent) {
                    p.children.push(id);
                }
            }
            nodes.push(NodeSnapshot {
                id,
                parent: cap.parent,
                children: Vec::new(),
                tag_name: cap.tag,
                text: cap.text,
                image_src: cap.src,
                bounding_box: BoundingBox::new(cap.x, cap.y, cap.w, cap.h),
                visible: cap.visible,
                is_interactive: cap.interactive,
                disabled: cap.disabled,
            });
        }
        Ok(PageSnapshot {
            nodes,
            full_text: payload.full_text,
        })
    }
}

#[async_trait]
impl Page for LivePage {
    async fn snapshot(&self) -> Result<PageSnapshot, PageError> {
        let raw = self
            .session
            .evaluate(CAPTURE_JS)
            .await
            .map_err(|e| PageError::Transport(e.to_string()))?;
        let raw = raw
            .as_str()
            .ok_or_else(|| PageError::Capture("capture script returned non-string".into()))?;
        Self::parse_capture(raw).map_err(|e| PageError::Capture(e.to_string()))
    }

    async fn click(&self, x: f64, y: f64, button: MouseButton) -> Result<(), PageError> {
        self.session
            .click(x, y, button)
            .await
            .map_err(|e| PageError::Injection(e.to_string()))
    }

    async fn set_input_value(&self, x: f64, y: f64, text: &str) -> Result<(), PageError> {
        let ok = self
            .session
            .evaluate(&set_value_js(x, y, text))
            .await
            .map_err(|e| PageError::Transport(e.to_string()))?;
        if ok.as_bool() != Some(true) {
            return Err(PageError::Injection(format!(
                "no input element at ({}, {})",
                x, y
            )));
        }
        debug!("Set input value at ({}, {})", x, y);
        Ok(())
    }

    async fn reload(&self) -> Result<(), PageError> {
        self.session
            .reload()
            .await
            .map_err(|e| PageError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_capture_links_children() {
        let raw = r#"{"nodes":[
            {"tag":"div","text":"","src":null,"x":0,"y":0,"w":800,"h":600,"visible":true,"interactive":false,"parent":null},
            {"tag":"img","text":"","src":"role-priest.png","x":10,"y":10,"w":32,"h":32,"visible":true,"interactive":false,"parent":0}
        ],"fullText":"hello"}"#;
        let snap = LivePage::parse_capture(raw).unwrap();
        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.nodes[0].children, vec![1]);
        assert_eq!(snap.nodes[1].parent, Some(0));
        assert_eq!(snap.full_text, "hello");
    }

    #[test]
    fn set_value_js_escapes_text() {
        let js = set_value_js(10.0, 20.0, "it's \"fine\"");
        assert!(js.contains(r#""it's \"fine\"""#));
        assert!(js.contains("elementFromPoint(10, 20)"));
    }
}
