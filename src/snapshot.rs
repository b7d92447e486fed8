//! Render-ready view of one frame.

use serde::Serialize;

use crate::entities::{Bullet, DropItem, Enemy, MessageColor, MessageKind, Player};
use crate::state::Lifecycle;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageLine {
    pub text: &'static str,
    pub color: MessageColor,
}

impl From<MessageKind> for MessageLine {
    fn from(kind: MessageKind) -> Self {
        Self {
            text: kind.text(),
            color: kind.color(),
        }
    }
}

/// Everything a presentation layer needs to draw the frame.  Owns copies, so
/// it can outlive the context that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub lifecycle: Lifecycle,
    pub score: i64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub drops: Vec<DropItem>,
    /// Only messages still inside their display window, top line first.
    pub messages: Vec<MessageLine>,
    pub enhanced_firing: bool,
    pub elapsed_ms: u64,
    pub width: f32,
    pub height: f32,
}
