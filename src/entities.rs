//! Game entity types.  Plain data; the rules live elsewhere.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{BULLET_HEIGHT, BULLET_WIDTH, DROP_SIZE, ENEMY_SIZE, PLAYER_SIZE};

/// Identity issued by the [`EntityStore`](crate::store::EntityStore).  Never
/// reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box, top-left origin, y grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open overlap test; boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_SIZE, PLAYER_SIZE)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum BulletKind {
    Straight,
    /// Moves up like a straight bullet and sideways by `drift` every tick.
    Angled { drift: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub kind: BulletKind,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn drift(&self) -> f32 {
        match self.kind {
            BulletKind::Straight => 0.0,
            BulletKind::Angled { drift } => drift,
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

// ── Drops ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    /// Costs the player points.
    Penalty,
    /// Adds the pickup reward.
    BonusScore,
    /// Turns on triple-shot for a while.
    BonusFiring,
}

impl DropKind {
    pub const ALL: [DropKind; 3] = [DropKind::Penalty, DropKind::BonusScore, DropKind::BonusFiring];

    /// Maps 0, 1, 2 to the three kinds; anything else wraps around.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Collectible left behind by a destroyed enemy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropItem {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub kind: DropKind,
}

impl DropItem {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, DROP_SIZE, DROP_SIZE)
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageColor {
    Red,
    Green,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Penalty,
    Reward,
    EnhancedFiring,
}

impl MessageKind {
    pub fn text(&self) -> &'static str {
        match self {
            MessageKind::Penalty => "Penalty! -50 points",
            MessageKind::Reward => "Reward! +50 points",
            MessageKind::EnhancedFiring => "Enhanced Firing Activated!",
        }
    }

    pub fn color(&self) -> MessageColor {
        match self {
            MessageKind::Penalty => MessageColor::Red,
            MessageKind::Reward | MessageKind::EnhancedFiring => MessageColor::Green,
        }
    }
}

impl From<DropKind> for MessageKind {
    fn from(kind: DropKind) -> Self {
        match kind {
            DropKind::Penalty => MessageKind::Penalty,
            DropKind::BonusScore => MessageKind::Reward,
            DropKind::BonusFiring => MessageKind::EnhancedFiring,
        }
    }
}

/// The most recent pickup message and the simulated time it was raised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub shown_at: Duration,
}
