//! Simulated time and everything that keys off it: enemy spawning, the
//! enhanced-firing window and pickup messages.

use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{EntityId, Message, MessageKind};
use crate::store::EntityStore;

/// Monotonic simulated time.  Only moves when the caller advances it, which
/// the stepper does exclusively while the game is being played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationClock {
    now: Duration,
}

impl SimulationClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.now += dt;
        self.now
    }
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spawner {
    last_spawn: Option<Duration>,
}

impl Spawner {
    /// A spawner whose previous enemy appeared at `at`.
    pub fn last_spawned_at(at: Duration) -> Self {
        Self {
            last_spawn: Some(at),
        }
    }

    /// Whether an enemy is due at `now`.  The first call of a session always
    /// spawns; afterwards strictly more than `interval` must have passed.
    pub fn is_due(&self, now: Duration, interval: Duration) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now.saturating_sub(last) > interval,
        }
    }

    /// Spawn one enemy at a random column along the top edge if one is due.
    pub fn run(
        &mut self,
        now: Duration,
        config: &GameConfig,
        store: &mut EntityStore,
        rng: &mut impl Rng,
    ) -> Option<EntityId> {
        if !self.is_due(now, config.enemy_spawn_interval()) {
            return None;
        }
        self.last_spawn = Some(now);
        let max_x = config.max_x().max(0.0) as u32;
        let x = rng.gen_range(0..=max_x) as f32;
        let id = store.spawn_enemy(x, 0.0);
        debug!(?id, x, "enemy spawned");
        Some(id)
    }
}

// ── Timed effect ──────────────────────────────────────────────────────────────

/// A flag that switches itself off once simulated time passes its expiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimedEffect {
    expires_at: Option<Duration>,
}

impl TimedEffect {
    pub fn is_active(&self) -> bool {
        self.expires_at.is_some()
    }

    pub fn expires_at(&self) -> Option<Duration> {
        self.expires_at
    }

    /// Switch on (or extend) until `now + duration`.
    pub fn activate(&mut self, now: Duration, duration: Duration) {
        self.expires_at = Some(now + duration);
    }

    /// Returns true when this call switched the effect off.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.expires_at {
            Some(at) if now > at => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }
}

// ── Messages ──────────────────────────────────────────────────────────────────

/// Holds the latest pickup message; each new one replaces the previous.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MessageSlot {
    current: Option<Message>,
}

impl MessageSlot {
    pub fn raise(&mut self, kind: MessageKind, now: Duration) {
        self.current = Some(Message { kind, shown_at: now });
    }

    pub fn current(&self) -> Option<Message> {
        self.current
    }

    /// Messages to put on screen at `now`, top line first.
    ///
    /// While enhanced firing is running and the latest message is about
    /// something else, the firing banner stays up above it.
    pub fn visible(
        &self,
        now: Duration,
        config: &GameConfig,
        enhanced_firing: bool,
    ) -> Vec<MessageKind> {
        let fresh = |m: &Message, window: Duration| now.saturating_sub(m.shown_at) < window;

        match self.current {
            Some(m) if m.kind == MessageKind::EnhancedFiring => {
                if fresh(&m, config.enhanced_message_window()) {
                    vec![m.kind]
                } else {
                    Vec::new()
                }
            }
            other => {
                let mut lines = Vec::new();
                if enhanced_firing {
                    lines.push(MessageKind::EnhancedFiring);
                }
                if let Some(m) = other.filter(|m| fresh(m, config.message_window())) {
                    lines.push(m.kind);
                }
                lines
            }
        }
    }
}
