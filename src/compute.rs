//! Frame stepping.
//!
//! Every piece of mutable game state lives in a [`SimulationContext`] that the
//! caller owns and lends to [`tick`] once per presentation frame.  All
//! randomness comes through the injected RNG, so a seeded RNG plus a fixed
//! input sequence always reproduces the same game.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::{MessageSlot, SimulationClock, Spawner, TimedEffect};
use crate::collision::{self, CollisionReport};
use crate::config::{GameConfig, MUZZLE_OFFSET_X};
use crate::entities::{BulletKind, Player};
use crate::error::ConfigError;
use crate::input::InputState;
use crate::snapshot::{MessageLine, RenderSnapshot};
use crate::state::{GameState, Lifecycle};
use crate::store::EntityStore;

#[derive(Clone, Debug)]
pub struct SimulationContext {
    pub config: GameConfig,
    pub state: GameState,
    pub store: EntityStore,
    pub player: Player,
    pub clock: SimulationClock,
    pub spawner: Spawner,
    pub enhanced_firing: TimedEffect,
    pub messages: MessageSlot,
}

impl SimulationContext {
    /// Fresh session sitting on the title screen.
    ///
    /// `config` is taken as is and must already pass
    /// [`GameConfig::validate`]; an out-of-range `drop_chance` panics on the
    /// first kill.  Use [`SimulationContext::try_new`] for configs built in
    /// code.
    pub fn new(config: GameConfig) -> Self {
        let (x, y) = config.player_start();
        Self {
            state: GameState::new(config.penalty),
            store: EntityStore::new(),
            player: Player { x, y },
            clock: SimulationClock::default(),
            spawner: Spawner::default(),
            enhanced_firing: TimedEffect::default(),
            messages: MessageSlot::default(),
            config,
        }
    }

    /// Validate `config`, then start a fresh session on the title screen.
    pub fn try_new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Back to the title screen with score, entities and timers cleared.
    /// Simulated time keeps running forward.
    pub fn reset(&mut self) {
        let (x, y) = self.config.player_start();
        self.state.reset();
        self.store.clear();
        self.player = Player { x, y };
        self.spawner = Spawner::default();
        self.enhanced_firing = TimedEffect::default();
        self.messages = MessageSlot::default();
        info!("session reset");
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let now = self.clock.now();
        let messages = self
            .messages
            .visible(now, &self.config, self.enhanced_firing.is_active())
            .into_iter()
            .map(MessageLine::from)
            .collect();

        RenderSnapshot {
            lifecycle: self.state.lifecycle(),
            score: self.state.score(),
            player: self.player.clone(),
            bullets: self.store.bullets().to_vec(),
            enemies: self.store.enemies().to_vec(),
            drops: self.store.drops().to_vec(),
            messages,
            enhanced_firing: self.enhanced_firing.is_active(),
            elapsed_ms: now.as_millis() as u64,
            width: self.config.width,
            height: self.config.height,
        }
    }
}

// ── Input-driven actions ─────────────────────────────────────────────────────

pub fn move_player_left(ctx: &mut SimulationContext) {
    ctx.player.x = (ctx.player.x - ctx.config.player_speed).clamp(0.0, ctx.config.max_x());
}

pub fn move_player_right(ctx: &mut SimulationContext) {
    ctx.player.x = (ctx.player.x + ctx.config.player_speed).clamp(0.0, ctx.config.max_x());
}

/// Fire from the muzzle: one straight bullet, or a three-way spread while
/// enhanced firing is active.
///
/// Every bullet of a spread is angled, the centre one with zero drift, so
/// none of them is held to the straight-shot travel limit.
pub fn player_shoot(ctx: &mut SimulationContext) {
    let x = ctx.player.x + MUZZLE_OFFSET_X;
    let y = ctx.player.y;
    if !ctx.enhanced_firing.is_active() {
        ctx.store.spawn_bullet(x, y, BulletKind::Straight);
        return;
    }
    let spread = ctx.config.diagonal_drift;
    for drift in [0.0, spread, -spread] {
        ctx.store.spawn_bullet(x, y, BulletKind::Angled { drift });
    }
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

/// Apply the one-shot lifecycle edges and report whether the lifecycle
/// changed.  Precedence: quit, restart, start, pause.  Edges that make no
/// sense in the current state are ignored.
fn apply_lifecycle_input(ctx: &mut SimulationContext, input: &InputState) -> bool {
    let lifecycle = ctx.state.lifecycle();

    if input.quit && lifecycle != Lifecycle::Title {
        ctx.reset();
        return true;
    }

    match lifecycle {
        Lifecycle::GameOver if input.restart => {
            ctx.reset();
            ctx.state.start();
            info!("restarted");
            true
        }
        Lifecycle::Title if input.start => ctx.state.start(),
        Lifecycle::Playing | Lifecycle::Paused if input.pause => ctx.state.toggle_pause(),
        _ => false,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one presentation frame of length `dt` and return what
/// to draw.
///
/// Outside of `Playing` nothing moves and simulated time stands still; the
/// returned snapshot just reflects the current state.  A frame that changes
/// the lifecycle is spent on the transition, so the first simulated frame
/// after start, resume or restart is the next one.
pub fn tick(
    ctx: &mut SimulationContext,
    input: &InputState,
    dt: Duration,
    rng: &mut impl Rng,
) -> RenderSnapshot {
    let transitioned = apply_lifecycle_input(ctx, input);
    if !transitioned && ctx.state.lifecycle().simulates() {
        advance_playing(ctx, input, dt, rng);
    }
    ctx.snapshot()
}

fn advance_playing(
    ctx: &mut SimulationContext,
    input: &InputState,
    dt: Duration,
    rng: &mut impl Rng,
) {
    let now = ctx.clock.advance(dt);
    if ctx.enhanced_firing.expire(now) {
        debug!("enhanced firing expired");
    }

    if input.move_left {
        move_player_left(ctx);
    }
    if input.move_right {
        move_player_right(ctx);
    }
    if input.fire {
        player_shoot(ctx);
    }

    ctx.store.advance(&ctx.config, ctx.player.y);
    ctx.spawner.run(now, &ctx.config, &mut ctx.store, rng);

    let report = collision::resolve(ctx, rng);
    if report != CollisionReport::default() {
        debug!(
            player_hit = report.player_hit,
            kill = ?report.kill,
            drop = ?report.drop_spawned,
            collected = ?report.collected,
            score = ctx.state.score(),
            "collisions resolved"
        );
    }
}
