//! Collision detection and its consequences.
//!
//! Categories are checked in a fixed order once per tick:
//!
//! 1. player ↔ enemy: the first hit ends the game and nothing else is
//!    resolved that tick;
//! 2. bullet ↔ enemy: only the first overlapping pair found is resolved;
//! 3. player ↔ drop: every overlapping drop is collected.

use rand::Rng;
use tracing::{debug, info};

use crate::compute::SimulationContext;
use crate::entities::{DropItem, DropKind, EntityId, MessageKind};

/// What happened during one call to [`resolve`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub player_hit: bool,
    /// `(bullet, enemy)` pair destroyed this tick.
    pub kill: Option<(EntityId, EntityId)>,
    pub drop_spawned: Option<EntityId>,
    pub collected: Vec<DropKind>,
}

pub fn resolve(ctx: &mut SimulationContext, rng: &mut impl Rng) -> CollisionReport {
    let mut report = CollisionReport::default();

    // ── 1. Player ↔ enemy ─────────────────────────────────────────────────────
    let player_box = ctx.player.bounds();
    if let Some(enemy) = ctx
        .store
        .enemies()
        .iter()
        .find(|e| e.bounds().overlaps(&player_box))
    {
        info!(enemy = ?enemy.id, score = ctx.state.score(), "player hit, game over");
        ctx.state.set_game_over();
        report.player_hit = true;
        return report;
    }

    // ── 2. Bullet ↔ enemy ─────────────────────────────────────────────────────
    if let Some((bi, ei)) = first_bullet_hit(ctx) {
        let bullet = ctx.store.remove_bullet(bi);
        let enemy = ctx.store.remove_enemy(ei);
        ctx.state.increase_score(ctx.config.kill_reward);
        report.kill = Some((bullet.id, enemy.id));
        debug!(bullet = ?bullet.id, enemy = ?enemy.id, score = ctx.state.score(), "enemy destroyed");

        if rng.gen_bool(ctx.config.drop_chance) {
            let kind = DropKind::from_index(rng.gen_range(0..DropKind::ALL.len()));
            let id = ctx.store.spawn_drop(enemy.x, enemy.y, kind);
            debug!(?id, ?kind, "drop spawned");
            report.drop_spawned = Some(id);
        }
        return report;
    }

    // ── 3. Player ↔ drops ─────────────────────────────────────────────────────
    let collected = ctx
        .store
        .take_drops_where(|d| d.bounds().overlaps(&player_box));
    for drop in &collected {
        apply_drop(ctx, drop);
    }
    report.collected = collected.into_iter().map(|d| d.kind).collect();

    report
}

/// Indices of the first overlapping bullet/enemy pair, scanning bullets in
/// order and each bullet against every enemy.
fn first_bullet_hit(ctx: &SimulationContext) -> Option<(usize, usize)> {
    let enemies = ctx.store.enemies();
    ctx.store.bullets().iter().enumerate().find_map(|(bi, bullet)| {
        let bullet_box = bullet.bounds();
        enemies
            .iter()
            .position(|e| bullet_box.overlaps(&e.bounds()))
            .map(|ei| (bi, ei))
    })
}

fn apply_drop(ctx: &mut SimulationContext, drop: &DropItem) {
    let now = ctx.clock.now();
    match drop.kind {
        DropKind::Penalty => ctx.state.decrease_score(),
        DropKind::BonusScore => ctx.state.increase_score(ctx.config.pickup_reward),
        DropKind::BonusFiring => ctx
            .enhanced_firing
            .activate(now, ctx.config.enhanced_firing_duration()),
    }
    ctx.messages.raise(MessageKind::from(drop.kind), now);
    debug!(drop = ?drop.id, kind = ?drop.kind, score = ctx.state.score(), "drop collected");
}
