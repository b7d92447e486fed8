//! Ownership of every moving entity.
//!
//! Entities are only ever removed in one of three ways, none of which can
//! skip or revisit an element: a single `retain_mut` pass during
//! [`EntityStore::advance`], a partition in [`EntityStore::take_drops_where`],
//! or an index removal after the caller's scan has already finished.

use crate::config::GameConfig;
use crate::entities::{Bullet, BulletKind, DropItem, DropKind, Enemy, EntityId};

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    drops: Vec<DropItem>,
    next_id: u64,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn drops(&self) -> &[DropItem] {
        &self.drops
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty() && self.enemies.is_empty() && self.drops.is_empty()
    }

    /// Drop every entity.  Ids keep counting so a new session never reuses one.
    pub fn clear(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
        self.drops.clear();
    }

    // ── Creation ─────────────────────────────────────────────────────────────

    pub fn spawn_bullet(&mut self, x: f32, y: f32, kind: BulletKind) -> EntityId {
        let id = self.issue_id();
        self.bullets.push(Bullet { id, x, y, kind });
        id
    }

    pub fn spawn_enemy(&mut self, x: f32, y: f32) -> EntityId {
        let id = self.issue_id();
        self.enemies.push(Enemy { id, x, y });
        id
    }

    pub fn spawn_drop(&mut self, x: f32, y: f32, kind: DropKind) -> EntityId {
        let id = self.issue_id();
        self.drops.push(DropItem { id, x, y, kind });
        id
    }

    fn issue_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Motion ───────────────────────────────────────────────────────────────

    /// Move every entity one tick and cull whatever left the playfield.
    ///
    /// `player_y` anchors the travel limit of straight bullets.
    pub fn advance(&mut self, config: &GameConfig, player_y: f32) {
        let travel_limit = player_y - config.bullet_range;
        self.bullets.retain_mut(|b| {
            b.y -= config.bullet_speed;
            b.x += b.drift();
            if b.kind == BulletKind::Straight && b.y < travel_limit {
                return false;
            }
            !(b.y < 0.0 || b.x < 0.0 || b.x > config.width)
        });

        self.enemies.retain_mut(|e| {
            e.y += config.enemy_speed;
            e.y < config.height
        });

        self.drops.retain_mut(|d| {
            d.y += config.enemy_speed;
            d.y < config.height
        });
    }

    // ── Removal ──────────────────────────────────────────────────────────────

    pub fn remove_bullet(&mut self, index: usize) -> Bullet {
        self.bullets.remove(index)
    }

    pub fn remove_enemy(&mut self, index: usize) -> Enemy {
        self.enemies.remove(index)
    }

    /// Split off every drop matching `pred`, in list order.
    pub fn take_drops_where(&mut self, mut pred: impl FnMut(&DropItem) -> bool) -> Vec<DropItem> {
        let (taken, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.drops).into_iter().partition(|d| pred(d));
        self.drops = kept;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_kinds_and_clears() {
        let mut store = EntityStore::new();
        let a = store.spawn_bullet(0.0, 0.0, BulletKind::Straight);
        let b = store.spawn_enemy(0.0, 0.0);
        store.clear();
        let c = store.spawn_drop(0.0, 0.0, DropKind::Penalty);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(c, EntityId(2));
    }

    #[test]
    fn adjacent_enemies_both_culled_in_one_pass() {
        let config = GameConfig::default();
        let mut store = EntityStore::new();
        store.spawn_enemy(0.0, 599.0);
        store.spawn_enemy(100.0, 598.0);
        store.spawn_enemy(200.0, 10.0);
        store.advance(&config, 550.0);
        assert_eq!(store.enemies().len(), 1);
        assert_eq!(store.enemies()[0].x, 200.0);
    }

    #[test]
    fn take_drops_where_keeps_order_of_the_rest() {
        let mut store = EntityStore::new();
        store.spawn_drop(1.0, 0.0, DropKind::Penalty);
        store.spawn_drop(2.0, 0.0, DropKind::BonusScore);
        store.spawn_drop(3.0, 0.0, DropKind::BonusFiring);
        let taken = store.take_drops_where(|d| d.kind == DropKind::BonusScore);
        assert_eq!(taken.len(), 1);
        let xs: Vec<f32> = store.drops().iter().map(|d| d.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
    }
}
