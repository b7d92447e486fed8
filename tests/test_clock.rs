use std::time::Duration;

use space_invader::clock::{MessageSlot, SimulationClock, Spawner, TimedEffect};
use space_invader::entities::MessageKind;
use space_invader::store::EntityStore;
use space_invader::GameConfig;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── SimulationClock ───────────────────────────────────────────────────────────

#[test]
fn clock_accumulates() {
    let mut clock = SimulationClock::default();
    assert_eq!(clock.now(), Duration::ZERO);
    clock.advance(ms(16));
    assert_eq!(clock.advance(ms(20)), ms(36));
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn fresh_spawner_is_due_immediately() {
    assert!(Spawner::default().is_due(Duration::ZERO, ms(2_000)));
}

#[test]
fn spawner_waits_strictly_longer_than_interval() {
    let spawner = Spawner::last_spawned_at(ms(1_000));
    assert!(!spawner.is_due(ms(3_000), ms(2_000)));
    assert!(spawner.is_due(ms(3_001), ms(2_000)));
}

#[test]
fn spawner_places_enemies_on_top_edge_within_bounds() {
    let config = GameConfig::default();
    let mut store = EntityStore::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut spawner = Spawner::default();

    let mut now = Duration::ZERO;
    for _ in 0..200 {
        spawner.run(now, &config, &mut store, &mut rng);
        now += ms(2_001);
    }

    assert_eq!(store.enemies().len(), 200);
    for e in store.enemies() {
        assert_eq!(e.y, 0.0);
        assert!((0.0..=750.0).contains(&e.x), "x out of range: {}", e.x);
        assert_eq!(e.x.fract(), 0.0);
    }
}

#[test]
fn spawner_does_nothing_when_not_due() {
    let config = GameConfig::default();
    let mut store = EntityStore::new();
    let mut rng = StdRng::seed_from_u64(9);
    let mut spawner = Spawner::default();

    assert!(spawner.run(ms(0), &config, &mut store, &mut rng).is_some());
    assert!(spawner.run(ms(1_500), &config, &mut store, &mut rng).is_none());
    assert_eq!(store.enemies().len(), 1);
}

// ── TimedEffect ───────────────────────────────────────────────────────────────

#[test]
fn timed_effect_expires_only_after_deadline() {
    let mut effect = TimedEffect::default();
    assert!(!effect.is_active());

    effect.activate(ms(1_000), ms(5_000));
    assert_eq!(effect.expires_at(), Some(ms(6_000)));
    assert!(!effect.expire(ms(6_000)));
    assert!(effect.is_active());
    assert!(effect.expire(ms(6_001)));
    assert!(!effect.is_active());
    assert!(!effect.expire(ms(7_000)));
}

#[test]
fn reactivating_extends_the_window() {
    let mut effect = TimedEffect::default();
    effect.activate(ms(0), ms(5_000));
    effect.activate(ms(4_000), ms(5_000));
    assert!(!effect.expire(ms(8_000)));
    assert_eq!(effect.expires_at(), Some(ms(9_000)));
}

// ── MessageSlot ───────────────────────────────────────────────────────────────

#[test]
fn no_message_shows_nothing() {
    let slot = MessageSlot::default();
    assert!(slot.visible(ms(0), &GameConfig::default(), false).is_empty());
}

#[test]
fn reward_message_lasts_two_seconds() {
    let config = GameConfig::default();
    let mut slot = MessageSlot::default();
    slot.raise(MessageKind::Reward, ms(1_000));

    assert_eq!(slot.visible(ms(2_999), &config, false), vec![MessageKind::Reward]);
    assert!(slot.visible(ms(3_000), &config, false).is_empty());
}

#[test]
fn enhanced_firing_message_lasts_five_seconds() {
    let config = GameConfig::default();
    let mut slot = MessageSlot::default();
    slot.raise(MessageKind::EnhancedFiring, ms(0));

    assert_eq!(
        slot.visible(ms(4_999), &config, true),
        vec![MessageKind::EnhancedFiring]
    );
    assert!(slot.visible(ms(5_000), &config, true).is_empty());
}

#[test]
fn firing_banner_stays_above_newer_message() {
    let config = GameConfig::default();
    let mut slot = MessageSlot::default();
    slot.raise(MessageKind::EnhancedFiring, ms(0));
    slot.raise(MessageKind::Penalty, ms(1_000));

    assert_eq!(
        slot.visible(ms(1_500), &config, true),
        vec![MessageKind::EnhancedFiring, MessageKind::Penalty]
    );
    // Penalty window over, banner still up while the effect runs.
    assert_eq!(
        slot.visible(ms(3_500), &config, true),
        vec![MessageKind::EnhancedFiring]
    );
    assert!(slot.visible(ms(5_500), &config, false).is_empty());
}
