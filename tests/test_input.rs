use space_invader::input::{EdgeTrigger, InputSampler, KeyLevels};
use space_invader::InputState;

#[test]
fn edge_trigger_fires_once_per_press() {
    let mut edge = EdgeTrigger::default();
    assert!(!edge.update(false));
    assert!(edge.update(true));
    assert!(!edge.update(true));
    assert!(!edge.update(true));
    assert!(!edge.update(false));
    assert!(edge.update(true));
}

#[test]
fn held_fire_produces_a_single_shot() {
    let mut sampler = InputSampler::default();
    let held = KeyLevels {
        fire: true,
        ..KeyLevels::default()
    };
    let shots = (0..10).filter(|_| sampler.sample(held).fire).count();
    assert_eq!(shots, 1);
}

#[test]
fn movement_is_level_triggered() {
    let mut sampler = InputSampler::default();
    let held = KeyLevels {
        left: true,
        ..KeyLevels::default()
    };
    for _ in 0..5 {
        let input = sampler.sample(held);
        assert!(input.move_left);
        assert!(!input.move_right);
    }
}

#[test]
fn each_action_has_its_own_edge() {
    let mut sampler = InputSampler::default();
    let first = sampler.sample(KeyLevels {
        pause: true,
        start: true,
        ..KeyLevels::default()
    });
    assert!(first.pause && first.start);

    let second = sampler.sample(KeyLevels {
        pause: true,
        start: true,
        restart: true,
        quit: true,
        ..KeyLevels::default()
    });
    assert_eq!(
        second,
        InputState {
            restart: true,
            quit: true,
            ..InputState::default()
        }
    );
}

#[test]
fn default_input_is_idle() {
    let idle = InputState::default();
    assert!(!(idle.move_left
        || idle.move_right
        || idle.fire
        || idle.pause
        || idle.start
        || idle.restart
        || idle.quit));
}
