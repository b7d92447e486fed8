use space_invader::state::Transition;
use space_invader::{GameState, Lifecycle};

// ── Transition table ──────────────────────────────────────────────────────────

#[test]
fn transition_table() {
    use Lifecycle::*;
    let cases = [
        (Title, Transition::Start, Some(Playing)),
        (Title, Transition::TogglePause, None),
        (Title, Transition::GameOver, None),
        (Playing, Transition::TogglePause, Some(Paused)),
        (Paused, Transition::TogglePause, Some(Playing)),
        (Playing, Transition::GameOver, Some(GameOver)),
        (Paused, Transition::GameOver, None),
        (GameOver, Transition::TogglePause, None),
        (GameOver, Transition::Start, Some(Playing)),
        (Paused, Transition::Start, Some(Playing)),
        (Playing, Transition::Stop, Some(Title)),
        (Paused, Transition::Stop, Some(Title)),
        (GameOver, Transition::Stop, Some(Title)),
    ];
    for (from, transition, expected) in cases {
        assert_eq!(from.next(transition), expected, "{from:?} + {transition:?}");
    }
}

#[test]
fn only_playing_simulates() {
    assert!(Lifecycle::Playing.simulates());
    assert!(!Lifecycle::Title.simulates());
    assert!(!Lifecycle::Paused.simulates());
    assert!(!Lifecycle::GameOver.simulates());
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn new_state_is_title_with_zero_score() {
    let s = GameState::default();
    assert_eq!(s.lifecycle(), Lifecycle::Title);
    assert_eq!(s.score(), 0);
}

#[test]
fn start_keeps_score() {
    let mut s = GameState::default();
    s.increase_score(250);
    assert!(s.start());
    assert_eq!(s.lifecycle(), Lifecycle::Playing);
    assert_eq!(s.score(), 250);
}

#[test]
fn start_clears_pause_and_game_over() {
    let mut s = GameState::default();
    s.start();
    s.toggle_pause();
    s.start();
    assert_eq!(s.lifecycle(), Lifecycle::Playing);

    s.set_game_over();
    s.start();
    assert_eq!(s.lifecycle(), Lifecycle::Playing);
}

#[test]
fn toggle_pause_is_noop_outside_play() {
    let mut s = GameState::default();
    assert!(!s.toggle_pause());
    assert_eq!(s.lifecycle(), Lifecycle::Title);

    s.start();
    s.set_game_over();
    assert!(!s.toggle_pause());
    assert!(s.is_over());
}

#[test]
fn game_over_only_from_playing() {
    let mut s = GameState::default();
    assert!(!s.set_game_over());
    s.start();
    s.toggle_pause();
    assert!(!s.set_game_over());
    s.toggle_pause();
    assert!(s.set_game_over());
    assert_eq!(s.lifecycle(), Lifecycle::GameOver);
}

#[test]
fn stop_returns_to_title_without_touching_score() {
    let mut s = GameState::default();
    s.start();
    s.increase_score(100);
    s.stop();
    assert_eq!(s.lifecycle(), Lifecycle::Title);
    assert_eq!(s.score(), 100);
}

#[test]
fn reset_zeroes_score_and_returns_to_title() {
    let mut s = GameState::default();
    s.start();
    s.increase_score(900);
    s.set_game_over();
    s.reset();
    assert_eq!(s.score(), 0);
    assert_eq!(s.lifecycle(), Lifecycle::Title);
}

#[test]
fn decrease_score_is_not_clamped() {
    let mut s = GameState::default();
    s.decrease_score();
    assert_eq!(s.score(), -50);
    s.decrease_score();
    assert_eq!(s.score(), -100);
}

#[test]
fn penalty_follows_construction() {
    let mut s = GameState::new(75);
    s.increase_score(100);
    s.decrease_score();
    assert_eq!(s.score(), 25);
}
