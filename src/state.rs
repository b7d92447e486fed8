//! Score keeping and the lifecycle state machine.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Title screen; nothing simulates.
    #[default]
    Title,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Start,
    Stop,
    TogglePause,
    GameOver,
}

impl Lifecycle {
    /// Transition table.  `None` means the transition is not allowed from
    /// `self` and must be ignored.
    pub fn next(self, transition: Transition) -> Option<Lifecycle> {
        use Lifecycle::*;
        match (self, transition) {
            (_, Transition::Start) => Some(Playing),
            (_, Transition::Stop) => Some(Title),
            (Playing, Transition::TogglePause) => Some(Paused),
            (Paused, Transition::TogglePause) => Some(Playing),
            (Playing, Transition::GameOver) => Some(GameOver),
            _ => None,
        }
    }

    /// Whether entities move this frame.
    pub fn simulates(self) -> bool {
        self == Lifecycle::Playing
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    score: i64,
    lifecycle: Lifecycle,
    penalty: i64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(50)
    }
}

impl GameState {
    pub fn new(penalty: i64) -> Self {
        Self {
            score: 0,
            lifecycle: Lifecycle::Title,
            penalty,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_over(&self) -> bool {
        self.lifecycle == Lifecycle::GameOver
    }

    /// Enter `Playing`.  Leaves the score alone.
    pub fn start(&mut self) -> bool {
        self.apply(Transition::Start)
    }

    pub fn stop(&mut self) -> bool {
        self.apply(Transition::Stop)
    }

    /// `Playing` ⇄ `Paused`; ignored on the title screen and after game over.
    pub fn toggle_pause(&mut self) -> bool {
        self.apply(Transition::TogglePause)
    }

    pub fn set_game_over(&mut self) -> bool {
        self.apply(Transition::GameOver)
    }

    /// Zero the score and return to the title screen.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lifecycle = Lifecycle::Title;
    }

    pub fn increase_score(&mut self, points: i64) {
        self.score += points;
    }

    /// Subtract the fixed penalty.  The score is allowed to go negative.
    pub fn decrease_score(&mut self) {
        self.score -= self.penalty;
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match self.lifecycle.next(transition) {
            Some(next) => {
                if next != self.lifecycle {
                    debug!(from = ?self.lifecycle, to = ?next, "lifecycle transition");
                }
                self.lifecycle = next;
                true
            }
            None => {
                debug!(state = ?self.lifecycle, ?transition, "transition ignored");
                false
            }
        }
    }
}
