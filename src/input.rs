//! Per-tick input as the simulation sees it.
//!
//! Movement is level-triggered (held keys).  Every other action is a one-shot
//! edge that the presentation layer computes, so the core never has to clear
//! a flag after using it.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub pause: bool,
    pub start: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Raw "is this key down" levels sampled by a front end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyLevels {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pause: bool,
    pub start: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Rising-edge detector: reports `true` once per press, and only again after
/// the level has dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn update(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}

/// Turns [`KeyLevels`] into an [`InputState`] frame by frame.
#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    fire: EdgeTrigger,
    pause: EdgeTrigger,
    start: EdgeTrigger,
    restart: EdgeTrigger,
    quit: EdgeTrigger,
}

impl InputSampler {
    pub fn sample(&mut self, keys: KeyLevels) -> InputState {
        InputState {
            move_left: keys.left,
            move_right: keys.right,
            fire: self.fire.update(keys.fire),
            pause: self.pause.update(keys.pause),
            start: self.start.update(keys.start),
            restart: self.restart.update(keys.restart),
            quit: self.quit.update(keys.quit),
        }
    }
}
