//! Tunable constants.  Everything the simulation needs to know about the
//! playfield and the rules lives in [`GameConfig`]; the defaults reproduce the
//! classic 800×600 game.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Fixed entity geometry ────────────────────────────────────────────────────

pub const PLAYER_SIZE: f32 = 50.0;
pub const ENEMY_SIZE: f32 = 50.0;
pub const DROP_SIZE: f32 = 30.0;
pub const BULLET_WIDTH: f32 = 5.0;
pub const BULLET_HEIGHT: f32 = 10.0;

/// Horizontal offset from the player's left edge to the muzzle.
pub const MUZZLE_OFFSET_X: f32 = 20.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub player_speed: f32,
    /// Applies to enemies and to the drops they leave behind.
    pub enemy_speed: f32,
    pub enemy_spawn_interval_ms: u64,
    pub bullet_speed: f32,
    /// How far above the player a straight bullet may travel.
    pub bullet_range: f32,
    pub diagonal_drift: f32,
    pub drop_chance: f64,
    pub enhanced_firing_ms: u64,
    pub kill_reward: i64,
    pub pickup_reward: i64,
    pub penalty: i64,
    pub message_window_ms: u64,
    pub enhanced_message_window_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            player_speed: 4.0,
            enemy_speed: 2.0,
            enemy_spawn_interval_ms: 2_000,
            bullet_speed: 5.0,
            bullet_range: 400.0,
            diagonal_drift: 2.5,
            drop_chance: 0.6,
            enhanced_firing_ms: 5_000,
            kill_reward: 100,
            pickup_reward: 50,
            penalty: 50,
            message_window_ms: 2_000,
            enhanced_message_window_ms: 5_000,
        }
    }
}

impl GameConfig {
    /// Load a JSON config.  Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width >= PLAYER_SIZE) {
            return Err(invalid("width", format!("must be at least {PLAYER_SIZE}")));
        }
        if !(self.height.is_finite() && self.height >= PLAYER_SIZE) {
            return Err(invalid("height", format!("must be at least {PLAYER_SIZE}")));
        }
        for (field, value) in [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_range", self.bullet_range),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }
        if !self.diagonal_drift.is_finite() {
            return Err(invalid("diagonal_drift", "must be finite".to_string()));
        }
        if !(0.0..=1.0).contains(&self.drop_chance) {
            return Err(invalid(
                "drop_chance",
                format!("must be within [0, 1], got {}", self.drop_chance),
            ));
        }
        if self.enemy_spawn_interval_ms == 0 {
            return Err(invalid("enemy_spawn_interval_ms", "must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn enemy_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_interval_ms)
    }

    pub fn enhanced_firing_duration(&self) -> Duration {
        Duration::from_millis(self.enhanced_firing_ms)
    }

    pub fn message_window(&self) -> Duration {
        Duration::from_millis(self.message_window_ms)
    }

    pub fn enhanced_message_window(&self) -> Duration {
        Duration::from_millis(self.enhanced_message_window_ms)
    }

    /// Rightmost x a 50-wide body may occupy.
    pub fn max_x(&self) -> f32 {
        self.width - PLAYER_SIZE
    }

    pub fn player_start(&self) -> (f32, f32) {
        (self.width / 2.0 - PLAYER_SIZE / 2.0, self.height - PLAYER_SIZE)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
