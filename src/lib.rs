//! Simulation core for a single-screen arcade shooter.
//!
//! The library never touches the terminal: it consumes an [`InputState`]
//! per frame and hands back a [`RenderSnapshot`].  The `space_invader`
//! binary is one presentation layer on top of it.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod store;

pub use compute::{tick, SimulationContext};
pub use config::GameConfig;
pub use error::ConfigError;
pub use input::InputState;
pub use snapshot::RenderSnapshot;
pub use state::{GameState, Lifecycle};
