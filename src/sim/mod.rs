//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time enters through `tick`'s arguments, never from ambient clocks
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Rect, bird_hits_pipe};
pub use state::{Bird, GameEvent, GamePhase, GameState, Particle, Pipe, Star};
pub use tick::{TickInput, tick};
