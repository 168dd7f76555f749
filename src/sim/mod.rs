//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, constants expressed per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use background::BackgroundLayer;
pub use collision::{bird_hits_pipe, bird_out_of_bounds, horizontal_overlap, within_gap};
pub use particles::{Particle, ParticlePool};
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe};
pub use tick::{TickInput, tick};
