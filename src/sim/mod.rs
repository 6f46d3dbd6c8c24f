//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock scaling
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod particles;
pub mod physics;
pub mod shelves;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Collision};
pub use particles::{Particle, ParticleKind};
pub use state::{Book, GameEvent, GamePhase, GameState, Shelf, Viewport};
pub use tick::{Command, TickInput, apply_command, autopilot_wants_jump, tick};
