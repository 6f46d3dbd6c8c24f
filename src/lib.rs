//! Wisdom Wings - a one-button arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, shelves, collisions, particles, phases)
//! - `session`: Owns a run plus its stores; the surface the host talks to
//! - `snapshot`: Read-only frame data handed to the renderer and HUD
//! - `renderer`: WebGPU rendering of a snapshot
//! - `platform`: Browser input mapping
//! - `persistence`: Key-value storage seam (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use highscores::BestScore;
pub use session::Session;
pub use settings::{QualityPreset, Settings};
pub use snapshot::RenderSnapshot;
pub use tuning::Tuning;

/// Linear RGBA colour, 0-1 per channel
pub type Rgba = [f32; 4];

/// Game configuration constants
///
/// One unit of time is one display refresh ("tick"); velocities are px/tick.
pub mod consts {
    /// Downward acceleration applied every tick
    pub const GRAVITY: f32 = 0.5;
    /// Velocity the book is set to on jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -8.0;

    /// Shelf defaults
    pub const SHELF_SPEED: f32 = 3.5;
    pub const SHELF_SPAWN_INTERVAL: u64 = 100;
    pub const SHELF_GAP_HEIGHT: f32 = 180.0;
    pub const SHELF_WIDTH: f32 = 60.0;
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 50.0;

    /// Book hitbox, centred on the book slot
    pub const BOOK_HALF_WIDTH: f32 = 15.0;
    pub const BOOK_HALF_HEIGHT: f32 = 10.0;
    /// Game over once the book sinks below `height - FLOOR_MARGIN`
    pub const FLOOR_MARGIN: f32 = 10.0;

    /// Idle hover on the start screen (0.003 rad/ms at 60 Hz)
    pub const HOVER_AMPLITUDE: f32 = 20.0;
    pub const HOVER_FREQUENCY: f32 = 0.05;

    /// Particles
    pub const PARTICLE_DECAY: f32 = 0.015;
    pub const DUST_CAP: usize = 30;
    pub const DUST_SPAWN_CHANCE: f32 = 0.1;
    pub const TRAIL_INTERVAL: u64 = 5;
    pub const JUMP_BURST: usize = 5;
    pub const SCORE_BURST: usize = 10;
}

/// Colour palette shared by the simulation (particle tints) and the renderer
pub mod palette {
    use super::Rgba;

    pub const BG_TOP: Rgba = [0.0, 0.2, 0.4, 1.0];
    pub const BG_BOTTOM: Rgba = [0.314, 0.447, 0.576, 1.0];
    pub const BOOK_GLOW: Rgba = [0.8, 0.898, 1.0, 1.0];
    pub const BOOK_PAGE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const SHELF_EDGE: Rgba = [0.008, 0.024, 0.09, 1.0];
    pub const SHELF_BODY: Rgba = [0.059, 0.09, 0.165, 1.0];
    pub const SHELF_HIGHLIGHT: Rgba = [0.118, 0.161, 0.231, 1.0];
    pub const SHELF_SHINE: Rgba = [1.0, 1.0, 1.0, 0.05];
    pub const SHELF_PLANK: Rgba = [0.0, 0.0, 0.0, 0.4];
    pub const SPARKLE: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const PARTICLE_BLUE: Rgba = [0.647, 0.953, 0.988, 1.0];
    pub const DUST: Rgba = [1.0, 1.0, 1.0, 0.2];
}

/// Scale the alpha channel of a colour
#[inline]
pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
    [color[0], color[1], color[2], color[3] * alpha]
}
