//! Game state and core simulation types
//!
//! One owned `GameState` holds everything a run mutates. Subsystems receive
//! it (or the pieces they need) by reference once per tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particles::Particle;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, book hovering in place
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Simulation bounds supplied by the host, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Fixed horizontal slot of the book (a third of the way across)
    #[inline]
    pub fn book_x(&self) -> f32 {
        self.width / 3.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's book. Its horizontal slot comes from the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Book {
    /// Vertical centre (px, down is positive)
    pub y: f32,
    /// Vertical velocity (px/tick)
    pub velocity: f32,
}

impl Book {
    /// Book parked at mid-screen, at rest
    pub fn centered(viewport: &Viewport) -> Self {
        Self {
            y: viewport.height / 2.0,
            velocity: 0.0,
        }
    }
}

/// A shelf pair (upper and lower slab) with a gap to fly through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_height: f32,
    /// Set once the shelf has been scored
    pub passed: bool,
}

impl Shelf {
    #[inline]
    pub fn right_edge(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    #[inline]
    pub fn gap_center(&self) -> f32 {
        self.gap_top + self.gap_height / 2.0
    }
}

/// Things that happened during a command or tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// START -> PLAYING
    Started,
    /// Jump impulse applied
    Jumped,
    /// A shelf was cleared; carries the new score
    Scored { score: u64 },
    /// PLAYING -> GAME_OVER
    Crashed { score: u64, new_best: bool },
    /// GAME_OVER -> START
    Restarted,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Score of the current run
    pub score: u64,
    /// Best score seen by this session (seeded from storage by the host)
    pub high_score: u64,
    pub book: Book,
    /// Live shelves in spawn order (also left-to-right while playing)
    pub shelves: Vec<Shelf>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Upper bound on live particles, from the quality settings
    pub particle_budget: usize,
    /// Ticks since the current run (or start screen) began
    pub frame_count: u64,
    /// Ticks since the session began, never reset
    pub time_ticks: u64,
    /// Pending events for the caller
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new state on the start screen with default tuning
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self::with_tuning(seed, viewport, Tuning::default())
    }

    pub fn with_tuning(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            viewport,
            phase: GamePhase::Start,
            score: 0,
            high_score: 0,
            book: Book::centered(&viewport),
            shelves: Vec::new(),
            particles: Vec::new(),
            particle_budget: usize::MAX,
            frame_count: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Clear everything belonging to a run. High score and clocks survive.
    pub fn reset_run(&mut self) {
        self.score = 0;
        self.book = Book::centered(&self.viewport);
        self.shelves.clear();
        self.particles.clear();
        self.frame_count = 0;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
