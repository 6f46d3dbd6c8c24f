//! Render snapshot
//!
//! The read-only view of a tick that the renderer and HUD consume. Built
//! fresh every frame; holds no references back into the simulation.

use serde::Serialize;

use crate::Rgba;
use crate::sim::physics::tilt;
use crate::sim::{GamePhase, GameState, ParticleKind, Viewport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    /// Rotation in radians (0 outside PLAYING)
    pub tilt: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgba,
    pub life: f32,
    pub max_life: f32,
    pub kind: ParticleKind,
}

impl ParticleView {
    /// Opacity, clamped at zero
    pub fn opacity(&self) -> f32 {
        self.life.max(0.0)
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub book: BookView,
    pub shelves: Vec<ShelfView>,
    pub particles: Vec<ParticleView>,
    pub score: u64,
    pub high_score: u64,
    /// Drives the page-flap animation
    pub frame: u64,
}

impl RenderSnapshot {
    /// Capture the current state. `tilt_enabled` follows the reduced-motion preference.
    pub fn capture(state: &GameState, tilt_enabled: bool) -> Self {
        let book_tilt = if state.phase == GamePhase::Playing && tilt_enabled {
            tilt(state.book.velocity)
        } else {
            0.0
        };

        Self {
            phase: state.phase,
            viewport: state.viewport,
            book: BookView {
                x: state.viewport.book_x(),
                y: state.book.y,
                velocity: state.book.velocity,
                tilt: book_tilt,
            },
            shelves: state
                .shelves
                .iter()
                .map(|s| ShelfView {
                    x: s.x,
                    width: s.width,
                    gap_top: s.gap_top,
                    gap_height: s.gap_height,
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    size: p.size,
                    color: p.color,
                    life: p.life,
                    max_life: p.max_life,
                    kind: p.kind,
                })
                .collect(),
            score: state.score,
            high_score: state.high_score,
            frame: state.time_ticks,
        }
    }

    /// Best score to show on the game-over card
    pub fn display_best(&self) -> u64 {
        self.score.max(self.high_score)
    }

    /// JSON for hosts that draw outside Rust
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, Shelf, apply_command};

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(5, Viewport::new(600.0, 400.0));
        apply_command(&mut state, Command::Start);
        state.book.velocity = 4.0;
        state.score = 3;
        state.high_score = 7;
        state.shelves.push(Shelf {
            x: 500.0,
            width: 60.0,
            gap_top: 80.0,
            gap_height: 180.0,
            passed: true,
        });

        let snap = RenderSnapshot::capture(&state, true);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.book.x, 200.0);
        assert_eq!(snap.book.y, 200.0);
        assert!((snap.book.tilt - 0.4).abs() < 1e-6);
        assert_eq!(snap.shelves.len(), 1);
        assert_eq!(snap.shelves[0].gap_top, 80.0);
        assert_eq!(snap.score, 3);
        assert_eq!(snap.display_best(), 7);
    }

    #[test]
    fn test_no_tilt_outside_play_or_with_reduced_motion() {
        let mut state = GameState::new(5, Viewport::default());
        state.book.velocity = 4.0;
        assert_eq!(RenderSnapshot::capture(&state, true).book.tilt, 0.0);

        apply_command(&mut state, Command::Start);
        state.book.velocity = 4.0;
        assert_eq!(RenderSnapshot::capture(&state, false).book.tilt, 0.0);
    }

    #[test]
    fn test_json_has_contract_fields() {
        let state = GameState::new(5, Viewport::default());
        let json = RenderSnapshot::capture(&state, true).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Start");
        assert_eq!(value["score"], 0);
        assert!(value["shelves"].as_array().unwrap().is_empty());
        assert!(value["book"]["y"].is_number());
    }
}
