//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so tests and hosts
//! can run variants without touching the tick code.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub jump_velocity: f32,
    pub shelf_speed: f32,
    /// Ticks between shelf spawns
    pub spawn_interval: u64,
    pub gap_height: f32,
    pub shelf_width: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,
    pub book_half_width: f32,
    pub book_half_height: f32,
    pub floor_margin: f32,
    pub hover_amplitude: f32,
    pub hover_frequency: f32,
    pub particle_decay: f32,
    pub dust_cap: usize,
    pub dust_spawn_chance: f32,
    pub trail_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            shelf_speed: SHELF_SPEED,
            spawn_interval: SHELF_SPAWN_INTERVAL,
            gap_height: SHELF_GAP_HEIGHT,
            shelf_width: SHELF_WIDTH,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,
            book_half_width: BOOK_HALF_WIDTH,
            book_half_height: BOOK_HALF_HEIGHT,
            floor_margin: FLOOR_MARGIN,
            hover_amplitude: HOVER_AMPLITUDE,
            hover_frequency: HOVER_FREQUENCY,
            particle_decay: PARTICLE_DECAY,
            dust_cap: DUST_CAP,
            dust_spawn_chance: DUST_SPAWN_CHANCE,
            trail_interval: TRAIL_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Lowest gap top a shelf may spawn with
    pub fn min_gap_top(&self) -> f32 {
        self.gap_margin_top
    }

    /// Highest gap top that keeps the gap above the bottom margin
    pub fn max_gap_top(&self, viewport_height: f32) -> f32 {
        viewport_height - self.gap_height - self.gap_margin_bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.25, "spawn_interval": 80 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.25);
        assert_eq!(tuning.spawn_interval, 80);
        assert_eq!(tuning.jump_velocity, JUMP_VELOCITY);
        assert_eq!(tuning.gap_height, SHELF_GAP_HEIGHT);
    }

    #[test]
    fn test_gap_range_for_600px() {
        let tuning = Tuning::default();
        assert_eq!(tuning.min_gap_top(), 50.0);
        assert_eq!(tuning.max_gap_top(600.0), 370.0);
    }
}
