//! Book physics
//!
//! Constant per-tick acceleration; one call is one display refresh.

use super::state::{Book, Viewport};
use crate::tuning::Tuning;

/// Advance the book one tick: velocity first, then position
#[inline]
pub fn integrate(book: &mut Book, gravity: f32) {
    book.velocity += gravity;
    book.y += book.velocity;
}

/// Jump impulse. Overwrites the current velocity rather than adding to it.
#[inline]
pub fn jump(book: &mut Book, jump_velocity: f32) {
    book.velocity = jump_velocity;
}

/// Idle bob on the start screen. Velocity is left untouched.
pub fn hover(book: &mut Book, viewport: &Viewport, tuning: &Tuning, time_ticks: u64) {
    let phase = time_ticks as f32 * tuning.hover_frequency;
    book.y = viewport.height / 2.0 + phase.sin() * tuning.hover_amplitude;
}

/// Book tilt for rendering, nose-down when falling
pub fn tilt(velocity: f32) -> f32 {
    use std::f32::consts::FRAC_PI_4;
    (velocity * 0.1).clamp(-FRAC_PI_4, FRAC_PI_4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_adds_gravity_then_moves() {
        let mut book = Book { y: 100.0, velocity: 0.0 };
        integrate(&mut book, 0.5);
        assert_eq!(book.velocity, 0.5);
        assert_eq!(book.y, 100.5);
        integrate(&mut book, 0.5);
        assert_eq!(book.velocity, 1.0);
        assert_eq!(book.y, 101.5);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut book = Book { y: 100.0, velocity: 12.0 };
        jump(&mut book, -8.0);
        assert_eq!(book.velocity, -8.0);
        // Repeated jumps in one tick are idempotent
        jump(&mut book, -8.0);
        assert_eq!(book.velocity, -8.0);
        assert_eq!(book.y, 100.0);
    }

    #[test]
    fn test_hover_stays_within_amplitude() {
        let viewport = Viewport::new(800.0, 600.0);
        let tuning = Tuning::default();
        let mut book = Book::default();
        for t in 0..500 {
            hover(&mut book, &viewport, &tuning, t);
            assert!((book.y - 300.0).abs() <= tuning.hover_amplitude + 1e-3);
        }
        hover(&mut book, &viewport, &tuning, 0);
        assert_eq!(book.y, 300.0);
    }

    #[test]
    fn test_tilt_is_clamped() {
        assert_eq!(tilt(0.0), 0.0);
        assert!((tilt(100.0) - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((tilt(-100.0) + std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
