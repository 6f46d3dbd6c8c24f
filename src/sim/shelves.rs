//! Shelf spawning, movement, retirement and pass-through scoring

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Shelf, Viewport};
use crate::tuning::Tuning;

/// Whether a shelf spawns on this run tick
#[inline]
pub fn should_spawn(frame_count: u64, interval: u64) -> bool {
    interval > 0 && frame_count > 0 && frame_count % interval == 0
}

/// Pick an integral gap top inside the margins.
///
/// Viewports too short for the margins pin the gap at the top margin.
pub fn roll_gap_top(rng: &mut Pcg32, tuning: &Tuning, viewport_height: f32) -> f32 {
    let min = tuning.min_gap_top();
    let max = tuning.max_gap_top(viewport_height);
    if max <= min {
        return min;
    }
    let steps = (max - min).floor() as u32;
    min + rng.random_range(0..=steps) as f32
}

/// Spawn a shelf at the right edge of the viewport
pub fn spawn(shelves: &mut Vec<Shelf>, rng: &mut Pcg32, tuning: &Tuning, viewport: &Viewport) {
    let gap_top = roll_gap_top(rng, tuning, viewport.height);
    log::debug!("Shelf spawned at x={} gap_top={}", viewport.width, gap_top);
    shelves.push(Shelf {
        x: viewport.width,
        width: tuning.shelf_width,
        gap_top,
        gap_height: tuning.gap_height,
        passed: false,
    });
}

/// Move every shelf left and drop the ones fully off-screen
pub fn advance(shelves: &mut Vec<Shelf>, speed: f32) {
    for shelf in shelves.iter_mut() {
        shelf.x -= speed;
    }
    shelves.retain(|s| s.right_edge() >= 0.0);
}

/// Mark shelves whose right edge has crossed the book slot.
///
/// Returns how many shelves were newly passed; already-passed shelves never count again.
pub fn mark_passed(shelves: &mut [Shelf], book_x: f32) -> u32 {
    let mut newly_passed = 0;
    for shelf in shelves.iter_mut() {
        if !shelf.passed && shelf.right_edge() < book_x {
            shelf.passed = true;
            newly_passed += 1;
        }
    }
    newly_passed
}

/// First shelf the book still has to clear
pub fn next_unpassed(shelves: &[Shelf]) -> Option<&Shelf> {
    shelves.iter().find(|s| !s.passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn shelf_at(x: f32) -> Shelf {
        Shelf {
            x,
            width: 60.0,
            gap_top: 100.0,
            gap_height: 180.0,
            passed: false,
        }
    }

    #[test]
    fn test_should_spawn() {
        assert!(!should_spawn(0, 100));
        assert!(!should_spawn(99, 100));
        assert!(should_spawn(100, 100));
        assert!(should_spawn(200, 100));
        assert!(!should_spawn(100, 0));
    }

    #[test]
    fn test_spawn_at_right_edge() {
        let mut rng = Pcg32::seed_from_u64(7);
        let tuning = Tuning::default();
        let viewport = Viewport::new(1024.0, 600.0);
        let mut shelves = Vec::new();
        spawn(&mut shelves, &mut rng, &tuning, &viewport);

        assert_eq!(shelves.len(), 1);
        assert_eq!(shelves[0].x, 1024.0);
        assert_eq!(shelves[0].width, tuning.shelf_width);
        assert_eq!(shelves[0].gap_height, tuning.gap_height);
        assert!(!shelves[0].passed);
        assert_eq!(shelves[0].gap_top.fract(), 0.0);
    }

    #[test]
    fn test_short_viewport_pins_gap() {
        let mut rng = Pcg32::seed_from_u64(3);
        let tuning = Tuning::default();
        assert_eq!(roll_gap_top(&mut rng, &tuning, 200.0), tuning.gap_margin_top);
    }

    #[test]
    fn test_advance_retires_offscreen() {
        let mut shelves = vec![shelf_at(-58.0), shelf_at(-55.0), shelf_at(400.0)];
        advance(&mut shelves, 3.5);
        // -61.5 + 60 < 0 goes, -58.5 + 60 stays
        assert_eq!(shelves.len(), 2);
        assert_eq!(shelves[0].x, -58.5);
        assert_eq!(shelves[1].x, 396.5);
    }

    #[test]
    fn test_mark_passed_once() {
        let mut shelves = vec![shelf_at(100.0), shelf_at(300.0)];
        // Right edge 160 < 200: passed
        assert_eq!(mark_passed(&mut shelves, 200.0), 1);
        assert!(shelves[0].passed);
        assert!(!shelves[1].passed);
        assert_eq!(mark_passed(&mut shelves, 200.0), 0);
        assert_eq!(next_unpassed(&shelves).map(|s| s.x), Some(300.0));
    }

    #[test]
    fn test_edge_touching_slot_is_not_passed() {
        let mut shelves = vec![shelf_at(140.0)];
        assert_eq!(mark_passed(&mut shelves, 200.0), 0);
    }

    proptest! {
        #[test]
        fn prop_gap_within_margins(seed in any::<u64>(), height in 280.0f32..2000.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let tuning = Tuning::default();
            for _ in 0..16 {
                let top = roll_gap_top(&mut rng, &tuning, height);
                prop_assert!(tuning.gap_margin_top <= top);
                prop_assert!(top + tuning.gap_height <= height - tuning.gap_margin_bottom);
            }
        }

        #[test]
        fn prop_each_shelf_scores_once(xs in prop::collection::vec(200.0f32..800.0, 1..8), ticks in 1usize..60) {
            let mut shelves: Vec<Shelf> = xs.iter().map(|&x| shelf_at(x)).collect();
            let book_x = 266.0;
            let mut total = 0;
            for _ in 0..ticks {
                advance(&mut shelves, 3.5);
                total += mark_passed(&mut shelves, book_x);
                // A second pass in the same tick never scores
                prop_assert_eq!(mark_passed(&mut shelves, book_x), 0);
            }
            // Nothing retires within 60 ticks from x >= 200
            prop_assert_eq!(shelves.len(), xs.len());
            prop_assert_eq!(total as usize, shelves.iter().filter(|s| s.passed).count());
        }
    }
}
