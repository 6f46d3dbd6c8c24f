//! Shape generation for 2D primitives
//!
//! Everything is emitted in CSS-pixel space as a plain triangle list; the
//! pipeline maps to NDC on upload.

use glam::{Mat2, Vec2};
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::snapshot::{BookView, ParticleView, RenderSnapshot, ShelfView};
use crate::{Rgba, palette, with_alpha};

/// Horizontal colour stops across a shelf, as (fraction of width, colour)
const SHELF_STOPS: [(f32, Rgba); 5] = [
    (0.0, palette::SHELF_EDGE),
    (0.1, palette::SHELF_BODY),
    (0.5, palette::SHELF_HIGHLIGHT),
    (0.9, palette::SHELF_BODY),
    (1.0, palette::SHELF_EDGE),
];

/// Spacing of the plank lines on each slab
const PLANK_SPACING: f32 = 40.0;

/// Generic quad from four corners (wound a-b-c, a-c-d)
pub fn quad(corners: [Vec2; 4], colors: [Rgba; 4]) -> [Vertex; 6] {
    let v = |i: usize| Vertex::new(corners[i].x, corners[i].y, colors[i]);
    [v(0), v(1), v(2), v(0), v(2), v(3)]
}

/// Axis-aligned filled rectangle
pub fn rect(x: f32, y: f32, w: f32, h: f32, color: Rgba) -> [Vertex; 6] {
    quad(
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        [color; 4],
    )
}

/// Rectangle with a top-to-bottom gradient
pub fn vertical_gradient(x: f32, y: f32, w: f32, h: f32, top: Rgba, bottom: Rgba) -> [Vertex; 6] {
    quad(
        [
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x + w, y + h),
            Vec2::new(x, y + h),
        ],
        [top, top, bottom, bottom],
    )
}

/// Rectangle shaded left-to-right through colour stops
pub fn banded_rect(x: f32, y: f32, w: f32, h: f32, stops: &[(f32, Rgba)]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(stops.len().saturating_sub(1) * 6);
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        let x0 = x + w * t0;
        let x1 = x + w * t1;
        vertices.extend(quad(
            [
                Vec2::new(x0, y),
                Vec2::new(x1, y),
                Vec2::new(x1, y + h),
                Vec2::new(x0, y + h),
            ],
            [c0, c1, c1, c0],
        ));
    }
    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Upper and lower slab of a shelf, with edge shine and plank lines
pub fn shelf(shelf: &ShelfView, floor: f32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let gap_bottom = shelf.gap_top + shelf.gap_height;
    let slabs = [(0.0, shelf.gap_top), (gap_bottom, floor - gap_bottom)];

    for (top, height) in slabs {
        if height <= 0.0 {
            continue;
        }
        vertices.extend(banded_rect(shelf.x, top, shelf.width, height, &SHELF_STOPS));
        vertices.extend(rect(
            shelf.x + shelf.width - 4.0,
            top,
            2.0,
            height,
            palette::SHELF_SHINE,
        ));

        let mut y = top + 20.0;
        while y < top + height {
            vertices.extend(rect(
                shelf.x + 4.0,
                y,
                shelf.width - 8.0,
                2.0,
                palette::SHELF_PLANK,
            ));
            y += PLANK_SPACING;
        }
    }

    vertices
}

/// A particle disc; glowing kinds get a soft halo
pub fn particle(p: &ParticleView, segments: u32) -> Vec<Vertex> {
    let center = Vec2::new(p.x, p.y);
    let color = with_alpha(p.color, p.opacity());
    let mut vertices = Vec::new();
    if p.kind.glows() {
        vertices.extend(circle(center, p.size * 2.5, with_alpha(color, 0.3), segments));
    }
    vertices.extend(circle(center, p.size, color, segments));
    vertices
}

/// The book: two flapping pages around a spine, tilted about its centre
pub fn book(view: &BookView, frame: u64) -> Vec<Vertex> {
    let flap = (frame as f32 * 0.2).sin() * 5.0;
    let rotation = Mat2::from_angle(view.tilt);
    let origin = Vec2::new(view.x, view.y);
    let place = |x: f32, y: f32| origin + rotation * Vec2::new(x, y);

    let mut vertices = circle(origin, 28.0, with_alpha(palette::BOOK_GLOW, 0.25), 16);

    for side in [-1.0, 1.0] {
        vertices.extend(quad(
            [
                place(0.0, 5.0),
                place(20.0 * side, -5.0 - flap),
                place(22.0 * side, 10.0 - flap),
                place(0.0, 15.0),
            ],
            [palette::BOOK_PAGE; 4],
        ));
    }

    vertices.extend(quad(
        [
            place(-2.0, 5.0),
            place(2.0, 5.0),
            place(2.0, 17.0),
            place(-2.0, 17.0),
        ],
        [palette::BOOK_PAGE; 4],
    ));

    vertices
}

/// Full frame: background, shelves, particles, then the book on top
pub fn scene(snapshot: &RenderSnapshot, particle_segments: u32) -> Vec<Vertex> {
    let viewport = snapshot.viewport;
    let mut vertices = Vec::new();

    vertices.extend(vertical_gradient(
        0.0,
        0.0,
        viewport.width,
        viewport.height,
        palette::BG_TOP,
        palette::BG_BOTTOM,
    ));
    for s in &snapshot.shelves {
        vertices.extend(shelf(s, viewport.height));
    }
    for p in &snapshot.particles {
        vertices.extend(particle(p, particle_segments));
    }
    vertices.extend(book(&snapshot.book, snapshot.frame));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, ParticleKind, Shelf, Viewport};

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(10.0, 20.0, 30.0, 40.0, palette::SPARKLE);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[2].position, [40.0, 60.0]);
        assert_eq!(v[5].position, [10.0, 60.0]);
    }

    #[test]
    fn test_banded_rect_one_quad_per_band() {
        let v = banded_rect(0.0, 0.0, 60.0, 100.0, &SHELF_STOPS);
        assert_eq!(v.len(), 4 * 6);
        assert_eq!(v[0].color, palette::SHELF_EDGE);
        assert_eq!(v.last().map(|v| v.position[0]), Some(0.9 * 60.0));
    }

    #[test]
    fn test_shelf_planks_stay_on_slabs() {
        let view = ShelfView {
            x: 100.0,
            width: 60.0,
            gap_top: 100.0,
            gap_height: 180.0,
        };
        let v = shelf(&view, 600.0);
        // Upper slab: bands + shine + planks at 20, 60
        // Lower slab (280..600): bands + shine + planks at 300..580 step 40
        let upper = 4 + 1 + 2;
        let lower = 4 + 1 + 8;
        assert_eq!(v.len(), (upper + lower) * 6);
        assert!(v.iter().all(|v| v.position[1] <= 100.0 || v.position[1] >= 280.0));
    }

    #[test]
    fn test_faded_particle_is_transparent() {
        let p = ParticleView {
            x: 0.0,
            y: 0.0,
            size: 2.0,
            color: palette::DUST,
            life: -0.1,
            max_life: 1.0,
            kind: ParticleKind::Dust,
        };
        let v = particle(&p, 6);
        assert_eq!(v.len(), 6 * 3);
        assert!(v.iter().all(|v| v.color[3] == 0.0));
    }

    #[test]
    fn test_scene_layers() {
        let mut state = GameState::new(1, Viewport::new(800.0, 600.0));
        state.shelves.push(Shelf {
            x: 400.0,
            width: 60.0,
            gap_top: 200.0,
            gap_height: 180.0,
            passed: false,
        });
        let snap = RenderSnapshot::capture(&state, true);
        let v = scene(&snap, 8);
        // Background first, book last
        assert_eq!(v[0].color, palette::BG_TOP);
        assert_eq!(v.last().map(|v| v.color), Some(palette::BOOK_PAGE));
        assert_eq!(v.len() % 3, 0);
    }
}
