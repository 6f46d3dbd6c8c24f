//! Collision detection between the book, the shelves and the world bounds
//!
//! Everything is axis-aligned: the book is a fixed box around its slot and
//! each shelf is two slabs with a gap between them. Any hit ends the run, so
//! the first one found is reported.

use super::state::{Book, Shelf, Viewport};
use crate::tuning::Tuning;

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn centered(cx: f32, cy: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            left: cx - half_width,
            right: cx + half_width,
            top: cy - half_height,
            bottom: cy + half_height,
        }
    }

    /// Strict horizontal overlap with the span [left, right]; touching edges do not count
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.right > left && self.left < right
    }
}

/// What the book ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Index into the shelf list
    Shelf(usize),
    Floor,
    Ceiling,
}

/// The book's hitbox at its current height
pub fn book_hitbox(book: &Book, viewport: &Viewport, tuning: &Tuning) -> Aabb {
    Aabb::centered(
        viewport.book_x(),
        book.y,
        tuning.book_half_width,
        tuning.book_half_height,
    )
}

/// Hitbox overlaps a shelf horizontally and pokes out of its gap
pub fn hits_shelf(hitbox: &Aabb, shelf: &Shelf) -> bool {
    hitbox.overlaps_x(shelf.x, shelf.right_edge())
        && (hitbox.top < shelf.gap_top || hitbox.bottom > shelf.gap_bottom())
}

/// Book centre below the floor line or above the top of the viewport
pub fn bounds_collision(book: &Book, viewport: &Viewport, floor_margin: f32) -> Option<Collision> {
    if book.y > viewport.height - floor_margin {
        Some(Collision::Floor)
    } else if book.y < 0.0 {
        Some(Collision::Ceiling)
    } else {
        None
    }
}

/// Check shelves first, then world bounds
pub fn detect(
    book: &Book,
    shelves: &[Shelf],
    viewport: &Viewport,
    tuning: &Tuning,
) -> Option<Collision> {
    let hitbox = book_hitbox(book, viewport, tuning);
    shelves
        .iter()
        .position(|shelf| hits_shelf(&hitbox, shelf))
        .map(Collision::Shelf)
        .or_else(|| bounds_collision(book, viewport, tuning.floor_margin))
}
