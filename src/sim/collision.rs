//! Collision detection for the body against surfaces and collectibles
//!
//! Surfaces are one-sided: the body only collides with a surface top while
//! descending, and the previous tick's bottom edge is used so a fast fall
//! cannot skip over a thin surface between two ticks.

use super::rect::Rect;
use super::surface::{Collectible, CollectibleKind, Surface};

/// Does a descending body land on `surface` this tick?
///
/// `prev_bottom` is the body's bottom edge before vertical integration,
/// `body` its rectangle after. `surface` must already use the display width.
pub fn lands_on(prev_bottom: f32, body: &Rect, vy: f32, surface: &Rect) -> bool {
    vy > 0.0
        && prev_bottom <= surface.top()
        && body.bottom() >= surface.top()
        && body.bottom() <= surface.bottom()
        && body.right() >= surface.left()
        && body.left() <= surface.right()
}

/// Index of the surface the body lands on, if any.
///
/// When several surfaces qualify the last one in list order wins.
pub fn find_landing(
    prev_bottom: f32,
    body: &Rect,
    vy: f32,
    surfaces: &[Surface],
    enlarged: bool,
    base_width: f32,
) -> Option<usize> {
    surfaces
        .iter()
        .rposition(|s| lands_on(prev_bottom, body, vy, &s.rect(enlarged, base_width)))
}

/// Remove every collectible overlapping the body, returning their kinds in list order
pub fn take_overlapping(body: &Rect, collectibles: &mut Vec<Collectible>) -> Vec<CollectibleKind> {
    let mut taken = Vec::new();
    collectibles.retain(|c| {
        if body.intersects(&c.rect) {
            taken.push(c.kind);
            false
        } else {
            true
        }
    });
    taken
}
