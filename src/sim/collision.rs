//! Collision detection against the play-area bounds and drawn trails
//!
//! Trails are never stored as geometry: a player "hits" something when a
//! pixel just ahead of it is no longer background black.

use glam::Vec2;

use super::ports::{Dimensions, TrailSurface};
use crate::consts::PROBE_PADDING;
use crate::heading_offset;

/// Outcome of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Left the play rectangle
    Boundary,
    /// A forward probe landed on a drawn pixel
    Trail,
}

/// Whether a position has left the play rectangle
#[inline]
pub fn out_of_bounds(pos: Vec2, dims: &Dimensions) -> bool {
    !dims.contains(pos.x, pos.y)
}

/// The two forward probe points at `heading ± tolerance`
pub fn probe_points(pos: Vec2, heading_deg: f32, tolerance_deg: f32, radius: f32) -> [Vec2; 2] {
    let distance = radius + PROBE_PADDING;
    [
        pos + heading_offset(heading_deg + tolerance_deg, distance),
        pos + heading_offset(heading_deg - tolerance_deg, distance),
    ]
}

/// Sample the surface ahead of a player
///
/// Returns the first probe that reads a non-black pixel.
pub fn probe_trail(
    surface: &(impl TrailSurface + ?Sized),
    pos: Vec2,
    heading_deg: f32,
    tolerance_deg: f32,
    radius: f32,
) -> Option<Vec2> {
    probe_points(pos, heading_deg, tolerance_deg, radius)
        .into_iter()
        .find(|p| !surface.read_pixel(p.x.floor() as i32, p.y.floor() as i32).is_black())
}

/// Full check: bounds first, then the trail probes
pub fn detect(
    surface: &(impl TrailSurface + ?Sized),
    dims: &Dimensions,
    pos: Vec2,
    heading_deg: f32,
    tolerance_deg: f32,
    radius: f32,
) -> Option<CollisionKind> {
    if out_of_bounds(pos, dims) {
        return Some(CollisionKind::Boundary);
    }
    probe_trail(surface, pos, heading_deg, tolerance_deg, radius).map(|_| CollisionKind::Trail)
}
