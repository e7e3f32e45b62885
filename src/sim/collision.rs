//! Proximity tests
//!
//! Every test compares a squared distance against a squared radius sum; no
//! square roots in the per-tick passes.

use glam::Vec3;

use crate::consts::ARENA_BOUNDARY_RADIUS_SQ;
use crate::ground_distance_sq;

/// Two spheres overlap (strictly)
#[inline]
pub fn spheres_overlap(a: Vec3, ra: f32, b: Vec3, rb: f32) -> bool {
    let min_dist = ra + rb;
    a.distance_squared(b) < min_dist * min_dist
}

/// Two points are closer than `sqrt(dist_sq)`
#[inline]
pub fn within_sq(a: Vec3, b: Vec3, dist_sq: f32) -> bool {
    a.distance_squared(b) < dist_sq
}

/// A point lies inside a disc on the ground plane (height ignored)
#[inline]
pub fn within_ground_radius(center: Vec3, radius: f32, point: Vec3) -> bool {
    ground_distance_sq(center, point) < radius * radius
}

/// The player may stand here
#[inline]
pub fn inside_arena(pos: Vec3) -> bool {
    pos.x * pos.x + pos.z * pos.z < ARENA_BOUNDARY_RADIUS_SQ
}
