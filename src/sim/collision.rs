//! Collision detection and bounce response
//!
//! Exhaustive pairwise scan over circles. The scan is read-only; reactions are applied
//! afterwards by the resolver.

use glam::Vec2;

use super::state::Entity;
use crate::consts::MIN_SEPARATION;

/// Two overlapping entities, by index in store order (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: usize,
    pub b: usize,
}

/// True when the centers are strictly closer than the sum of the radii
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    let reach = a.radius() + b.radius();
    a.pos.distance_squared(b.pos) < reach * reach
}

/// All overlapping pairs, in increasing `(a, b)` lexicographic order
pub fn detect_collisions(entities: &[Entity]) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();
    for (a, first) in entities.iter().enumerate() {
        for (offset, second) in entities[a + 1..].iter().enumerate() {
            if overlaps(first, second) {
                pairs.push(CollisionPair {
                    a,
                    b: a + 1 + offset,
                });
            }
        }
    }
    pairs
}

/// New velocities pointing each entity straight away from the other.
///
/// Each entity keeps its own speed; this is a separation response, not a momentum exchange.
/// Coincident centers separate along the x axis.
pub fn bounce_apart(a: &Entity, b: &Entity) -> (Vec2, Vec2) {
    let delta = a.pos - b.pos;
    let dir = if delta.length_squared() > MIN_SEPARATION * MIN_SEPARATION {
        delta.normalize()
    } else {
        Vec2::X
    };
    (dir * a.speed(), -dir * b.speed())
}
