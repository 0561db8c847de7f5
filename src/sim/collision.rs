//! Collision detection and response for circular actors
//!
//! Actors are circles. They collide with each other, with the resource disc
//! in the middle of the arena, and with the eating ring around its rim.

use glam::Vec2;

use crate::direction_or_x;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact normal. For pairs it points from the first circle to the second,
    /// for the resource it points away from the resource center.
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
///
/// Coincident centers separate along +X.
pub fn circle_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let reach = a_radius + b_radius;
    let dist = a_pos.distance(b_pos);
    if dist >= reach {
        return CollisionResult::miss();
    }

    let normal = direction_or_x(a_pos, b_pos);
    CollisionResult {
        hit: true,
        normal,
        penetration: reach - dist,
    }
}

/// Check whether an actor has sunk into the resource disc
///
/// Hits when the center lies closer than `resource_radius - radius` to the resource
/// center. `penetration` is the distance to push outward to sit in contact at
/// `resource_radius + radius`.
pub fn resource_zone_collision(
    pos: Vec2,
    radius: f32,
    center: Vec2,
    resource_radius: f32,
) -> CollisionResult {
    let dist = pos.distance(center);
    if dist >= resource_radius - radius {
        return CollisionResult::miss();
    }

    let normal = direction_or_x(center, pos);
    CollisionResult {
        hit: true,
        normal,
        penetration: resource_radius + radius - dist,
    }
}

/// Check whether an actor touches the rim of the resource (the eating ring)
pub fn ring_contact(pos: Vec2, radius: f32, center: Vec2, resource_radius: f32) -> CollisionResult {
    let dist = pos.distance(center);
    let gap = (dist - resource_radius).abs();
    if gap > radius {
        return CollisionResult::miss();
    }

    let normal = direction_or_x(center, pos);
    CollisionResult {
        hit: true,
        normal,
        penetration: radius - gap,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
