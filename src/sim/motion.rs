//! Motion and boundary handling
//!
//! Integrates one actor per call: position update, push-out from the resource
//! disc, wall clamp with speed renormalization, cosmetic rolling.

use glam::Vec2;

use super::collision::{reflect_velocity, resource_zone_collision};
use super::state::Actor;
use crate::consts::ENDGAME_SPEED_MULTIPLIER;
use crate::with_speed;

/// Per-tick constants shared by every actor's motion update
#[derive(Debug, Clone, Copy)]
pub struct MotionContext {
    pub arena: Vec2,
    pub resource_center: Vec2,
    pub resource_radius: f32,
    pub max_speed: f32,
    pub base_radius: f32,
    pub endgame: bool,
}

impl MotionContext {
    fn speed_multiplier(&self) -> f32 {
        if self.endgame {
            ENDGAME_SPEED_MULTIPLIER
        } else {
            1.0
        }
    }
}

/// Advance a living actor by `dt`
pub fn advance(actor: &mut Actor, ctx: &MotionContext, dt: f32) {
    let radius = actor.effective_radius(ctx.base_radius, ctx.endgame);

    actor.pos += actor.vel * dt * ctx.speed_multiplier();

    let zone = resource_zone_collision(actor.pos, radius, ctx.resource_center, ctx.resource_radius);
    if zone.hit {
        actor.pos += zone.normal * zone.penetration;
        if actor.vel.dot(zone.normal) < 0.0 {
            actor.vel = reflect_velocity(actor.vel, zone.normal);
        }
    }

    if clamp_to_walls(actor, radius, ctx.arena) {
        let toward_center = ctx.arena * 0.5 - actor.pos;
        actor.vel = with_speed(actor.vel, ctx.max_speed * actor.speed_boost, toward_center);
    }

    let speed = actor.vel.length();
    if radius > 0.0 {
        actor.rotation += speed / radius * dt;
    }
}

/// Clamp position to `[r, dim - r]` per axis, pointing the velocity back inside.
fn clamp_to_walls(actor: &mut Actor, radius: f32, arena: Vec2) -> bool {
    let mut hit = false;
    let (min, max) = (Vec2::splat(radius), arena - Vec2::splat(radius));

    if actor.pos.x < min.x {
        actor.pos.x = min.x;
        actor.vel.x = actor.vel.x.abs();
        hit = true;
    } else if actor.pos.x > max.x {
        actor.pos.x = max.x;
        actor.vel.x = -actor.vel.x.abs();
        hit = true;
    }

    if actor.pos.y < min.y {
        actor.pos.y = min.y;
        actor.vel.y = actor.vel.y.abs();
        hit = true;
    } else if actor.pos.y > max.y {
        actor.pos.y = max.y;
        actor.vel.y = -actor.vel.y.abs();
        hit = true;
    }

    hit
}
