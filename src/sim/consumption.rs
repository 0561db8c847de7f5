//! Resource consumption
//!
//! Actors bite the resource when they hit its rim moving inward. Bite size
//! folds in the actor's rate, a crowd modifier for the starting field size,
//! the adaptive consumption scale, the global intensity and two late brakes.

use super::collision::{reflect_velocity, ring_contact};
use super::state::{Actor, Resource};
use crate::consts::*;
use crate::with_speed;

/// Crowd modifier from the initial participant count
pub fn crowd_modifier(initial: usize) -> f32 {
    let n0 = initial as f32;
    if initial < 50 {
        1.0 + 0.01 * (50.0 - n0)
    } else if initial > 100 {
        (1.0 - 0.0015 * (n0 - 100.0)).max(0.4)
    } else {
        1.0
    }
}

/// Compound the intensity for `deaths` deaths leaving `alive` actors
pub fn escalate_intensity(intensity: f32, deaths: usize, alive: usize, endgame: bool) -> f32 {
    if deaths == 0 {
        return intensity;
    }
    let step = if endgame {
        INTENSITY_STEP_ENDGAME
    } else {
        INTENSITY_STEP_RUNNING
    };
    intensity * (1.0 + step / alive.max(1) as f32).powi(deaths as i32)
}

/// Per-tick consumption constants
#[derive(Debug, Clone, Copy)]
pub struct ConsumptionParams {
    pub base_radius: f32,
    pub max_speed: f32,
    pub endgame: bool,
    pub crowd: f32,
    /// Adaptive factor from the consumption controller
    pub scale: f32,
    pub intensity: f32,
    pub alive: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsumptionReport {
    pub consumed: f32,
    /// `consumed / scale`, what the controller measures
    pub raw: f32,
    pub bites: usize,
}

/// Bite size before capping at the remaining amount
pub fn bite_size(rate: f32, params: &ConsumptionParams, resource: &Resource) -> f32 {
    let mut bite = rate * CONSUMPTION_COEFFICIENT * params.crowd * params.scale * params.intensity;

    let eaten = resource.eaten_fraction();
    if eaten >= SCARCITY_EATEN_FRACTION && params.alive < SCARCITY_LIVE_BELOW {
        bite *= SCARCITY_FACTOR;
    }
    if params.endgame
        && eaten >= FINAL_BRAKE_EATEN_FRACTION
        && resource.remaining < FINAL_BRAKE_REMAINING_FRACTION * resource.capacity
    {
        bite *= FINAL_BRAKE_FACTOR;
    }
    bite
}

/// Grant endgame growth for eating `bite`
fn apply_endgame_bonus(actor: &mut Actor, bite: f32) {
    actor.endgame_score += bite;
    actor.attack += ATTACK_BONUS_PER_UNIT * bite;
    actor.health += HEALTH_BONUS_PER_UNIT * bite;
    actor.max_health += HEALTH_BONUS_PER_UNIT * bite;
    actor.defense += DEFENSE_BONUS_PER_UNIT * bite;
    actor.speed_boost = (actor.speed_boost * (1.0 + SPEED_BOOST_PER_UNIT * bite)).min(MAX_SPEED_BOOST);
}

/// Let every eligible living actor take one bite
pub fn consume(
    actors: &mut [Actor],
    resource: &mut Resource,
    params: &ConsumptionParams,
) -> ConsumptionReport {
    let mut report = ConsumptionReport::default();

    for actor in actors.iter_mut().filter(|a| a.alive) {
        if resource.remaining <= 0.0 {
            break;
        }

        let radius = actor.effective_radius(params.base_radius, params.endgame);
        let contact = ring_contact(actor.pos, radius, resource.center, resource.radius);
        if !contact.hit || actor.vel.dot(contact.normal) >= 0.0 {
            continue;
        }

        actor.pos = resource.center + contact.normal * (resource.radius + radius);
        actor.vel = reflect_velocity(actor.vel, contact.normal);

        let bite = bite_size(actor.consumption_rate, params, resource).min(resource.remaining);
        resource.remaining = (resource.remaining - bite).max(0.0);
        report.consumed += bite;
        report.bites += 1;

        actor.score += bite;
        if params.endgame {
            apply_endgame_bonus(actor, bite);
            // The boost takes effect on the outgoing bounce
            actor.vel = with_speed(actor.vel, params.max_speed * actor.speed_boost, contact.normal);
        }
    }

    if params.scale > 0.0 {
        report.raw = report.consumed / params.scale;
    }
    report
}
