//! Pairwise combat resolution
//!
//! Every overlapping pair is separated, exchanges normal momentum and deals
//! damage to each other. Near the end of a match the last-standing rule keeps
//! at least one actor alive.

use super::collision::circle_overlap;
use super::rng::RandomSource;
use super::state::Actor;
use crate::consts::{LAST_STANDING_BELOW, LUCK_RANGE};
use crate::with_speed;

/// Per-tick combat constants
#[derive(Debug, Clone, Copy)]
pub struct CombatParams {
    pub max_speed: f32,
    pub base_radius: f32,
    pub endgame: bool,
    /// Adaptive damage factor from the damage controller
    pub damage_scale: f32,
    pub damage_coefficient: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub collisions: usize,
    pub deaths: usize,
}

/// Damage dealt by an attacker: `max(0, attack + luck - defense) * intensity * scale`
#[inline]
pub fn outgoing_damage(attack: f32, luck: f32, defense: f32, intensity: f32, scale: f32) -> f32 {
    (attack + luck - defense).max(0.0) * intensity * scale
}

/// Collision intensity from the relative normal speed before the exchange
#[inline]
pub fn impact_intensity(relative_normal_speed: f32, max_speed: f32) -> f32 {
    0.5 + relative_normal_speed / max_speed
}

/// Last-standing rule for a mutual kill: the higher result survives on 1 health.
///
/// Equal results go to the lower id. Returns the adjusted `(a, b)` healths.
pub fn last_standing(health_a: f32, health_b: f32, id_a: u64, id_b: u64) -> (f32, f32) {
    let a_survives = health_a > health_b || (health_a == health_b && id_a < id_b);
    if a_survives {
        (1.0, health_b)
    } else {
        (health_a, 1.0)
    }
}

/// Borrow two distinct actors mutably
fn pair_mut(actors: &mut [Actor], i: usize, j: usize) -> (&mut Actor, &mut Actor) {
    debug_assert!(i < j);
    let (head, tail) = actors.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

/// Resolve all candidate pairs in order. `alive` is the live count, decremented per death.
pub fn resolve(
    actors: &mut [Actor],
    pairs: &[(usize, usize)],
    params: &CombatParams,
    alive: &mut usize,
    rng: &mut impl RandomSource,
) -> CombatReport {
    let mut report = CombatReport::default();

    for &(i, j) in pairs {
        if i >= j || j >= actors.len() {
            continue;
        }
        let (a, b) = pair_mut(actors, i, j);
        if !(a.alive && b.alive) {
            continue;
        }

        let ra = a.effective_radius(params.base_radius, params.endgame);
        let rb = b.effective_radius(params.base_radius, params.endgame);
        let contact = circle_overlap(a.pos, ra, b.pos, rb);
        if !contact.hit {
            continue;
        }
        report.collisions += 1;
        let n = contact.normal;

        // Separation
        let push = n * (contact.penetration * 0.5);
        a.pos -= push;
        b.pos += push;

        // Momentum exchange along the normal
        let van = a.vel.dot(n);
        let vbn = b.vel.dot(n);
        let relative = (van - vbn).abs();
        a.vel += (vbn - van) * n;
        b.vel += (van - vbn) * n;
        a.vel = with_speed(a.vel, params.max_speed * a.speed_boost, -n);
        b.vel = with_speed(b.vel, params.max_speed * b.speed_boost, n);

        // Damage from pre-damage stats
        let intensity = impact_intensity(relative, params.max_speed);
        let scale = params.damage_scale * params.damage_coefficient;
        let luck_a = rng.range(-LUCK_RANGE, LUCK_RANGE);
        let luck_b = rng.range(-LUCK_RANGE, LUCK_RANGE);
        let to_b = outgoing_damage(a.attack, luck_a, b.defense, intensity, scale);
        let to_a = outgoing_damage(b.attack, luck_b, a.defense, intensity, scale);

        let mut health_a = a.health - to_a;
        let mut health_b = b.health - to_b;
        if *alive < LAST_STANDING_BELOW && health_a <= 0.0 && health_b <= 0.0 {
            (health_a, health_b) = last_standing(health_a, health_b, a.id, b.id);
        }
        a.health = health_a;
        b.health = health_b;

        for actor in [a, b] {
            if actor.health <= 0.0 {
                actor.alive = false;
                *alive = alive.saturating_sub(1);
                report.deaths += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use crate::roster::RosterEntry;
    use crate::sim::rng::Lcg;

    fn actor(id: u64, pos: Vec2, vel: Vec2) -> Actor {
        let mut entry = RosterEntry::new(id, format!("a{id}"));
        entry.base_health = 50.0;
        entry.base_attack = 20.0;
        entry.base_defense = 5.0;
        Actor::from_entry(&entry, pos, vel)
    }

    fn params() -> CombatParams {
        CombatParams {
            max_speed: 100.0,
            base_radius: 10.0,
            endgame: false,
            damage_scale: 1.0,
            damage_coefficient: 1.0,
        }
    }

    #[test]
    fn test_outgoing_damage_floors_at_zero() {
        assert_eq!(outgoing_damage(5.0, -3.0, 10.0, 1.0, 1.0), 0.0);
        assert!((outgoing_damage(12.0, 2.0, 4.0, 1.5, 0.5) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_last_standing_picks_higher_then_lower_id() {
        assert_eq!(last_standing(-2.0, -5.0, 1, 2), (1.0, -5.0));
        assert_eq!(last_standing(-7.0, -5.0, 1, 2), (-7.0, 1.0));
        assert_eq!(last_standing(-3.0, -3.0, 9, 4), (-3.0, 1.0));
        assert_eq!(last_standing(-3.0, -3.0, 4, 9), (1.0, -3.0));
    }

    #[test]
    fn test_head_on_collision_separates_and_swaps() {
        let mut actors = vec![
            actor(1, Vec2::new(100.0, 100.0), Vec2::new(100.0, 0.0)),
            actor(2, Vec2::new(115.0, 100.0), Vec2::new(-100.0, 0.0)),
        ];
        let mut alive = 2;
        let mut rng = Lcg::new(7);
        let report = resolve(&mut actors, &[(0, 1)], &params(), &mut alive, &mut rng);

        assert_eq!(report.collisions, 1);
        assert!((actors[0].pos.distance(actors[1].pos) - 20.0).abs() < 1e-3);
        assert!(actors[0].vel.x < 0.0);
        assert!(actors[1].vel.x > 0.0);
        assert!((actors[0].vel.length() - 100.0).abs() < 1e-3);
        // Intensity 2.5, damage between (20 - 10 - 5) and (20 + 10 - 5) each way
        assert!(actors[0].health < 50.0 - 5.0 * 2.5 + 1e-3);
        assert!(actors[0].health >= 50.0 - 25.0 * 2.5 - 1e-3);
    }

    #[test]
    fn test_no_contact_no_damage() {
        let mut actors = vec![
            actor(1, Vec2::new(100.0, 100.0), Vec2::X),
            actor(2, Vec2::new(150.0, 100.0), Vec2::X),
        ];
        let mut alive = 2;
        let report = resolve(&mut actors, &[(0, 1)], &params(), &mut alive, &mut Lcg::new(1));
        assert_eq!(report, CombatReport::default());
        assert_eq!(actors[0].health, 50.0);
    }

    #[test]
    fn test_mutual_kill_leaves_one_standing() {
        let mut actors = vec![
            actor(1, Vec2::new(100.0, 100.0), Vec2::new(100.0, 0.0)),
            actor(2, Vec2::new(105.0, 100.0), Vec2::new(-100.0, 0.0)),
        ];
        actors[0].health = 1.0;
        actors[1].health = 1.0;
        let mut alive = 2;
        let report = resolve(&mut actors, &[(0, 1)], &params(), &mut alive, &mut Lcg::new(3));

        assert_eq!(report.deaths, 1);
        assert_eq!(alive, 1);
        let survivor = actors.iter().find(|a| a.alive).unwrap();
        assert_eq!(survivor.health, 1.0);
    }

    #[test]
    fn test_mutual_kill_in_crowd_kills_both() {
        let mut actors = vec![
            actor(1, Vec2::new(100.0, 100.0), Vec2::new(100.0, 0.0)),
            actor(2, Vec2::new(105.0, 100.0), Vec2::new(-100.0, 0.0)),
        ];
        actors[0].health = 1.0;
        actors[1].health = 1.0;
        let mut alive = 10;
        let report = resolve(&mut actors, &[(0, 1)], &params(), &mut alive, &mut Lcg::new(3));
        assert_eq!(report.deaths, 2);
        assert_eq!(alive, 8);
    }

    #[test]
    fn test_dead_actors_skipped() {
        let mut actors = vec![
            actor(1, Vec2::new(100.0, 100.0), Vec2::X),
            actor(2, Vec2::new(101.0, 100.0), Vec2::X),
        ];
        actors[1].alive = false;
        let mut alive = 1;
        let report = resolve(&mut actors, &[(0, 1)], &params(), &mut alive, &mut Lcg::new(3));
        assert_eq!(report.collisions, 0);
    }
}
