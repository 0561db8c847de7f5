//! Match state and core simulation types
//!
//! The `Match` aggregate owns every piece of mutable state; `step` (in `tick`)
//! is the only thing that changes it after construction.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::controller::{ConsumptionController, DamageController};
use super::grid::SpatialIndex;
use super::phase::PhaseMachine;
use super::rng::RandomSource;
use crate::config::MatchConfig;
use crate::consts::*;
use crate::error::SimError;
use crate::roster::{RosterEntry, validate_roster};

/// Base radius for a given live count, stepping up as the field thins
pub fn base_radius_for(alive: usize) -> f32 {
    match alive {
        0..=8 => 30.0,
        9..=20 => 24.0,
        21..=50 => 18.0,
        51..=100 => 13.0,
        101..=250 => 8.0,
        _ => 5.0,
    }
}

/// Resource capacity for `participants` simulated actors
pub fn capacity_for(participants: usize) -> f32 {
    let band = (participants / CAPACITY_BAND_SIZE).min(CAPACITY_MULTIPLIERS.len() - 1);
    participants as f32 * CAPACITY_MULTIPLIERS[band]
}

/// A simulated participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u64,
    pub display_name: String,
    pub portrait_ref: Option<String>,

    pub pos: Vec2,
    pub vel: Vec2,

    pub health: f32,
    pub max_health: f32,
    pub defense: f32,
    pub attack: f32,

    /// Everything this actor has eaten
    pub score: f32,
    /// Eaten since the endgame started (drives size bonus)
    pub endgame_score: f32,
    pub consumption_rate: f32,
    /// Multiplier on max speed, capped at `MAX_SPEED_BOOST`
    pub speed_boost: f32,

    pub alive: bool,
    /// Cosmetic rolling angle
    pub rotation: f32,
}

impl Actor {
    pub fn from_entry(entry: &RosterEntry, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id: entry.id,
            display_name: entry.display_name.clone(),
            portrait_ref: entry.portrait_ref.clone(),
            pos,
            vel,
            health: entry.base_health,
            max_health: entry.base_health,
            defense: entry.base_defense,
            attack: entry.base_attack,
            score: 0.0,
            endgame_score: 0.0,
            consumption_rate: entry.consumption_rate,
            speed_boost: 1.0,
            alive: true,
            rotation: 0.0,
        }
    }

    /// Collision radius: the shared base plus the endgame size bonus
    #[inline]
    pub fn effective_radius(&self, base_radius: f32, endgame: bool) -> f32 {
        if endgame {
            base_radius + SIZE_BONUS_PER_UNIT * self.endgame_score.floor()
        } else {
            base_radius
        }
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Visual-only participant beyond the animation cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementaryActor {
    pub id: u64,
    pub display_name: String,
    pub pos: Vec2,
    /// Oscillation anchor
    pub origin: Vec2,
    pub phase: f32,
    pub frequency: f32,
    /// Match time at which the cull removes this actor
    pub eliminate_at: f32,
    pub alive: bool,
}

/// The shared depleting resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub center: Vec2,
    pub radius: f32,
    pub capacity: f32,
    pub remaining: f32,
}

impl Resource {
    pub fn eaten_fraction(&self) -> f32 {
        if self.capacity > 0.0 {
            (1.0 - self.remaining / self.capacity).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    pub fn remaining_ratio(&self) -> f32 {
        1.0 - self.eaten_fraction()
    }

    pub fn is_depleted(&self) -> bool {
        self.remaining <= RESOURCE_EPSILON
    }
}

/// A single battle-royale session
pub struct Match<R = Pcg32> {
    pub config: MatchConfig,
    /// Simulated time; stops advancing once the match ends
    pub elapsed: f32,
    pub phase: PhaseMachine,
    pub damage: DamageController,
    pub consumption: ConsumptionController,
    /// Global consumption multiplier, compounded on every death
    pub intensity: f32,
    /// Shared base radius for the current live-count band
    pub base_radius: f32,
    pub actors: Vec<Actor>,
    pub supplementary: Vec<SupplementaryActor>,
    pub resource: Resource,
    /// Simulated participants at spawn
    pub(crate) initial_count: usize,
    /// Consumption crowd modifier, fixed from the initial count
    pub(crate) crowd: f32,
    pub(crate) grid: SpatialIndex,
    pub(crate) pairs: Vec<(usize, usize)>,
    pub(crate) rng: R,
}

impl Match<Pcg32> {
    /// Build a match seeded from `config.seed`
    pub fn new(roster: &[RosterEntry], config: MatchConfig) -> Result<Self, SimError> {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self::with_rng(roster, config, rng)
    }
}

impl<R: RandomSource> Match<R> {
    /// Build a match drawing all randomness from `rng`
    pub fn with_rng(roster: &[RosterEntry], config: MatchConfig, mut rng: R) -> Result<Self, SimError> {
        config.validate()?;
        validate_roster(roster)?;

        let cap = config.animation_cap.min(roster.len());
        let (simulated, extra) = roster.split_at(cap);
        let base_radius = base_radius_for(cap);

        let actors: Vec<Actor> = simulated
            .iter()
            .map(|entry| {
                let pos = spawn_position(&config, base_radius, &mut rng);
                let heading = rng.range(0.0, std::f32::consts::TAU);
                let vel = Vec2::from_angle(heading) * config.max_speed;
                Actor::from_entry(entry, pos, vel)
            })
            .collect();

        let supplementary = extra
            .iter()
            .map(|entry| spawn_supplementary(entry, &config, &mut rng))
            .collect();

        let capacity = config.resource_capacity.unwrap_or_else(|| capacity_for(cap));
        let resource = Resource {
            center: config.resource_center,
            radius: config.resource_radius,
            capacity,
            remaining: capacity,
        };

        log::info!(
            "Match created: {} simulated, {} supplementary, capacity {:.1}",
            cap,
            roster.len() - cap,
            capacity
        );

        let mut m = Self {
            elapsed: 0.0,
            phase: PhaseMachine::new(),
            damage: DamageController::new(),
            consumption: ConsumptionController::new(),
            intensity: 1.0,
            base_radius,
            actors,
            supplementary,
            resource,
            initial_count: cap,
            crowd: super::consumption::crowd_modifier(cap),
            grid: SpatialIndex::new(),
            pairs: Vec::new(),
            rng,
            config,
        };
        m.evaluate_phase();
        Ok(m)
    }

    pub fn live_count(&self) -> usize {
        self.actors.iter().filter(|a| a.alive).count()
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Roster length: simulated plus supplementary
    pub fn total_participants(&self) -> usize {
        self.actors.len() + self.supplementary.len()
    }

    pub fn is_endgame(&self) -> bool {
        self.phase.is_endgame()
    }

    pub fn is_ended(&self) -> bool {
        self.phase.is_ended()
    }
}

/// Bounded rejection sampling; keeps the last sample if the arena has no room.
const SPAWN_ATTEMPTS: usize = 256;

fn spawn_position(config: &MatchConfig, radius: f32, rng: &mut impl RandomSource) -> Vec2 {
    let keep_out = config.resource_radius + radius + SPAWN_SAFETY_MARGIN;
    let lo = Vec2::splat(radius);
    let hi = (config.arena_size() - Vec2::splat(radius)).max(lo);

    let mut pos = config.arena_size() * 0.5;
    for _ in 0..SPAWN_ATTEMPTS {
        pos = Vec2::new(rng.range(lo.x, hi.x), rng.range(lo.y, hi.y));
        if pos.distance(config.resource_center) > keep_out {
            break;
        }
    }
    pos
}

fn spawn_supplementary(
    entry: &RosterEntry,
    config: &MatchConfig,
    rng: &mut impl RandomSource,
) -> SupplementaryActor {
    let arena = config.arena_size();
    let mut pos = arena * 0.5;
    for _ in 0..SPAWN_ATTEMPTS {
        pos = Vec2::new(rng.range(0.0, arena.x), rng.range(0.0, arena.y));
        if pos.distance(config.resource_center) > config.resource_radius {
            break;
        }
    }

    SupplementaryActor {
        id: entry.id,
        display_name: entry.display_name.clone(),
        pos,
        origin: pos,
        phase: rng.range(0.0, std::f32::consts::TAU),
        frequency: rng.range(0.5, 2.0),
        eliminate_at: rng.range(0.0, config.cull_window),
        alive: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::synthetic_roster;
    use crate::sim::MatchPhase;

    #[test]
    fn test_radius_bands() {
        assert_eq!(base_radius_for(1), 30.0);
        assert_eq!(base_radius_for(8), 30.0);
        assert_eq!(base_radius_for(9), 24.0);
        assert_eq!(base_radius_for(50), 18.0);
        assert_eq!(base_radius_for(51), 13.0);
        assert_eq!(base_radius_for(250), 8.0);
        assert_eq!(base_radius_for(251), 5.0);
    }

    #[test]
    fn test_capacity_bands() {
        assert!((capacity_for(10) - 26.0).abs() < 1e-4);
        assert!((capacity_for(50) - 95.0).abs() < 1e-4);
        assert!((capacity_for(500) - 450.0).abs() < 1e-3);
        // Bands past the table reuse the last multiplier
        assert!((capacity_for(2000) - 1800.0).abs() < 1e-2);
    }

    #[test]
    fn test_spawn_outside_resource() {
        let config = MatchConfig::default();
        let m = Match::new(&synthetic_roster(200, 3), config.clone()).unwrap();
        assert_eq!(m.actors.len(), 200);
        for actor in &m.actors {
            let keep_out = config.resource_radius + m.base_radius + SPAWN_SAFETY_MARGIN;
            assert!(actor.pos.distance(config.resource_center) > keep_out);
            assert!(actor.pos.x >= m.base_radius && actor.pos.x <= config.arena_width - m.base_radius);
            assert!((actor.vel.length() - config.max_speed).abs() < 1e-2);
        }
    }

    #[test]
    fn test_animation_cap_splits_roster() {
        let config = MatchConfig {
            animation_cap: 30,
            ..Default::default()
        };
        let roster = synthetic_roster(45, 8);
        let m = Match::new(&roster, config).unwrap();
        assert_eq!(m.actors.len(), 30);
        assert_eq!(m.supplementary.len(), 15);
        assert_eq!(m.actors[29].id, roster[29].id);
        assert_eq!(m.supplementary[0].id, roster[30].id);
        assert_eq!(m.total_participants(), 45);
        assert!(m.supplementary.iter().all(|s| s.eliminate_at < 12.0));
    }

    #[test]
    fn test_small_roster_starts_in_endgame() {
        let m = Match::new(&synthetic_roster(10, 1), MatchConfig::default()).unwrap();
        assert_eq!(m.phase.phase(), MatchPhase::Endgame);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            Match::new(&[], MatchConfig::default()),
            Err(SimError::EmptyRoster)
        ));
        let config = MatchConfig {
            max_speed: 0.0,
            ..Default::default()
        };
        assert!(Match::new(&synthetic_roster(3, 1), config).is_err());
    }
}
