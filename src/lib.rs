//! Pizza Royale - battle-royale arena simulation core
//!
//! Core modules:
//! - `sim`: Simulation (motion, collisions, combat, consumption, pacing controllers)
//! - `config`: Match configuration with validated defaults
//! - `roster`: Roster input records
//! - `outcome`: Terminal match results and ranking
//! - `error`: Construction/parsing errors

pub mod config;
pub mod error;
pub mod outcome;
pub mod roster;
pub mod sim;

pub use config::MatchConfig;
pub use error::SimError;
pub use outcome::{ActorResult, MatchOutcome};
pub use roster::RosterEntry;
pub use sim::{Match, MatchPhase, EndReason, Snapshot};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep used by the runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Remaining resource at or below this counts as depleted
    pub const RESOURCE_EPSILON: f32 = 1e-4;
    /// Participants per capacity-multiplier band
    pub const CAPACITY_BAND_SIZE: usize = 50;
    /// Capacity multiplier per band of 50 participants (last entry covers all larger bands)
    pub const CAPACITY_MULTIPLIERS: [f32; 11] =
        [2.6, 1.9, 1.7, 1.5, 1.4, 1.3, 1.2, 1.1, 1.0, 0.95, 0.9];

    /// Keep-out margin around the resource when spawning
    pub const SPAWN_SAFETY_MARGIN: f32 = 60.0;
    /// Movement slowdown once the field thins out
    pub const ENDGAME_SPEED_MULTIPLIER: f32 = 0.75;

    /// Luck term range, symmetric around zero
    pub const LUCK_RANGE: f32 = 10.0;
    /// Below this many living actors the last-standing rule applies
    pub const LAST_STANDING_BELOW: usize = 3;

    /// Resource consumed per bite per unit of consumption rate
    pub const CONSUMPTION_COEFFICIENT: f32 = 0.01;
    /// Endgame bonuses per unit consumed
    pub const ATTACK_BONUS_PER_UNIT: f32 = 2.0;
    pub const HEALTH_BONUS_PER_UNIT: f32 = 1.0;
    pub const DEFENSE_BONUS_PER_UNIT: f32 = 0.5;
    pub const SPEED_BOOST_PER_UNIT: f32 = 0.02;
    /// Speed boost cap relative to nominal max speed
    pub const MAX_SPEED_BOOST: f32 = 1.8;
    /// Effective radius gained per whole unit of endgame score
    pub const SIZE_BONUS_PER_UNIT: f32 = 0.5;

    /// Intensity growth per death (scaled by 1 / live count)
    pub const INTENSITY_STEP_RUNNING: f32 = 0.8;
    pub const INTENSITY_STEP_ENDGAME: f32 = 0.35;
    /// Late-game scarcity brake
    pub const SCARCITY_EATEN_FRACTION: f32 = 0.6;
    pub const SCARCITY_LIVE_BELOW: usize = 25;
    pub const SCARCITY_FACTOR: f32 = 0.85;
    /// Endgame final brake
    pub const FINAL_BRAKE_EATEN_FRACTION: f32 = 0.85;
    pub const FINAL_BRAKE_REMAINING_FRACTION: f32 = 0.1;
    pub const FINAL_BRAKE_FACTOR: f32 = 0.75;

    /// Damage-scale controller
    pub const DAMAGE_GAIN: f32 = 0.6;
    pub const DAMAGE_GAIN_FLOOR: f32 = 20.0;
    pub const DAMAGE_SCALE_MIN: f32 = 0.7;
    pub const DAMAGE_SCALE_MAX: f32 = 3.5;

    /// Consumption-rate controller
    pub const RATE_SMOOTHING: f32 = 0.92;
    pub const SCALE_INERTIA: f32 = 0.9;
    pub const CONSUMPTION_SCALE_MIN: f32 = 0.3;
    pub const CONSUMPTION_SCALE_MAX: f32 = 3.0;
    pub const RATE_WINDOW_SECS: f32 = 4.0;
    pub const MIN_TIME_LEFT: f32 = 1.0;
}

/// Unit vector from `from` toward `to`, or +X when the points coincide
#[inline]
pub fn direction_or_x(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    let len = d.length();
    if len > 1e-6 { d / len } else { Vec2::X }
}

/// Rescale `vel` to `speed`, pointing along `fallback` when `vel` has no direction
#[inline]
pub fn with_speed(vel: Vec2, speed: f32, fallback: Vec2) -> Vec2 {
    let len = vel.length();
    if len > 1e-6 {
        vel * (speed / len)
    } else {
        fallback.normalize_or_zero() * speed
    }
}
