//! Match configuration
//!
//! Every tunable the core needs, with defaults that land a match inside the
//! 20-30 second window for rosters of any size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Tunable match parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Resource ===
    pub resource_center: Vec2,
    pub resource_radius: f32,
    /// Fixed capacity; derived from the participant count when unset
    pub resource_capacity: Option<f32>,

    // === Actors ===
    /// Nominal speed magnitude (px/s)
    pub max_speed: f32,
    /// Roster entries beyond this become supplementary (visual-only) actors
    pub animation_cap: usize,
    /// Live count at which the endgame phase starts
    pub endgame_threshold: usize,
    /// Scales every combat hit before the adaptive damage factor
    pub damage_coefficient: f32,

    // === Pacing ===
    pub min_duration: f32,
    pub target_duration: f32,
    pub max_duration: f32,
    /// Survivor count the damage controller steers toward at depletion
    pub target_survivors: f32,

    // === Timing ===
    /// Largest dt a single step will integrate
    pub max_step_dt: f32,
    /// How long the ended state is held before results are reported
    pub display_hold: f32,
    /// Window over which supplementary actors are culled
    pub cull_window: f32,

    /// Seed for the default random source
    pub seed: u64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            arena_width: 1080.0,
            arena_height: 1080.0,

            resource_center: Vec2::new(540.0, 540.0),
            resource_radius: 150.0,
            resource_capacity: None,

            max_speed: 280.0,
            animation_cap: 500,
            endgame_threshold: 50,
            damage_coefficient: 0.5,

            min_duration: 20.0,
            target_duration: 25.0,
            max_duration: 30.0,
            target_survivors: 7.5,

            max_step_dt: 0.05,
            display_hold: 3.0,
            cull_window: 12.0,

            seed: 0x5EED,
        }
    }
}

impl MatchConfig {
    /// Parse a JSON config (missing fields take defaults) and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "match config",
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), SimError> {
        let (w, h) = (self.arena_width, self.arena_height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(SimError::InvalidArena {
                width: w,
                height: h,
            });
        }
        if !(self.resource_radius.is_finite() && self.resource_radius > 0.0) {
            return Err(SimError::InvalidResourceRadius(self.resource_radius));
        }
        let c = self.resource_center;
        if !(c.is_finite() && (0.0..=w).contains(&c.x) && (0.0..=h).contains(&c.y)) {
            return Err(SimError::ResourceOutsideArena { x: c.x, y: c.y });
        }
        let (min, target, max) = (self.min_duration, self.target_duration, self.max_duration);
        if !(min > 0.0 && min <= target && target <= max && max.is_finite()) {
            return Err(SimError::InvalidDurationWindow { min, target, max });
        }
        if let Some(capacity) = self.resource_capacity {
            if !(capacity.is_finite() && capacity > 0.0) {
                return Err(SimError::InvalidConfig {
                    field: "resourceCapacity",
                    reason: "must be positive",
                });
            }
        }
        if self.animation_cap == 0 {
            return Err(SimError::InvalidConfig {
                field: "animationCap",
                reason: "must be at least 1",
            });
        }
        let positive = [
            ("maxSpeed", self.max_speed),
            ("maxStepDt", self.max_step_dt),
            ("damageCoefficient", self.damage_coefficient),
            ("targetSurvivors", self.target_survivors),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: "must be positive",
                });
            }
        }
        let non_negative = [("displayHold", self.display_hold), ("cullWindow", self.cull_window)];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimError::InvalidConfig {
                    field,
                    reason: "must not be negative",
                });
            }
        }
        Ok(())
    }

    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }
}
