//! Simulation module
//!
//! All match logic lives here. This module must stay free of I/O:
//! - Time only advances through `Match::step`
//! - Randomness only comes from the injected `RandomSource`
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod consumption;
pub mod controller;
pub mod cull;
pub mod grid;
pub mod motion;
pub mod phase;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, reflect_velocity};
pub use controller::{ConsumptionController, DamageController};
pub use grid::SpatialIndex;
pub use phase::{EndReason, MatchPhase, PhaseMachine};
pub use rng::{Lcg, RandomSource};
pub use snapshot::{ActorView, Snapshot, SupplementaryView};
pub use state::{Actor, Match, Resource, SupplementaryActor, base_radius_for, capacity_for};
pub use tick::{FixedStep, tick};
