//! Roster input
//!
//! The ordered list of identities + stats a match is built from. Fetching or
//! persisting rosters is someone else's job; this is plain data in.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A single roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: u64,
    pub display_name: String,
    pub base_health: f32,
    pub base_defense: f32,
    pub base_attack: f32,
    pub consumption_rate: f32,
    /// Opaque to the core (renderer looks it up)
    #[serde(default)]
    pub portrait_ref: Option<String>,
}

impl RosterEntry {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            base_health: 100.0,
            base_defense: 8.0,
            base_attack: 12.0,
            consumption_rate: 100.0,
            portrait_ref: None,
        }
    }

    fn validate(&self) -> Result<(), SimError> {
        let stats = [
            self.base_health,
            self.base_defense,
            self.base_attack,
            self.consumption_rate,
        ];
        if stats.iter().any(|s| !s.is_finite()) {
            return Err(SimError::InvalidRosterEntry {
                id: self.id,
                reason: "stats must be finite",
            });
        }
        if self.base_health <= 0.0 {
            return Err(SimError::InvalidRosterEntry {
                id: self.id,
                reason: "base health must be positive",
            });
        }
        if self.consumption_rate < 0.0 {
            return Err(SimError::InvalidRosterEntry {
                id: self.id,
                reason: "consumption rate must not be negative",
            });
        }
        Ok(())
    }
}

/// Validate a whole roster: non-empty, unique ids, sane stats
pub fn validate_roster(roster: &[RosterEntry]) -> Result<(), SimError> {
    if roster.is_empty() {
        return Err(SimError::EmptyRoster);
    }
    let mut seen = HashSet::with_capacity(roster.len());
    for entry in roster {
        entry.validate()?;
        if !seen.insert(entry.id) {
            return Err(SimError::DuplicateId(entry.id));
        }
    }
    Ok(())
}

/// Parse a JSON array of roster entries
pub fn parse_roster(json: &str) -> Result<Vec<RosterEntry>, SimError> {
    let roster: Vec<RosterEntry> =
        serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "roster",
            source,
        })?;
    validate_roster(&roster)?;
    Ok(roster)
}

/// Deterministic roster with lightly varied stats, for demos and tests
pub fn synthetic_roster(count: usize, seed: u64) -> Vec<RosterEntry> {
    let mut rng = Pcg32::seed_from_u64(seed);
    (0..count)
        .map(|i| RosterEntry {
            id: i as u64 + 1,
            display_name: format!("Player {}", i + 1),
            base_health: 100.0,
            base_defense: rng.random_range(7.0..9.0),
            base_attack: rng.random_range(10.0..14.0),
            consumption_rate: rng.random_range(80.0..120.0),
            portrait_ref: None,
        })
        .collect()
}
