//! Errors reported while building a match
//!
//! Once a `Match` exists every tick is total; these only surface at construction or parsing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("roster is empty")]
    EmptyRoster,
    #[error("arena dimensions must be positive, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("resource radius must be positive, got {0}")]
    InvalidResourceRadius(f32),
    #[error("resource center ({x}, {y}) lies outside the arena")]
    ResourceOutsideArena { x: f32, y: f32 },
    #[error("duration window must satisfy 0 < min <= target <= max, got {min}/{target}/{max}")]
    InvalidDurationWindow { min: f32, target: f32, max: f32 },
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("roster entry {id}: {reason}")]
    InvalidRosterEntry { id: u64, reason: &'static str },
    #[error("duplicate roster id {0}")]
    DuplicateId(u64),
    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
