//! Match phase machine: running, endgame, ended

use serde::{Deserialize, Serialize};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPhase {
    /// Full field, nominal speed
    Running,
    /// Field has thinned out: slower movement, growth from eating
    Endgame,
    /// Terminal; only the hold timer advances
    Ended,
}

/// Why the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndReason {
    ResourceDepleted,
    SingleSurvivor,
}

/// What changed during one evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub entered_endgame: bool,
    pub ended: Option<EndReason>,
}

#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: MatchPhase,
    end_reason: Option<EndReason>,
    endgame_started_at: Option<f32>,
    ended_at: Option<f32>,
    /// Time spent in the ended state
    hold: f32,
}

impl Default for PhaseMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseMachine {
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Running,
            end_reason: None,
            endgame_started_at: None,
            ended_at: None,
            hold: 0.0,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_endgame(&self) -> bool {
        self.phase == MatchPhase::Endgame
    }

    pub fn is_ended(&self) -> bool {
        self.phase == MatchPhase::Ended
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn endgame_started_at(&self) -> Option<f32> {
        self.endgame_started_at
    }

    pub fn ended_at(&self) -> Option<f32> {
        self.ended_at
    }

    pub fn hold_elapsed(&self) -> f32 {
        self.hold
    }

    /// Check triggers against the current counts.
    ///
    /// The endgame fires at most once; depletion wins over single-survivor when both hold.
    pub fn evaluate(
        &mut self,
        elapsed: f32,
        alive: usize,
        resource_depleted: bool,
        endgame_threshold: usize,
    ) -> Transition {
        let mut transition = Transition::default();
        if self.phase == MatchPhase::Ended {
            return transition;
        }

        if self.phase == MatchPhase::Running && alive <= endgame_threshold {
            self.phase = MatchPhase::Endgame;
            self.endgame_started_at = Some(elapsed);
            transition.entered_endgame = true;
        }

        let reason = if resource_depleted {
            Some(EndReason::ResourceDepleted)
        } else if alive <= 1 {
            Some(EndReason::SingleSurvivor)
        } else {
            None
        };

        if let Some(reason) = reason {
            self.phase = MatchPhase::Ended;
            self.end_reason = Some(reason);
            self.ended_at = Some(elapsed);
            transition.ended = Some(reason);
        }

        transition
    }

    /// Advance the post-end hold timer
    pub fn advance_hold(&mut self, dt: f32) {
        if self.phase == MatchPhase::Ended {
            self.hold += dt;
        }
    }

    /// Ended and held for at least `display_hold` seconds
    pub fn hold_complete(&self, display_hold: f32) -> bool {
        self.phase == MatchPhase::Ended && self.hold >= display_hold
    }
}
