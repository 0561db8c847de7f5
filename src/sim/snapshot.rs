//! Per-tick render view of a match

use glam::Vec2;
use serde::Serialize;

use super::phase::MatchPhase;
use super::rng::RandomSource;
use super::state::Match;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorView {
    pub id: u64,
    pub position: Vec2,
    pub radius: f32,
    pub health_ratio: f32,
    pub score: f32,
    pub rotation: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryView {
    pub id: u64,
    pub position: Vec2,
}

/// Living actors and match summary after a step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elapsed: f32,
    pub phase: MatchPhase,
    pub live_count: usize,
    pub resource_remaining_ratio: f32,
    pub actors: Vec<ActorView>,
    pub supplementary: Vec<SupplementaryView>,
}

impl<R: RandomSource> Match<R> {
    pub fn snapshot(&self) -> Snapshot {
        let endgame = self.is_endgame();
        let actors: Vec<ActorView> = self
            .actors
            .iter()
            .filter(|a| a.alive)
            .map(|a| ActorView {
                id: a.id,
                position: a.pos,
                radius: a.effective_radius(self.base_radius, endgame),
                health_ratio: a.health_ratio(),
                score: a.score,
                rotation: a.rotation,
            })
            .collect();

        Snapshot {
            elapsed: self.elapsed,
            phase: self.phase.phase(),
            live_count: actors.len(),
            resource_remaining_ratio: self.resource.remaining_ratio(),
            actors,
            supplementary: self
                .supplementary
                .iter()
                .filter(|s| s.alive)
                .map(|s| SupplementaryView {
                    id: s.id,
                    position: s.pos,
                })
                .collect(),
        }
    }
}
