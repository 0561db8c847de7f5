//! Terminal match results
//!
//! Ranks every roster entry once the match has ended: survivors first, then by
//! score (descending), then by id. Supplementary actors trail the ranking.

use serde::{Deserialize, Serialize};

use crate::sim::EndReason;

/// One row of the final ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorResult {
    pub id: u64,
    pub score: f32,
    pub survived: bool,
    /// 1-indexed
    pub rank: usize,
}

/// Final standing of a simulated actor, before ranking
#[derive(Debug, Clone)]
pub struct Standing<'a> {
    pub id: u64,
    pub name: &'a str,
    pub score: f32,
    pub survived: bool,
}

/// Terminal payload of a finished match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub duration_seconds: f32,
    pub end_reason: EndReason,
    pub winner_id: Option<u64>,
    pub winner_name: Option<String>,
    pub winner_score: f32,
    pub per_actor: Vec<ActorResult>,
    pub total_participants: usize,
    pub survivor_count: usize,
}

impl MatchOutcome {
    /// Rank the standings and pick the winner (best-ranked survivor)
    pub fn build(
        duration_seconds: f32,
        end_reason: EndReason,
        mut standings: Vec<Standing<'_>>,
        supplementary_ids: &[u64],
    ) -> Self {
        standings.sort_by(|a, b| {
            b.survived
                .cmp(&a.survived)
                .then(b.score.total_cmp(&a.score))
                .then(a.id.cmp(&b.id))
        });

        let winner = standings.first().filter(|s| s.survived);
        let winner_id = winner.map(|w| w.id);
        let winner_name = winner.map(|w| w.name.to_string());
        let winner_score = winner.map(|w| w.score).unwrap_or(0.0);
        let survivor_count = standings.iter().filter(|s| s.survived).count();

        let per_actor: Vec<ActorResult> = standings
            .iter()
            .map(|s| (s.id, s.score, s.survived))
            .chain(supplementary_ids.iter().map(|&id| (id, 0.0, false)))
            .enumerate()
            .map(|(i, (id, score, survived))| ActorResult {
                id,
                score,
                survived,
                rank: i + 1,
            })
            .collect();

        Self {
            duration_seconds,
            end_reason,
            winner_id,
            winner_name,
            winner_score,
            total_participants: per_actor.len(),
            per_actor,
            survivor_count,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
