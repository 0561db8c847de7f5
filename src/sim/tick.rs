//! Simulation tick
//!
//! Advances a match by one step in a fixed order: motion, spatial index,
//! combat, consumption, controllers, phase machine, cull.

use super::combat::{self, CombatParams};
use super::consumption::{self, ConsumptionParams};
use super::controller::PacingInput;
use super::cull;
use super::motion::{self, MotionContext};
use super::rng::RandomSource;
use super::state::{Match, base_radius_for};
use crate::consts::*;
use crate::outcome::{MatchOutcome, Standing};

/// Clamp a caller-provided dt into `[0, max]`; garbage becomes 0.
fn sanitize_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max)
    } else {
        0.0
    }
}

/// Advance the match by `dt` seconds
pub fn tick<R: RandomSource>(m: &mut Match<R>, dt: f32) {
    let dt = sanitize_dt(dt, m.config.max_step_dt);
    if dt == 0.0 {
        return;
    }

    if m.phase.is_ended() {
        m.phase.advance_hold(dt);
        run_cull(m);
        return;
    }

    m.elapsed += dt;
    let endgame = m.phase.is_endgame();

    // Motion & boundaries
    let motion_ctx = MotionContext {
        arena: m.config.arena_size(),
        resource_center: m.resource.center,
        resource_radius: m.resource.radius,
        max_speed: m.config.max_speed,
        base_radius: m.base_radius,
        endgame,
    };
    for actor in m.actors.iter_mut().filter(|a| a.alive) {
        motion::advance(actor, &motion_ctx, dt);
    }

    // Spatial index
    let base = m.base_radius;
    let largest = m
        .actors
        .iter()
        .filter(|a| a.alive)
        .map(|a| a.effective_radius(base, endgame))
        .fold(base, f32::max);
    let cell = (base * 4.0).max(2.0 * largest);
    m.grid.rebuild(
        m.config.arena_size(),
        cell,
        m.actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(|(i, a)| (i, a.pos)),
    );
    m.pairs.clear();
    m.grid.candidate_pairs(&mut m.pairs);

    // Combat
    let mut alive = m.live_count();
    let combat_params = CombatParams {
        max_speed: m.config.max_speed,
        base_radius: base,
        endgame,
        damage_scale: m.damage.scale(),
        damage_coefficient: m.config.damage_coefficient,
    };
    let combat = combat::resolve(&mut m.actors, &m.pairs, &combat_params, &mut alive, &mut m.rng);
    m.intensity = consumption::escalate_intensity(m.intensity, combat.deaths, alive, endgame);

    // Consumption
    let consumption_params = ConsumptionParams {
        base_radius: base,
        max_speed: m.config.max_speed,
        endgame,
        crowd: m.crowd,
        scale: m.consumption.scale(),
        intensity: m.intensity,
        alive,
    };
    let eaten = consumption::consume(&mut m.actors, &mut m.resource, &consumption_params);

    let band = base_radius_for(alive);
    if band != m.base_radius {
        log::debug!(
            "t={:.2}s radius band {} -> {} ({} alive)",
            m.elapsed,
            m.base_radius,
            band,
            alive
        );
        m.base_radius = band;
    }

    // Controllers
    m.damage.update(
        alive,
        m.initial_count,
        m.resource.eaten_fraction(),
        m.config.target_survivors,
    );
    m.consumption.update(&PacingInput {
        dt,
        raw_consumed: eaten.raw,
        elapsed: m.elapsed,
        remaining: m.resource.remaining,
        capacity: m.resource.capacity,
        target_duration: m.config.target_duration,
    });

    m.evaluate_phase();
    run_cull(m);
}

fn run_cull<R: RandomSource>(m: &mut Match<R>) {
    let clock = m.elapsed + m.phase.hold_elapsed();
    let culled = cull::update(&mut m.supplementary, clock, m.config.cull_window);
    if culled > 0 {
        log::debug!("culled {culled} supplementary actors at t={clock:.2}s");
    }
}

impl<R: RandomSource> Match<R> {
    /// Advance by `dt` seconds (clamped to `max_step_dt`)
    pub fn step(&mut self, dt: f32) {
        tick(self, dt);
    }

    /// Run the phase machine against the current counts
    pub(crate) fn evaluate_phase(&mut self) {
        let alive = self.live_count();
        let transition = self.phase.evaluate(
            self.elapsed,
            alive,
            self.resource.is_depleted(),
            self.config.endgame_threshold,
        );

        if transition.entered_endgame {
            for actor in self.actors.iter_mut().filter(|a| a.alive) {
                actor.endgame_score = 0.0;
            }
            log::info!("Endgame at t={:.2}s with {} alive", self.elapsed, alive);
        }

        if let Some(reason) = transition.ended {
            log::info!(
                "Match ended at t={:.2}s: {:?}, {} alive, {:.2} remaining",
                self.elapsed,
                reason,
                alive,
                self.resource.remaining
            );
            let (min, max) = (self.config.min_duration, self.config.max_duration);
            if self.elapsed > 0.0 && !(min..=max).contains(&self.elapsed) {
                log::warn!(
                    "Match duration {:.2}s outside the [{min}, {max}]s window",
                    self.elapsed
                );
            }
        }
    }

    /// Winner of an ended match: highest score among the living, lowest id on ties
    pub fn winner(&self) -> Option<&super::state::Actor> {
        if !self.is_ended() {
            return None;
        }
        self.actors
            .iter()
            .filter(|a| a.alive)
            .min_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)))
    }

    /// Terminal results, available once the display hold has elapsed
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.phase.hold_complete(self.config.display_hold) {
            return None;
        }
        self.final_results()
    }

    /// Terminal results as soon as the match has ended, ignoring the hold
    pub fn final_results(&self) -> Option<MatchOutcome> {
        let reason = self.phase.end_reason()?;
        let standings = self
            .actors
            .iter()
            .map(|a| Standing {
                id: a.id,
                name: &a.display_name,
                score: a.score,
                survived: a.alive,
            })
            .collect();
        let supplementary: Vec<u64> = self.supplementary.iter().map(|s| s.id).collect();
        let duration = self.phase.ended_at().unwrap_or(self.elapsed);
        Some(MatchOutcome::build(duration, reason, standings, &supplementary))
    }
}

/// Longest frame the accumulator will absorb (e.g. after a tab was backgrounded)
const MAX_FRAME_DT: f32 = 0.25;

/// Frame-time accumulator feeding fixed `SIM_DT` steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `frame_dt` of wall time; returns the number of steps taken.
    ///
    /// At most `MAX_SUBSTEPS` per frame; leftover time past that is dropped.
    pub fn advance<R: RandomSource>(&mut self, m: &mut Match<R>, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(m, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        substeps
    }
}
