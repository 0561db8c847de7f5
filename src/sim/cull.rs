//! Timed elimination of supplementary actors

use glam::Vec2;

use super::state::SupplementaryActor;

/// Wobble radius around each supplementary actor's origin (px)
const OSCILLATION_AMPLITUDE: f32 = 6.0;

/// Animate supplementary actors and remove the ones whose time has come.
///
/// `clock` is match time including any post-end hold. Past `window` every
/// remaining actor is removed. Returns how many were culled this call.
pub fn update(supplementary: &mut [SupplementaryActor], clock: f32, window: f32) -> usize {
    let force = clock >= window;
    let mut culled = 0;

    for actor in supplementary.iter_mut().filter(|s| s.alive) {
        if force || clock >= actor.eliminate_at {
            actor.alive = false;
            culled += 1;
            continue;
        }
        let t = clock * actor.frequency + actor.phase;
        actor.pos = actor.origin + Vec2::new(t.sin(), (t * 0.8).cos()) * OSCILLATION_AMPLITUDE;
    }

    culled
}
