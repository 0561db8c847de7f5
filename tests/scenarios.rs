//! End-to-end match scenarios

use pizza_royale::consts::SIM_DT;
use pizza_royale::roster::synthetic_roster;
use pizza_royale::sim::RandomSource;
use pizza_royale::{EndReason, Match, MatchConfig, MatchPhase, RosterEntry};

/// Step until the match ends; simulated time is capped well past the window
fn run_to_end<R: RandomSource>(m: &mut Match<R>) {
    for _ in 0..(120.0 / SIM_DT) as usize {
        if m.is_ended() {
            return;
        }
        m.step(SIM_DT);
    }
}

#[test]
fn test_duration_converges_for_any_roster_size() {
    for &size in &[10usize, 50, 100, 1000, 5000] {
        let roster = synthetic_roster(size, 1234 + size as u64);
        let mut m = Match::new(&roster, MatchConfig::default()).unwrap();
        run_to_end(&mut m);

        let results = m.final_results().expect("match should end");
        assert!(
            (18.0..=32.0).contains(&results.duration_seconds),
            "{size} participants ended at {:.2}s",
            results.duration_seconds
        );
        assert!(results.survivor_count >= 1);
        assert_eq!(results.total_participants, size);
        assert_eq!(results.per_actor.len(), size);
    }
}

#[test]
fn test_survivors_land_near_target() {
    let config = MatchConfig::default();
    let target = config.target_survivors;
    for &size in &[20usize, 60, 120] {
        let mut survivors = 0;
        let mut duration = 0.0;
        let runs = 4u64;
        for seed in 0..runs {
            let roster = synthetic_roster(size, 500 + seed);
            let config = MatchConfig {
                seed: 0xC0FFEE + seed,
                ..config.clone()
            };
            let mut m = Match::new(&roster, config).unwrap();
            run_to_end(&mut m);

            let results = m.final_results().expect("match should end");
            assert!(results.survivor_count >= 1);
            survivors += results.survivor_count;
            duration += results.duration_seconds;
        }

        let mean = survivors as f32 / runs as f32;
        assert!(
            (target - 4.0..=target + 6.0).contains(&mean),
            "{size} participants: mean {mean:.1} survivors, target {target}"
        );
        let mean_duration = duration / runs as f32;
        assert!(
            (20.0..=30.0).contains(&mean_duration),
            "{size} participants: mean duration {mean_duration:.2}s"
        );
    }
}

#[test]
fn test_roster_of_one() {
    let roster = vec![RosterEntry::new(77, "Lonely")];
    let m = Match::new(&roster, MatchConfig::default()).unwrap();

    assert!(m.is_ended());
    let results = m.final_results().unwrap();
    assert_eq!(results.end_reason, EndReason::SingleSurvivor);
    assert_eq!(results.duration_seconds, 0.0);
    assert_eq!(results.winner_id, Some(77));
    assert_eq!(results.survivor_count, 1);
}

#[test]
fn test_endgame_transition_at_threshold() {
    let roster = synthetic_roster(51, 21);
    let mut m = Match::new(&roster, MatchConfig::default()).unwrap();
    assert_eq!(m.phase.phase(), MatchPhase::Running);

    // 51 -> 50 going into the next tick
    for actor in m.actors.iter_mut() {
        actor.endgame_score = 3.0;
    }
    m.actors[0].alive = false;
    m.step(SIM_DT);

    assert_eq!(m.phase.phase(), MatchPhase::Endgame);
    let started = m.phase.endgame_started_at().unwrap();
    assert!(m.actors.iter().filter(|a| a.alive).all(|a| a.endgame_score == 0.0));

    for _ in 0..60 {
        m.step(SIM_DT);
    }
    assert_eq!(m.phase.endgame_started_at(), Some(started));
}

#[test]
fn test_four_actor_scenario() {
    let roster: Vec<RosterEntry> = (1..=4)
        .map(|id| RosterEntry {
            base_health: 40.0,
            base_attack: 30.0,
            base_defense: 5.0,
            consumption_rate: 100.0,
            ..RosterEntry::new(id, format!("Slice {id}"))
        })
        .collect();
    let config = MatchConfig {
        resource_capacity: Some(10.0),
        seed: 4,
        ..Default::default()
    };
    let mut m = Match::new(&roster, config).unwrap();
    run_to_end(&mut m);

    let results = m.final_results().expect("match should end");
    assert!(results.duration_seconds.is_finite());
    assert!(
        (1..=3).contains(&results.survivor_count),
        "{} survivors",
        results.survivor_count
    );
    let total: f32 = results.per_actor.iter().map(|r| r.score).sum();
    assert!(total <= 10.0 + 1e-3, "ate {total}");
}

#[test]
fn test_outcome_ranks_survivors_first() {
    let roster = synthetic_roster(60, 8);
    let mut m = Match::new(&roster, MatchConfig::default()).unwrap();
    run_to_end(&mut m);
    let results = m.final_results().unwrap();

    let first_dead = results
        .per_actor
        .iter()
        .position(|r| !r.survived)
        .unwrap_or(results.per_actor.len());
    assert_eq!(first_dead, results.survivor_count);
    assert!(results.per_actor[first_dead..].iter().all(|r| !r.survived));
    for pair in results.per_actor[..first_dead].windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(results.winner_id, Some(results.per_actor[0].id));
    assert_eq!(m.winner().map(|w| w.id), results.winner_id);
}
