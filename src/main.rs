//! Pizza Royale headless runner
//!
//! Loads (or synthesizes) a roster, runs a match at the fixed timestep and
//! prints the outcome as JSON.
//!
//! Usage: pizza-royale [--roster FILE] [--config FILE] [--actors COUNT] [--seed N]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use clap::Parser;
    use clap::builder::RangedU64ValueParser;

    use pizza_royale::consts::SIM_DT;
    use pizza_royale::roster::{parse_roster, synthetic_roster};
    use pizza_royale::sim::FixedStep;
    use pizza_royale::{Match, MatchConfig, RosterEntry};

    /// Safety net for a match that somehow never ends (simulated seconds)
    const MAX_SIM_SECONDS: f32 = 600.0;

    /// Run a headless Pizza Royale match and print the outcome as JSON.
    #[derive(Debug, Parser)]
    #[command(name = "pizza-royale", version, about, long_about = None)]
    struct Args {
        /// Roster JSON file (array of entries). A synthetic roster is used when omitted.
        #[arg(long, value_name = "FILE")]
        roster: Option<PathBuf>,
        /// Match config JSON file; missing fields take defaults.
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Size of the synthetic roster.
        #[arg(
            long,
            value_name = "COUNT",
            default_value_t = 100,
            conflicts_with = "roster",
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=100_000)
        )]
        actors: usize,
        /// Overrides the config seed.
        #[arg(long)]
        seed: Option<u64>,
    }

    fn read(path: &Path) -> Result<String, String> {
        fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))
    }

    fn load(args: &Args) -> Result<(Vec<RosterEntry>, MatchConfig), String> {
        let mut config = match &args.config {
            Some(path) => MatchConfig::from_json(&read(path)?).map_err(|e| e.to_string())?,
            None => MatchConfig::default(),
        };
        if let Some(seed) = args.seed {
            config.seed = seed;
        }

        let roster = match &args.roster {
            Some(path) => parse_roster(&read(path)?).map_err(|e| e.to_string())?,
            None => synthetic_roster(args.actors, config.seed),
        };
        Ok((roster, config))
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args = Args::parse();
        let (roster, config) = match load(&args) {
            Ok(loaded) => loaded,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };

        log::info!("Pizza Royale: {} participants, seed {}", roster.len(), config.seed);
        let mut game = match Match::new(&roster, config) {
            Ok(m) => m,
            Err(e) => {
                log::error!("cannot start match: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Headless: feed exactly one fixed step per "frame"
        let mut clock = FixedStep::new();
        let mut last_report = 0;
        let mut sim_time = 0.0;
        while game.outcome().is_none() && sim_time < MAX_SIM_SECONDS {
            clock.advance(&mut game, SIM_DT);
            sim_time += SIM_DT;

            let second = game.elapsed as u32;
            if second > last_report && !game.is_ended() {
                last_report = second;
                let snap = game.snapshot();
                log::debug!(
                    "t={:>4.1}s alive={:>4} remaining={:>5.1}% damage={:.2} consumption={:.2}",
                    snap.elapsed,
                    snap.live_count,
                    snap.resource_remaining_ratio * 100.0,
                    game.damage.scale(),
                    game.consumption.scale()
                );
            }
        }

        let Some(outcome) = game.final_results() else {
            log::error!("match did not finish within {MAX_SIM_SECONDS}s");
            return ExitCode::FAILURE;
        };
        if let Some(winner) = game.winner() {
            log::info!("Winner: {} ({:.2})", winner.display_name, winner.score);
        }

        match outcome.to_json() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("failed to serialize outcome: {e}");
                ExitCode::FAILURE
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; embedders drive `Match::step` themselves
}
