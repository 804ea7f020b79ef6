//! Simulation runner driving the real [`Game`] controller.
//!
//! Sessions advance one tick at a time through `Game::tick`, so the results
//! reflect exactly what the interactive game would do with the same taps.

use super::autopilot::should_tap;
use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::game::{Game, GameEvent, GamePhase};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);

        if config.shows_runs() {
            println!(
                "Run {}/{} - Score {}, Ticks {}, Taps {}{}",
                run_idx + 1,
                config.num_runs,
                run.score,
                run.ticks,
                run.taps,
                if run.timed_out { " (timeout)" } else { "" }
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs)
}

/// Play one session with the autopilot until it crashes or times out.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let mut game = Game::new(config.game.clone(), config.viewport);
    game.on_tap(rng);

    let mut taps = 0u64;
    let mut ticks = 0u64;

    while ticks < config.max_ticks_per_run {
        if should_tap(&game) {
            game.on_tap(rng);
            taps += 1;
        }

        let Some(token) = game.clock_token() else {
            break;
        };
        let events = game.tick(token, rng);
        ticks += 1;

        if events
            .iter()
            .any(|e| matches!(e, GameEvent::Collided { .. }))
        {
            break;
        }
    }

    let timed_out = game.phase() == GamePhase::Playing;
    if timed_out {
        game.on_collision();
    }

    RunStats {
        score: game.score(),
        ticks,
        taps,
        timed_out,
    }
}
