//! Simulation configuration.

use crate::config::GameConfig;
use crate::game::Viewport;

/// Configuration for a batch of headless autopilot sessions.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Ticks per session before it counts as a timeout
    pub max_ticks_per_run: u64,

    /// World size the sessions are played in
    pub viewport: Viewport,

    /// Physics tuning
    pub game: GameConfig,

    /// Output verbosity (0 = report only, 1 = banner and report, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            max_ticks_per_run: 100_000,
            viewport: Viewport::default(),
            game: GameConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small deterministic batch for tests.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 10,
            seed: Some(seed),
            max_ticks_per_run: 5_000,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Whether the CLI prints its banner and configuration block.
    pub fn shows_summary(&self) -> bool {
        self.verbosity >= 1
    }

    /// Whether the runner prints a line per finished run.
    pub fn shows_runs(&self) -> bool {
        self.verbosity >= 2
    }
}
