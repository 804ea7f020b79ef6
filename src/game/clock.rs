//! Fixed-period game clock.
//!
//! The host loop feeds elapsed wall time in; the clock hands back how many
//! physics ticks are due. Each start issues a new [`TickToken`], and a cancel
//! invalidates it, so a tick scheduled against an older run is recognisably
//! stale.

use crate::constants::MAX_FRAME_DT_MS;

/// Identifies one run of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

#[derive(Debug, Clone)]
pub struct GameClock {
    interval_ms: u64,
    /// Generation of the most recent start; bumped on cancel too.
    generation: u64,
    running: bool,
    /// Sub-tick time accumulator (milliseconds).
    accumulated_ms: u64,
}

impl GameClock {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            generation: 0,
            running: false,
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start a fresh run. Any previous run's token becomes stale.
    pub fn start(&mut self) -> TickToken {
        self.generation += 1;
        self.running = true;
        self.accumulated_ms = 0;
        TickToken(self.generation)
    }

    /// Stop the clock and drop any pending time. Idempotent.
    pub fn cancel(&mut self) {
        if self.running {
            self.generation += 1;
        }
        self.running = false;
        self.accumulated_ms = 0;
    }

    /// Token of the live run, if the clock is running.
    pub fn token(&self) -> Option<TickToken> {
        self.running.then_some(TickToken(self.generation))
    }

    /// True if `token` belongs to the live run.
    pub fn is_current(&self, token: TickToken) -> bool {
        self.running && token.0 == self.generation
    }

    /// Feed elapsed milliseconds. Returns the number of whole ticks now due;
    /// the remainder carries over. Always 0 while stopped.
    ///
    /// `dt_ms` is capped at [`MAX_FRAME_DT_MS`] so a stalled frame cannot
    /// burst-fire a long run of ticks.
    pub fn advance(&mut self, dt_ms: u64) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulated_ms += dt_ms.min(MAX_FRAME_DT_MS);
        let due = self.accumulated_ms / self.interval_ms;
        self.accumulated_ms %= self.interval_ms;
        due as u32
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(crate::constants::TICK_INTERVAL_MS)
    }
}
