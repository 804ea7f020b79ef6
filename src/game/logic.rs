//! Game logic: the pure per-tick step and the state machine around it.

use super::clock::{GameClock, TickToken};
use super::collision::is_colliding;
use super::obstacles::{advance_pipes, prune_pipes, spawn_pipe, update_spawns};
use super::physics::{apply_gravity, apply_jump};
use super::types::{
    Bird, GameEvent, GamePhase, Pipe, Session, StepContext, Viewport, FLAP_ANIM_TICKS,
};
use crate::config::GameConfig;
use rand::Rng;

/// Result of one physics step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub session: Session,
    /// Score notifications produced during the step.
    pub events: Vec<GameEvent>,
    /// The bird hit something. Pipes were not advanced on this step.
    pub collided: bool,
}

/// Advance a session by one tick: physics, collision, then obstacles.
///
/// Depends only on its arguments. The caller decides what a collision means
/// for the game phase.
pub fn step<R: Rng>(mut session: Session, ctx: &StepContext, rng: &mut R) -> StepOutcome {
    let config = ctx.config;
    let viewport = ctx.viewport;

    session.tick_count += 1;
    session.flap_timer = session.flap_timer.saturating_sub(1);

    apply_gravity(&mut session.bird, config.gravity);

    if is_colliding(session.bird.y, &session.pipes, viewport, config) {
        return StepOutcome {
            session,
            events: Vec::new(),
            collided: true,
        };
    }

    let mut events = Vec::new();
    let crossed = advance_pipes(
        &mut session.pipes,
        config.pipe_speed,
        config.pipe_width,
        viewport.center_x(),
    );
    for _ in 0..crossed {
        session.score += 1;
        tracing::debug!(score = session.score, "pipe passed");
        events.push(GameEvent::Scored {
            score: session.score,
        });
    }

    prune_pipes(&mut session.pipes, config.pipe_width);
    update_spawns(&mut session, viewport, config, rng);

    tracing::trace!(
        tick = session.tick_count,
        y = session.bird.y,
        velocity = session.bird.velocity,
        pipes = session.pipes.len(),
        "tick"
    );

    StepOutcome {
        session,
        events,
        collided: false,
    }
}

/// The game controller: owns the session, the clock, and the high score.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    viewport: Viewport,
    phase: GamePhase,
    session: Session,
    /// Best score this process has seen. Never persisted.
    high_score: u32,
    clock: GameClock,
    sessions_played: u32,
}

impl Game {
    /// A new game in the `Ready` phase.
    pub fn new(config: GameConfig, viewport: Viewport) -> Self {
        let clock = GameClock::new(config.tick_interval_ms);
        Self {
            config,
            viewport,
            phase: GamePhase::Ready,
            session: Session::new(viewport),
            high_score: 0,
            clock,
            sessions_played: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn bird(&self) -> Bird {
        self.session.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.session.pipes
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn flap_timer(&self) -> u32 {
        self.session.flap_timer
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    /// True right after a session that tied or beat the previous best.
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::GameOver && self.session.score == self.high_score
    }

    /// Token of the running clock, if any.
    pub fn clock_token(&self) -> Option<TickToken> {
        self.clock.token()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Update the playable area. Takes effect on the next tick.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "viewport changed"
            );
        }
        self.viewport = viewport;
        if self.phase == GamePhase::Ready {
            self.session.bird = Bird::centered(viewport);
        }
    }

    /// Handle a tap.
    ///
    /// `Ready` and `GameOver` start a fresh session; `Playing` applies the
    /// jump impulse.
    pub fn on_tap<R: Rng>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        match self.phase {
            GamePhase::Ready | GamePhase::GameOver => {
                self.start_session(rng);
                vec![GameEvent::Started]
            }
            GamePhase::Playing => {
                apply_jump(&mut self.session.bird, self.config.jump_velocity);
                self.session.flap_timer = FLAP_ANIM_TICKS;
                vec![GameEvent::Jumped]
            }
        }
    }

    /// Reset, seed the first pipe, and start the clock in one call.
    fn start_session<R: Rng>(&mut self, rng: &mut R) {
        self.clock.cancel();

        let mut session = Session::new(self.viewport);
        let first_x = self.viewport.width + self.config.first_pipe_offset;
        spawn_pipe(&mut session, first_x, self.viewport, &self.config, rng);
        self.session = session;

        self.sessions_played += 1;
        self.phase = GamePhase::Playing;
        self.clock.start();

        tracing::info!(session = self.sessions_played, "session started");
    }

    /// End the session after a crash. No-op outside `Playing`.
    pub fn on_collision(&mut self) -> Option<GameEvent> {
        if self.phase != GamePhase::Playing {
            return None;
        }

        self.clock.cancel();
        self.phase = GamePhase::GameOver;

        let score = self.session.score;
        if score > self.high_score {
            self.high_score = score;
        }
        let new_high_score = score == self.high_score;

        tracing::info!(
            score,
            high_score = self.high_score,
            ticks = self.session.tick_count,
            "session ended"
        );

        Some(GameEvent::Collided {
            score,
            new_high_score,
        })
    }

    /// Return to `Ready` with a clean session. The high score is kept, and a
    /// session abandoned mid-play still counts toward it.
    pub fn reset(&mut self) {
        if self.phase == GamePhase::Playing {
            self.high_score = self.high_score.max(self.session.score);
            tracing::info!(
                score = self.session.score,
                high_score = self.high_score,
                "session abandoned"
            );
        }
        self.clock.cancel();
        self.phase = GamePhase::Ready;
        self.session = Session::new(self.viewport);
    }

    /// Feed elapsed wall time and run every tick that has come due.
    ///
    /// Stops early if a tick ends the session.
    pub fn update<R: Rng>(&mut self, dt_ms: u64, rng: &mut R) -> Vec<GameEvent> {
        let due = self.clock.advance(dt_ms);
        let mut events = Vec::new();
        for _ in 0..due {
            let Some(token) = self.clock.token() else {
                break;
            };
            events.extend(self.tick(token, rng));
        }
        events
    }

    /// Run one tick for the clock run identified by `token`.
    ///
    /// A stale token, or any phase other than `Playing`, makes this a no-op.
    pub fn tick<R: Rng>(&mut self, token: TickToken, rng: &mut R) -> Vec<GameEvent> {
        if self.phase != GamePhase::Playing || !self.clock.is_current(token) {
            tracing::trace!(?token, "stale tick ignored");
            return Vec::new();
        }

        let ctx = StepContext {
            config: &self.config,
            viewport: self.viewport,
        };
        let session = std::mem::take(&mut self.session);
        let outcome = step(session, &ctx, rng);
        self.session = outcome.session;

        let mut events = outcome.events;
        if outcome.collided {
            events.extend(self.on_collision());
        }
        events
    }
}
