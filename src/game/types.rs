//! Flappy Bird data structures.
//!
//! World coordinates: x grows to the right, y grows downward, row 0 is the
//! ceiling. All positions and sizes are in world units; velocities are in
//! world units per physics tick.

use crate::config::GameConfig;
use serde::{Deserialize, Serialize};

/// Flap animation duration in physics ticks (6 ticks × 16ms ≈ 96ms).
pub const FLAP_ANIM_TICKS: u32 = 6;

/// Lifecycle phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap. Physics paused.
    #[default]
    Ready,
    /// Clock running, one physics step per tick.
    Playing,
    /// The bird crashed. A tap starts a fresh session.
    GameOver,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Playing => "Playing",
            Self::GameOver => "Game Over",
        }
    }
}

/// Playable area supplied by the host. May change between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal centre of the world. The bird is pinned here.
    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 800.0)
    }
}

/// The player's bird.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bird {
    /// Top edge of the bounding box.
    pub y: f64,
    /// Vertical velocity (positive = downward).
    pub velocity: f64,
}

impl Bird {
    /// A bird resting mid-screen.
    pub fn centered(viewport: Viewport) -> Self {
        Self {
            y: viewport.height / 2.0,
            velocity: 0.0,
        }
    }

    /// Horizontal extent `(left, right)` of the bird's box.
    pub fn horizontal_span(viewport: Viewport, size: f64) -> (f64, f64) {
        let left = viewport.center_x() - size / 2.0;
        (left, left + size)
    }
}

/// A single pipe obstacle (top + bottom pair with a gap).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Unique within a session, increasing in spawn order.
    pub id: u64,
    /// Left edge.
    pub x: f64,
    /// Height of the top obstacle, i.e. where the gap begins.
    pub gap_top: f64,
    /// Whether the bird has already been credited for this pipe.
    pub scored: bool,
}

impl Pipe {
    pub fn new(id: u64, x: f64, gap_top: f64) -> Self {
        Self {
            id,
            x,
            gap_top,
            scored: false,
        }
    }

    /// Trailing (right) edge.
    pub fn trailing_edge(&self, pipe_width: f64) -> f64 {
        self.x + pipe_width
    }

    /// Bottom of the gap, where the lower obstacle begins.
    pub fn gap_bottom(&self, gap_size: f64) -> f64 {
        self.gap_top + gap_size
    }

    /// Extent of the lower obstacle.
    pub fn bottom_height(&self, world_height: f64, gap_size: f64) -> f64 {
        world_height - self.gap_top - gap_size
    }
}

/// Everything that belongs to one play session.
///
/// Passed by value through [`crate::game::logic::step`]; the controller owns
/// the current one between ticks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    pub bird: Bird,
    /// Ordered by spawn time, which is also left-to-right on screen.
    pub pipes: Vec<Pipe>,
    /// Pipes successfully passed.
    pub score: u32,
    /// Id handed to the next spawned pipe.
    pub next_pipe_id: u64,
    /// Scrolling position of the most recently spawned pipe.
    pub spawn_reference: f64,
    /// Physics ticks elapsed.
    pub tick_count: u64,
    /// Ticks remaining to show the flap animation.
    pub flap_timer: u32,
}

impl Session {
    /// Fresh session with the bird mid-screen and no pipes.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            bird: Bird::centered(viewport),
            pipes: Vec::new(),
            score: 0,
            next_pipe_id: 0,
            spawn_reference: viewport.width,
            tick_count: 0,
            flap_timer: 0,
        }
    }
}

/// Inputs to a single physics step that do not belong to the session.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub config: &'a GameConfig,
    pub viewport: Viewport,
}

/// Fire-and-forget notifications for the host (haptics, sound, flashes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A session began.
    Started,
    /// A tap applied the jump impulse.
    Jumped,
    /// The bird cleared a pipe; `score` is the new total.
    Scored { score: u32 },
    /// The bird crashed and the session ended.
    Collided { score: u32, new_high_score: bool },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let viewport = Viewport::new(400.0, 800.0);
        let session = Session::new(viewport);
        assert!((session.bird.y - 400.0).abs() < 1e-9);
        assert!(session.bird.velocity.abs() < 1e-9);
        assert!(session.pipes.is_empty());
        assert_eq!(session.score, 0);
        assert_eq!(session.next_pipe_id, 0);
        assert_eq!(session.tick_count, 0);
    }

    #[test]
    fn test_bird_span_is_centered() {
        let (left, right) = Bird::horizontal_span(Viewport::new(400.0, 800.0), 40.0);
        assert!((left - 180.0).abs() < 1e-9);
        assert!((right - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_pipe_extents() {
        let pipe = Pipe::new(3, 100.0, 150.0);
        assert!((pipe.trailing_edge(80.0) - 180.0).abs() < 1e-9);
        assert!((pipe.gap_bottom(200.0) - 350.0).abs() < 1e-9);
        assert!((pipe.bottom_height(800.0, 200.0) - 450.0).abs() < 1e-9);
        assert!(!pipe.scored);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(GamePhase::default(), GamePhase::Ready);
        assert_eq!(GamePhase::Playing.name(), "Playing");
        assert_eq!(GamePhase::GameOver.name(), "Game Over");
    }
}
