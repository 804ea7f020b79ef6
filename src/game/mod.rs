//! Flappy Bird simulation core.
//!
//! A bird falls under gravity, taps apply an upward impulse, and pipe
//! obstacles scroll in from the right. Everything in here is UI-agnostic:
//! the host feeds taps, elapsed time, and the viewport, then reads state back.

pub mod clock;
pub mod collision;
pub mod logic;
pub mod obstacles;
pub mod physics;
pub mod types;

pub use clock::{GameClock, TickToken};
pub use collision::is_colliding;
pub use logic::{step, Game, StepOutcome};
pub use types::*;
