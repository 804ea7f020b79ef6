//! Flappy - terminal Flappy Bird.
//!
//! The library holds the UI-agnostic game core, its configuration, and the
//! headless simulator. The terminal front end lives in the binary.

pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod simulator;

pub use config::GameConfig;
pub use game::{Game, GameEvent, GamePhase, Viewport};
