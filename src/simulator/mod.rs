//! Headless autopilot simulator.
//!
//! Plays many sessions against the real game core to check how the physics
//! tuning plays: how long a simple bot survives and how scores spread.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::should_tap;
pub use config::SimConfig;
pub use report::{RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
