// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 16;
pub const MAX_FRAME_DT_MS: u64 = 100; // lag cap so a stall can't burst-fire ticks

// Terminal loop constants
pub const INPUT_POLL_MS: u64 = 8;

// Logging
pub const LOG_FILE: &str = "flappy.log";
pub const LOG_ENV_VAR: &str = "FLAPPY_LOG";
