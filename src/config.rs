//! Tunable game parameters and their JSON file in `~/.flappy/`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name of the config inside the flappy directory.
pub const CONFIG_FILE: &str = "config.json";

/// Physics and layout tuning. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Velocity added every tick (positive = downward).
    pub gravity: f64,
    /// Velocity a tap sets the bird to. Overwrites, never adds.
    pub jump_velocity: f64,
    /// Horizontal distance every pipe moves left per tick.
    pub pipe_speed: f64,
    pub pipe_width: f64,
    /// Height of the passable opening in a pipe.
    pub gap_size: f64,
    /// Smallest obstacle segment above or below a gap.
    pub min_margin: f64,
    /// Edge length of the bird's square bounding box.
    pub bird_size: f64,
    /// How far past the right edge the first pipe of a session appears.
    pub first_pipe_offset: f64,
    /// Pipe spacing as a fraction of the world width.
    pub spawn_spacing_ratio: f64,
    /// World units covered by one terminal column.
    pub cell_width: f64,
    /// World units covered by one terminal row.
    pub cell_height: f64,
    /// Nominal period of the game clock.
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            jump_velocity: -12.0,
            pipe_speed: 3.0,
            pipe_width: 80.0,
            gap_size: 200.0,
            min_margin: 50.0,
            bird_size: 40.0,
            first_pipe_offset: 100.0,
            spawn_spacing_ratio: 0.6,
            cell_width: 10.0,
            cell_height: 25.0,
            tick_interval_ms: crate::constants::TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("gravity", self.gravity),
            ("pipe_speed", self.pipe_speed),
            ("pipe_width", self.pipe_width),
            ("gap_size", self.gap_size),
            ("bird_size", self.bird_size),
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be a positive number, got {}", name, value));
            }
        }
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return Err(format!(
                "jump_velocity must be negative (upward), got {}",
                self.jump_velocity
            ));
        }
        if !(self.min_margin.is_finite() && self.min_margin >= 0.0) {
            return Err(format!("min_margin must be >= 0, got {}", self.min_margin));
        }
        if !(self.first_pipe_offset.is_finite() && self.first_pipe_offset >= 0.0) {
            return Err(format!(
                "first_pipe_offset must be >= 0, got {}",
                self.first_pipe_offset
            ));
        }
        if !(self.spawn_spacing_ratio > 0.0 && self.spawn_spacing_ratio <= 1.0) {
            return Err(format!(
                "spawn_spacing_ratio must be in (0, 1], got {}",
                self.spawn_spacing_ratio
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }
        if self.bird_size >= self.gap_size {
            return Err(format!(
                "bird_size ({}) must be smaller than gap_size ({})",
                self.bird_size, self.gap_size
            ));
        }
        Ok(())
    }

    /// Horizontal distance between consecutive pipes for a given world width.
    pub fn spawn_spacing(&self, world_width: f64) -> f64 {
        self.spawn_spacing_ratio * world_width
    }
}

/// Get the ~/.flappy/ directory path, creating it if needed.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Default config location, `~/.flappy/config.json`.
pub fn default_config_path() -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(CONFIG_FILE))
}

/// Load and validate a config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> io::Result<GameConfig> {
    let config = match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str::<GameConfig>(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            GameConfig::default()
        }
        Err(e) => return Err(e),
    };
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    Ok(config)
}

/// Save a config as pretty-printed JSON.
pub fn save_config(path: &Path, config: &GameConfig) -> io::Result<()> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
