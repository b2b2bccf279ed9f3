// Error types: arena construction/spawn errors, config errors, session errors

use thiserror::Error;

/// Arena Errors
#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ArenaError {
    #[error("Invalid arena dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("Spawn position ({x}, {y}) is outside the playfield")]
    SpawnOutOfRange { x: f64, y: f64 },
}

/// Config Errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config line: {0:?}")]
    Malformed(String),
}

/// Game/Session Errors
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Player count must be 1 or 2, got {0}")]
    InvalidPlayerCount(u8),
}
