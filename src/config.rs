//! Configuration constants for the moon patrol game, plus the persisted session config.

use crate::error::ConfigError;
use std::fs;
use std::path::Path;

// Playfield and rendering
pub const ARENA_WIDTH: i32 = 600;
pub const ARENA_HEIGHT: i32 = 500;
pub const GROUND_DEPTH: f64 = 100.0; // Ground band height measured from the bottom edge
pub const TICK_RATE: u32 = 30; // Simulation ticks per second

// Vehicle
pub const VEHICLE_WIDTH: f64 = 31.0;
pub const VEHICLE_HEIGHT: f64 = 23.0;
pub const VEHICLE_SPEED: f64 = 10.0; // Jump impulse and ceiling bounce speed
pub const VEHICLE_DRIVE_SPEED: f64 = 5.0;
pub const VEHICLE_GRAVITY: f64 = 0.4;
pub const VEHICLE_GROUND_OFFSET: f64 = 95.0; // Rest line is (H - h) - offset
pub const VEHICLE_LEFT_LIMIT: f64 = 50.0; // go_left only while x is past this
pub const VEHICLE_RIGHT_LIMIT: f64 = 300.0; // go_right only while x is short of this
pub const VEHICLE_EXPLODE_TICKS: u32 = 45;
pub const PIT_SETTLE_OFFSET: (f64, f64) = (15.0, 5.0); // Subtracted from a pit's centre when a vehicle drops in
pub const PLAYER_ONE_X: f64 = 100.0;
pub const PLAYER_TWO_X: f64 = 200.0;

// Projectiles
pub const PROJECTILE_SIZE: f64 = 4.0;
pub const PROJECTILE_SPEED: f64 = 5.0;
pub const PIT_ON_IMPACT_ODDS: u32 = 6; // 1-in-6 chance a low impact digs a pit

// Drifting hazards and effects
pub const DRIFT_SPEED: f64 = 3.0;
pub const EXPLOSION_SIZE: f64 = 20.0;
pub const EXPLOSION_TICKS: u32 = 21;

// Aliens
pub const ALIEN_SIZE: f64 = 20.0;
pub const ALIEN_Y: f64 = 60.0;
pub const ALIEN_SPEED: f64 = 5.0;
pub const ALIEN_LANES: [f64; 3] = [40.0, 200.0, 400.0];
pub const ALIEN_TURN_ODDS: u32 = 11; // 1-in-11 chance per tick to pick a new heading
pub const ALIEN_FIRE_ODDS: u32 = 101; // 1-in-101 chance per tick to fire

// Hazard spawner
pub const HAZARD_COOLDOWN: u32 = 30;
pub const HAZARD_ODDS: u32 = 50; // 1-in-50 trigger once cooled down

// Session defaults
pub const DEFAULT_ALIENS: u32 = 2;
pub const DEFAULT_CONFIG_PATH: &str = "cfg.txt";
const ALIEN_KEY: &str = "alien";

/// Ground line: top edge of the terrain band
pub fn terrain_y(height: i32) -> f64 {
    height as f64 - GROUND_DEPTH
}

/// Settings persisted between sessions: a single `alien: N` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub aliens: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            aliens: DEFAULT_ALIENS,
        }
    }
}

impl SessionConfig {
    /// Parses the config text. The last `alien` line wins.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut aliens = None;
        for line in text.lines().map(str::trim) {
            let Some(rest) = line.strip_prefix(ALIEN_KEY) else {
                continue;
            };
            let value = rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
            let count = value
                .parse::<u32>()
                .map_err(|_| ConfigError::Malformed(line.to_string()))?;
            aliens = Some(count);
        }
        aliens
            .map(|aliens| SessionConfig { aliens })
            .ok_or_else(|| ConfigError::Malformed(text.trim().to_string()))
    }

    pub fn to_line(&self) -> String {
        format!("{}: {}", ALIEN_KEY, self.aliens)
    }

    /// Reads the config at `path`; when it is missing or malformed, writes and returns the default.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Ok(config) => {
                    log::info!("Loaded config from {}: {} aliens", path.display(), config.aliens);
                    return Ok(config);
                }
                Err(e) => log::warn!("{}; resetting {} to defaults", e, path.display()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, writing defaults", path.display());
            }
            Err(e) => return Err(e.into()),
        }
        let config = SessionConfig::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_line())?;
        Ok(())
    }
}
