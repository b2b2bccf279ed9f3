mod actors;
mod arena;
mod assets;
mod config;
mod error;
mod game;
mod input;
mod logging;
mod render;
mod session;
mod types;
mod utils;

use crate::config::{ARENA_HEIGHT, ARENA_WIDTH, DEFAULT_CONFIG_PATH, SessionConfig};
use crate::error::GameError;
use crate::session::{Session, SessionSettings};
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use clap::Parser;
use log::{LevelFilter, error, info, warn};
use macroquad::prelude::Conf;
use std::path::{Path, PathBuf};
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of players (1 or 2). Asked in the window when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    players: Option<u8>,

    /// Number of aliens. Overrides the config file.
    #[arg(long)]
    aliens: Option<u32>,

    /// Config file holding the alien count; created with defaults if missing.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Debug filter to specify log topics (e.g., "collision,spawn")
    /// Available topics: arena, collision, spawn, vehicle, session
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn load_config(path: &Path) -> Result<SessionConfig, GameError> {
    let config = SessionConfig::load_or_init(path)?;
    Ok(config)
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Moon Patrol".to_owned(),
        window_width: ARENA_WIDTH,
        window_height: ARENA_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        for topic in filter.split(',').map(str::trim) {
            if !topic.is_empty() && !logging::TOPICS.contains(&topic) {
                warn!("Unknown debug topic '{}'", topic);
            }
        }
    }

    info!("Initializing Moon Patrol...");

    let config = load_config(&args.config).unwrap_or_else(|e| {
        warn!("{}; using defaults", e);
        SessionConfig::default()
    });

    let mut renderer = render::Renderer::new();

    let players = match args.players {
        Some(players) => players,
        None if renderer.confirm("2 players?").await => 2,
        None => 1,
    };

    let rng = match args.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let settings = SessionSettings {
        players,
        aliens: args.aliens.unwrap_or(config.aliens),
    };
    let session = match Session::new(settings, rng) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {}", e);
            process::exit(1);
        }
    };

    let mut game = game::Game::new(session);
    game.run(&mut renderer).await;
}
