//! Snek headless runner
//!
//! Plays the autopilot against the engine without a terminal UI, logs the
//! game events and prints the final snapshot as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use snek::consts::{DEFAULT_SYMBOLS_PER_LEVEL, DEFAULT_SYMBOLS_PER_WORLD, SIDE_PANEL_WIDTH};
use snek::sim::{GameEvent, TickInput, tick};
use snek::{Autopilot, Game, GameConfig, ProgressionMode, StepOutcome};

#[derive(Parser)]
#[command(name = "snek")]
#[command(version, about = "Snake through a journey of symbol worlds (headless demo)")]
struct Cli {
    /// Grid width (defaults to the config's)
    #[arg(long)]
    width: Option<u32>,

    /// Grid height (defaults to the config's)
    #[arg(long)]
    height: Option<u32>,

    /// Size the grid to a terminal of this many columns
    #[arg(long, requires = "rows", conflicts_with_all = ["width", "height"])]
    cols: Option<u32>,

    /// Size the grid to a terminal of this many rows
    #[arg(long, requires = "cols")]
    rows: Option<u32>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of steps to play
    #[arg(long, default_value = "2000")]
    ticks: u64,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the config's progression model
    #[arg(long)]
    progression: Option<Model>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Model {
    /// Level-ups with color changes; worlds rotate every few levels
    Level,
    /// Direct world transitions
    World,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    match cli.progression {
        Some(Model::Level) => {
            config.progression = ProgressionMode::Level {
                symbols_per_level: DEFAULT_SYMBOLS_PER_LEVEL,
            }
        }
        Some(Model::World) => {
            config.progression = ProgressionMode::World {
                symbols_per_world: DEFAULT_SYMBOLS_PER_WORLD,
            }
        }
        None => {}
    }
    config.validate().context("Invalid configuration")?;

    let (width, height) = match (cli.cols, cli.rows) {
        (Some(cols), Some(rows)) => config.grid_for_viewport(cols, rows, SIDE_PANEL_WIDTH),
        _ => config.clamp_dimensions(
            cli.width.unwrap_or(config.default_grid_width),
            cli.height.unwrap_or(config.default_grid_height),
        ),
    };
    if u64::from(width) * u64::from(height) < 2 {
        bail!("grid {width}x{height} is too small to play");
    }

    let mut game = match cli.seed {
        Some(seed) => Game::with_seed(width, height, config, seed),
        None => Game::new(width, height, config),
    };
    log::info!("Starting demo run with seed {}", game.seed());

    for _ in 0..cli.ticks {
        let input = TickInput {
            turn: Autopilot::choose(&game),
            ..Default::default()
        };
        let outcome = tick(&mut game, &input);

        for event in game.drain_events() {
            log_event(&event);
        }
        if matches!(outcome, StepOutcome::Died(_) | StepOutcome::Idle) {
            break;
        }
    }

    log::info!(
        "Run finished after {} steps: {} symbols, {:.1} moves/s",
        game.steps(),
        game.symbols_consumed(),
        game.moves_per_second()
    );

    let json = serde_json::to_string_pretty(&game.snapshot())
        .context("Failed to serialize snapshot")?;
    println!("{json}");
    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::FoodEaten { glyph, position } => {
            log::debug!("Ate {glyph} at ({}, {})", position.x, position.y)
        }
        GameEvent::LevelUp { level, color } => log::info!("Level {level} ({color})"),
        GameEvent::WorldEntered { index, name } => log::info!("World {}: {name}", index + 1),
        GameEvent::SpeedChanged { interval } => {
            log::debug!("Step interval now {interval:.4}s")
        }
        GameEvent::Paused => log::info!("Paused"),
        GameEvent::Resumed => log::info!("Resumed"),
        GameEvent::GameOver { cause } => log::info!("Game over: {cause:?}"),
    }
}
