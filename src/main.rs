use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::GameConfig;
use grid_snake::modes::PlayMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// Playfield width
    #[arg(long, default_value = "640")]
    screen_width: i32,

    /// Playfield height
    #[arg(long, default_value = "480")]
    screen_height: i32,

    /// Side length of one cell; must divide both screen dimensions
    #[arg(long, default_value = "20")]
    grid_size: i32,

    /// Logic updates per second
    #[arg(long, default_value = "10")]
    tick_rate: u32,

    /// JSON config file; replaces the dimension flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        if let Some(path) = &self.config {
            return GameConfig::load(path);
        }

        let config = GameConfig {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            grid_size: self.grid_size,
            tick_rate: self.tick_rate,
        };
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Validate before touching the terminal
    let config = cli.game_config()?;
    tracing::info!(?config, "Configuration loaded");

    let mut play = PlayMode::new(config)?;
    play.run().await?;

    Ok(())
}
