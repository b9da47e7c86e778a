use anyhow::{Context, Result};
use arcade_snake::game::GameConfig;
use arcade_snake::modes::HumanMode;
use arcade_snake::score::{DEFAULT_HIGH_SCORE_FILE, FileScoreStore};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Single-screen Snake for the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Where the high score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Write logs to this file (level from RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// The terminal belongs to the TUI, so logs only go to a file when asked for.
fn init_logging(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file {:?}", log_file))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_file) = &cli.log_file {
        init_logging(log_file)?;
    }

    let config = cli.game_config()?;
    log::debug!("game config: {:?}", config);

    let score_store = FileScoreStore::new(cli.high_score_file.clone());
    let mut human_mode = HumanMode::new(config, score_store);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["arcade_snake"]);
        let config = cli.game_config().unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(cli.high_score_file, PathBuf::from(DEFAULT_HIGH_SCORE_FILE));
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 30, "grid_height": 25 }"#).unwrap();

        let cli = Cli::parse_from([
            "arcade_snake",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "12",
            "--tick-rate",
            "8",
        ]);
        let config = cli.game_config().unwrap();

        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.tick_rate_hz, 8);
    }

    #[test]
    fn test_tick_rate_above_limit_rejected() {
        let cli = Cli::parse_from(["arcade_snake", "--tick-rate", "2000"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let cli = Cli::parse_from(["arcade_snake", "--width", "0"]);
        assert!(cli.game_config().is_err());
    }
}
