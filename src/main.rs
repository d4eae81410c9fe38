use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use snake_clash::game::{GameConfig, GameEngine, GameMode};
use snake_clash::modes::PlayMode;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_clash")]
#[command(version, about = "Grid snake: solo, two players, or against the AI")]
struct Cli {
    /// Start a match right away instead of showing the menu
    #[arg(long)]
    mode: Option<Mode>,

    /// JSON file with game settings; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food placement and AI jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Log file; the terminal itself is owned by the game
    #[arg(long, default_value = "snake_clash.log")]
    log_file: PathBuf,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One snake, play for score
    Single,
    /// Two snakes on one keyboard
    TwoPlayer,
    /// Player 1 against the computer
    VsAi,
}

impl From<Mode> for GameMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Single => GameMode::SinglePlayer,
            Mode::TwoPlayer => GameMode::TwoPlayerLocal,
            Mode::VsAi => GameMode::VersusAi,
        }
    }
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid game configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if cli.print_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
        println!("{}", json);
        return Ok(());
    }

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    info!(
        "starting snake_clash on a {}x{} grid",
        config.grid_width, config.grid_height
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut play_mode = PlayMode::new(engine);
    play_mode.run(cli.mode.map(GameMode::from)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["snake_clash"]);
        assert!(cli.mode.is_none());
        assert_eq!(cli.log_level, LevelFilter::Info);
        assert_eq!(build_config(&cli).unwrap(), GameConfig::default());
    }

    #[test]
    fn test_cli_mode_and_overrides() {
        let cli = Cli::parse_from([
            "snake_clash",
            "--mode",
            "vs-ai",
            "--width",
            "16",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.mode.map(GameMode::from), Some(GameMode::VersusAi));
        assert_eq!(cli.log_level, LevelFilter::Debug);

        let config = build_config(&cli).unwrap();
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.grid_height, 30);
    }

    #[test]
    fn test_cli_rejects_tiny_grid() {
        let cli = Cli::parse_from(["snake_clash", "--width", "2"]);
        assert!(build_config(&cli).is_err());
    }
}
