use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use space_snake::game::GameConfig;
use space_snake::logging::{self, LogTarget};
use space_snake::modes::{HeadlessConfig, HeadlessMode, HumanMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "space_snake")]
#[command(version, about = "Snake in space: meteors, portals and a speeding snake")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width, border included
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, border included
    #[arg(long)]
    height: Option<usize>,

    /// Number of meteors
    #[arg(long)]
    meteors: Option<usize>,

    /// Play without portals
    #[arg(long)]
    no_portals: bool,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play in headless mode
    #[arg(long, default_value = "10")]
    games: usize,

    /// Write logs to this file (human mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Let the autopilot play a batch of games without a UI
    Headless,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(meteors) = self.meteors {
            config.meteor_count = meteors;
        }
        if self.no_portals {
            config.portals_enabled = false;
        }

        config.validate().context("Invalid game settings")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_target = match (&cli.log_file, &cli.mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Headless) => LogTarget::Stderr,
        (None, Mode::Human) => LogTarget::Disabled,
    };
    logging::init(log_target, cli.verbose)?;

    let config = cli.game_config()?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_config = HeadlessConfig::new(cli.games, config);
            headless_config.seed = cli.seed;
            let stats = HeadlessMode::new(headless_config).run()?;
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
