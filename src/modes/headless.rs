//! Headless autopilot runs
//!
//! Plays a batch of games with the greedy autopilot and no terminal UI. Game
//! time comes from a [`ManualClock`] advanced by each tick interval, so a run
//! finishes as fast as the CPU allows while portal timers still behave as they
//! would in real time. With a seed the whole batch is reproducible.
//!
//! # Example
//!
//! ```rust
//! use space_snake::game::GameConfig;
//! use space_snake::modes::{HeadlessConfig, HeadlessMode};
//!
//! let mut config = HeadlessConfig::new(3, GameConfig::default());
//! config.seed = Some(42);
//!
//! let stats = HeadlessMode::new(config).run()?;
//! assert_eq!(stats.games(), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::agent::GreedyAgent;
use crate::game::{Action, Clock, GameConfig, GameEngine, ManualClock, StepResult};
use crate::metrics::SessionStats;

/// Configuration for a headless batch
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of games to play
    pub games: usize,

    /// Seed for the engine RNG; `None` draws from system entropy
    pub seed: Option<u64>,

    /// Stop a game after this many steps
    pub max_steps: u32,

    /// Game rules and board size
    pub game_config: GameConfig,
}

impl HeadlessConfig {
    pub fn new(games: usize, game_config: GameConfig) -> Self {
        Self {
            games,
            seed: None,
            max_steps: 20_000,
            game_config,
        }
    }
}

pub struct HeadlessMode {
    config: HeadlessConfig,
    engine: GameEngine,
    agent: GreedyAgent,
    stats: SessionStats,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => GameEngine::with_seed(config.game_config.clone(), seed),
            None => GameEngine::new(config.game_config.clone()),
        };

        Self {
            config,
            engine,
            agent: GreedyAgent::new(),
            stats: SessionStats::new(),
        }
    }

    /// Play every game in the batch and return the aggregate statistics
    pub fn run(mut self) -> Result<SessionStats> {
        info!(
            games = self.config.games,
            seed = ?self.config.seed,
            "starting headless run"
        );

        for game in 1..=self.config.games {
            self.play_game(game)
                .with_context(|| format!("Game {} failed", game))?;
        }

        info!("{}", self.stats.format_summary());
        Ok(self.stats)
    }

    fn play_game(&mut self, game: usize) -> Result<()> {
        let mut world = self.engine.new_game()?;
        let clock = ManualClock::new();

        while world.steps() < self.config.max_steps {
            let action = Action::Move(self.agent.choose_direction(&world));
            match self.engine.step(&mut world, action, clock.now())? {
                StepResult::Continue {
                    tick_interval,
                    events,
                } => {
                    if events.teleported || events.portals_regenerated {
                        debug!(game, step = world.steps(), ?events, "step");
                    }
                    clock.advance(tick_interval);
                }
                StepResult::Ended { score, reason } => {
                    info!(
                        game,
                        score,
                        steps = world.steps(),
                        reason = reason.as_str(),
                        "game finished"
                    );
                    self.stats.record_game(score, world.steps(), reason);
                    return Ok(());
                }
            }
        }

        warn!(
            game,
            score = world.score(),
            steps = world.steps(),
            "step limit reached"
        );
        self.stats.record_unfinished(world.score(), world.steps());
        Ok(())
    }
}
