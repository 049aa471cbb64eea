use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};
use tracing::info;

use crate::agent::GreedyAgent;
use crate::game::{
    Action, Clock, GameConfig, GameEngine, StepResult, SystemClock, WorldState,
};
use crate::input::{DirectionFilter, InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudFlags, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    state: WorldState,
    clock: SystemClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    directions: DirectionFilter,
    agent: GreedyAgent,
    autopilot: bool,
    tick_interval: Duration,
    show_splash: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.new_game().context("Failed to start game")?;
        let tick_interval = state.next_tick_interval();

        Ok(Self {
            engine,
            state,
            clock: SystemClock::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            directions: DirectionFilter::new(),
            agent: GreedyAgent::new(),
            autopilot: false,
            tick_interval,
            show_splash: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        // The game tick follows the engine's interval, which changes with
        // score and heading.
        let mut next_tick = Instant::now() + self.tick_interval;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = sleep_until(next_tick) => {
                    if !self.show_splash && self.state.is_running() && !self.clock.is_paused() {
                        self.update_game()?;
                    }
                    next_tick = Instant::now() + self.tick_interval;
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.is_running() {
                        self.metrics.update(self.clock.now());
                    }
                    let flags = HudFlags {
                        paused: self.clock.is_paused(),
                        autopilot: self.autopilot,
                    };
                    terminal.draw(|frame| {
                        if self.show_splash {
                            self.renderer.render_splash(frame);
                        } else {
                            self.renderer.render(frame, &self.state, &self.metrics, flags);
                        }
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);

        // Any key other than quit leaves the title card; game time starts now.
        if self.show_splash && action != KeyAction::Quit {
            self.show_splash = false;
            self.clock = SystemClock::new();
            return;
        }

        match action {
            KeyAction::GameAction(Action::Move(dir)) => {
                self.directions.request(self.state.direction(), dir);
            }
            KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
            KeyAction::Pause => self.toggle_pause(),
            KeyAction::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                self.directions.clear();
            }
            KeyAction::Restart => {
                if let Err(err) = self.reset_game() {
                    tracing::error!("restart failed: {:#}", err);
                    self.should_quit = true;
                }
            }
            KeyAction::Quit => self.should_quit = true,
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let action = if self.autopilot {
            Action::Move(self.agent.choose_direction(&self.state))
        } else {
            self.directions.take_action()
        };

        let result = self
            .engine
            .step(&mut self.state, action, self.clock.now())
            .context("Game step failed")?;

        match result {
            StepResult::Continue { tick_interval, .. } => {
                self.tick_interval = tick_interval;
            }
            StepResult::Ended { score, reason } => {
                self.metrics.on_game_over(score, reason);
            }
        }

        Ok(())
    }

    fn toggle_pause(&mut self) {
        if !self.state.is_running() {
            return;
        }
        if self.clock.is_paused() {
            self.clock.resume();
        } else {
            self.clock.pause();
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self.engine.new_game().context("Failed to start game")?;
        self.clock = SystemClock::new();
        self.metrics.on_game_start();
        self.directions.clear();
        self.tick_interval = self.state.next_tick_interval();
        info!("game restarted");
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
