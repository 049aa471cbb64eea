use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameError,
    grid::Grid,
    hazards::{self, PortalPair},
    spawner::Spawner,
    speed::SpeedController,
    state::{EndReason, GameStatus, Position, Snake, WorldState},
};

/// Things that happened during a step that did not end the game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// The snake ate food this step
    pub ate_food: bool,
    /// The head went through a portal (one extra segment)
    pub teleported: bool,
    /// The portal pair was replaced
    pub portals_regenerated: bool,
    /// The base tick interval got shorter
    pub speed_changed: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    /// The game goes on; wait `tick_interval` before the next step
    Continue {
        tick_interval: Duration,
        events: StepEvents,
    },
    /// The game is over
    Ended { score: u32, reason: EndReason },
}

impl StepResult {
    pub fn is_ended(&self) -> bool {
        matches!(self, StepResult::Ended { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    spawner: Spawner,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose games are reproducible for a given seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        Self {
            config,
            grid,
            spawner: Spawner::new(grid),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Start a fresh game: snake at the centre heading right, then meteors,
    /// food and portals on free cells.
    pub fn new_game(&mut self) -> Result<WorldState, GameError> {
        self.config.validate()?;

        let head = Position::new(
            (self.config.grid_height / 2) as i32,
            (self.config.grid_width / 2) as i32,
        );
        let snake = Snake::new(head, Direction::Right, self.config.initial_snake_length);

        let mut occupied: HashSet<Position> = snake.segments().iter().copied().collect();

        let meteors = self
            .spawner
            .spawn_meteors(&mut self.rng, self.config.meteor_count, &occupied)
            .ok_or_else(|| no_room("meteors"))?;
        occupied.extend(meteors.iter().copied());

        let food = self
            .spawner
            .spawn_food(&mut self.rng, &occupied)
            .ok_or_else(|| no_room("food"))?;
        occupied.insert(food);

        let portals = if self.config.portals_enabled {
            let pair = self
                .spawner
                .spawn_portal_pair(&mut self.rng, &occupied)
                .ok_or_else(|| no_room("portals"))?;
            Some(pair)
        } else {
            None
        };

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            meteors = meteors.len(),
            portals = portals.is_some(),
            "new game"
        );

        Ok(WorldState::new(
            self.grid,
            snake,
            Some(food),
            meteors,
            portals,
            SpeedController::new(&self.config),
        ))
    }

    /// Build a world from a hand-made layout, checking that every entity is
    /// inside the interior and that no two entities share a cell.
    pub fn world_from_parts(
        &self,
        snake: Snake,
        food: Option<Position>,
        meteors: Vec<Position>,
        portals: Option<PortalPair>,
    ) -> Result<WorldState, GameError> {
        self.config.validate()?;

        let mut seen = HashSet::new();
        let cells = snake
            .segments()
            .iter()
            .copied()
            .chain(food)
            .chain(meteors.iter().copied())
            .chain(portals.iter().flat_map(|p| p.endpoints()));

        for pos in cells {
            if !self.grid.in_bounds(pos) {
                return Err(GameError::InvalidConfiguration(format!(
                    "({}, {}) is outside the interior",
                    pos.row, pos.col
                )));
            }
            if !seen.insert(pos) {
                return Err(GameError::InvalidConfiguration(format!(
                    "({}, {}) is used by more than one entity",
                    pos.row, pos.col
                )));
            }
        }

        Ok(WorldState::new(
            self.grid,
            snake,
            food,
            meteors,
            portals,
            SpeedController::new(&self.config),
        ))
    }

    /// Execute one step of the game
    ///
    /// `now` is the caller's monotonic clock reading; it drives the portal
    /// cooldown and regeneration timers.
    pub fn step(
        &mut self,
        state: &mut WorldState,
        action: Action,
        now: Duration,
    ) -> Result<StepResult, GameError> {
        if let GameStatus::GameOver { score, .. } = state.status {
            return Err(GameError::StepAfterGameOver { score });
        }

        // Reversals are filtered upstream; whatever arrives is obeyed.
        if let Action::Move(direction) = action {
            state.snake.direction = direction;
        }

        if let Some(portals) = state.portals.as_mut() {
            portals.start_timer(now);
        }

        let new_head = state.snake.advance(state.snake.direction);

        if hazards::check_meteor_collision(&state.meteors, new_head) {
            return Ok(self.finish(state, EndReason::Meteor));
        }

        if !state.grid.in_bounds(new_head) {
            return Ok(self.finish(state, EndReason::Wall));
        }

        let growing = state.food == Some(new_head);
        if state.snake.will_self_collide(new_head, growing) {
            return Ok(self.finish(state, EndReason::SelfCollision));
        }

        let ate_food = state.snake.grow_or_shift(new_head, state.food);
        state.steps += 1;

        let mut events = StepEvents {
            ate_food,
            ..Default::default()
        };

        if ate_food {
            state.score += 1;
            state.food = None;
            debug!(score = state.score, row = new_head.row, col = new_head.col, "ate food");

            let occupied = state.occupied(true);
            match self.spawner.spawn_food(&mut self.rng, &occupied) {
                Some(food) => state.food = Some(food),
                None => return Ok(self.finish(state, EndReason::BoardFull)),
            }

            if let Some(interval) = state.speed.on_food_eaten(state.score) {
                debug!(score = state.score, interval_ms = interval.as_millis() as u64, "speed up");
                events.speed_changed = true;
            }
        }

        events.teleported = self.teleport(state, new_head, now);
        events.portals_regenerated = self.regenerate_portals(state, now);

        Ok(StepResult::Continue {
            tick_interval: state.next_tick_interval(),
            events,
        })
    }

    /// Send the head through a portal if it landed on a ready endpoint. The
    /// exit becomes an extra head segment. An exit covered by the body blocks
    /// the trip and leaves the cooldown untouched.
    fn teleport(&self, state: &mut WorldState, head: Position, now: Duration) -> bool {
        let cooldown = self.config.teleport_cooldown();
        let Some(portals) = state.portals.as_mut() else {
            return false;
        };
        let Some(exit) = portals.try_teleport(head, now, cooldown, &state.snake) else {
            return false;
        };

        state.snake.push_head(exit);
        debug!(
            from_row = head.row,
            from_col = head.col,
            to_row = exit.row,
            to_col = exit.col,
            "teleported"
        );
        true
    }

    /// Replace the whole portal pair once the regeneration interval has passed
    fn regenerate_portals(&mut self, state: &mut WorldState, now: Duration) -> bool {
        let interval = self.config.portal_regen_interval();
        let due = state
            .portals
            .as_ref()
            .is_some_and(|p| p.regen_due(now, interval));
        if !due {
            return false;
        }

        let occupied = state.occupied(false);
        let fresh = self.spawner.spawn_portal_pair(&mut self.rng, &occupied);
        let Some(portals) = state.portals.as_mut() else {
            return false;
        };

        match fresh {
            Some(pair) => {
                portals.replace(pair, now);
                debug!(endpoints = ?pair.endpoints(), "portals regenerated");
                true
            }
            None => {
                warn!("no room to regenerate portals, keeping current pair");
                portals.restart_timer(now);
                false
            }
        }
    }

    fn finish(&self, state: &mut WorldState, reason: EndReason) -> StepResult {
        state.status = GameStatus::GameOver {
            score: state.score,
            reason,
        };
        info!(
            score = state.score,
            steps = state.steps,
            reason = reason.as_str(),
            "game over"
        );
        StepResult::Ended {
            score: state.score,
            reason,
        }
    }
}

fn no_room(what: &str) -> GameError {
    GameError::InvalidConfiguration(format!("no free interior cells left for {}", what))
}
