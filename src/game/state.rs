use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;
use super::grid::Grid;
use super::hazards::{PortalPair, PortalState};
use super::speed::SpeedController;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    pub fn manhattan(&self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake with the head at `head`, body trailing behind it
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (d_row, d_col) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-d_row * i, -d_col * i))
            .collect();

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first. Returns `None` when
    /// `segments` is empty.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: segments,
            direction,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Candidate head one cell ahead in `direction`
    pub fn advance(&self, direction: Direction) -> Position {
        self.head().moved_in_direction(direction)
    }

    /// Whether `new_head` runs into the body as it will be once this tick's
    /// tail movement is resolved. A growing snake keeps its tail cell; a
    /// moving one vacates it.
    pub fn will_self_collide(&self, new_head: Position, growing: bool) -> bool {
        let remaining = if growing {
            &self.body[..]
        } else {
            &self.body[..self.body.len() - 1]
        };
        remaining.contains(&new_head)
    }

    /// Insert `new_head`; keep the tail if it lands on `food`, otherwise drop it.
    /// Returns true when food was eaten.
    pub fn grow_or_shift(&mut self, new_head: Position, food: Option<Position>) -> bool {
        let ate_food = food == Some(new_head);
        self.body.insert(0, new_head);
        if !ate_food {
            self.body.pop();
        }
        ate_food
    }

    /// Prepend an extra head segment without touching the tail (portal exit)
    pub fn push_head(&mut self, pos: Position) {
        self.body.insert(0, pos);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least one segment
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// Head hit the border ring
    Wall,
    /// Head hit the snake's own body
    SelfCollision,
    /// Head hit a meteor
    Meteor,
    /// No free interior cell was left for food
    BoardFull,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Wall => "wall",
            EndReason::SelfCollision => "self",
            EndReason::Meteor => "meteor",
            EndReason::BoardFull => "board full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver { score: u32, reason: EndReason },
}

/// Complete world state, owned by the caller and threaded through each step
#[derive(Debug, Clone)]
pub struct WorldState {
    pub(crate) grid: Grid,
    pub(crate) snake: Snake,
    pub(crate) food: Option<Position>,
    pub(crate) meteors: Vec<Position>,
    pub(crate) portals: Option<PortalState>,
    pub(crate) speed: SpeedController,
    pub(crate) score: u32,
    pub(crate) steps: u32,
    pub(crate) status: GameStatus,
}

impl WorldState {
    pub(crate) fn new(
        grid: Grid,
        snake: Snake,
        food: Option<Position>,
        meteors: Vec<Position>,
        portals: Option<PortalPair>,
        speed: SpeedController,
    ) -> Self {
        Self {
            grid,
            snake,
            food,
            meteors,
            portals: portals.map(PortalState::new),
            speed,
            score: 0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Snake segments, head first
    pub fn snake_segments(&self) -> &[Position] {
        self.snake.segments()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn meteors(&self) -> &[Position] {
        &self.meteors
    }

    /// Both portal endpoints, if portals are enabled
    pub fn portals(&self) -> Option<[Position; 2]> {
        self.portals.as_ref().map(|p| p.pair().endpoints())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Base tick interval after score-driven speed-ups
    pub fn tick_interval(&self) -> Duration {
        self.speed.current_interval()
    }

    /// Interval the caller should wait before the next step, given the heading
    pub fn next_tick_interval(&self) -> Duration {
        self.speed.interval_for(self.snake.direction)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Cells currently taken by the snake, meteors, food and optionally portals
    pub fn occupied(&self, include_portals: bool) -> HashSet<Position> {
        let mut occupied: HashSet<Position> = self.snake.segments().iter().copied().collect();
        occupied.extend(self.meteors.iter().copied());
        occupied.extend(self.food);
        if include_portals {
            if let Some(endpoints) = self.portals() {
                occupied.extend(endpoints);
            }
        }
        occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Right), Position::new(5, 6));
        assert_eq!(pos.manhattan(Position::new(2, 9)), 7);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.segments(),
            &[
                Position::new(10, 10),
                Position::new(10, 9),
                Position::new(10, 8)
            ]
        );
        assert_eq!(snake.tail(), Position::new(10, 8));

        let snake = Snake::new(Position::new(10, 10), Direction::Up, 0);
        assert_eq!(snake.len(), 1);

        assert!(Snake::from_segments(vec![], Direction::Up).is_none());
    }

    #[test]
    fn test_grow_or_shift() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        let head = snake.advance(Direction::Right);
        assert!(!snake.grow_or_shift(head, None));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 6));

        let head = snake.advance(Direction::Right);
        assert!(snake.grow_or_shift(head, Some(Position::new(5, 7))));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(5, 4));
    }

    #[test]
    fn test_moving_into_vacating_tail_is_safe() {
        // A 2x2 loop: head chases its own tail.
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Up,
        )
        .unwrap();
        let target = Position::new(1, 2);

        assert!(!snake.will_self_collide(target, false));
        assert!(snake.will_self_collide(target, true));
        assert!(snake.will_self_collide(Position::new(2, 2), false));
        assert!(!snake.will_self_collide(Position::new(5, 5), true));
    }

    #[test]
    fn test_single_segment_never_self_collides() {
        let snake = Snake::new(Position::new(3, 3), Direction::Left, 1);
        assert!(!snake.will_self_collide(Position::new(3, 3), false));
    }
}
