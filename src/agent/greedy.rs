use std::collections::{HashSet, VecDeque};

use crate::game::{Direction, Position, WorldState};

/// Food-seeking autopilot
///
/// Among the moves that do not end the game, prefers the ones that leave
/// enough open space for the whole snake, then the one closest to the food.
/// Falls back to the current heading when every move is fatal.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyAgent;

impl GreedyAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn choose_direction(&self, world: &WorldState) -> Direction {
        let current = world.direction();
        let head = world.snake().head();
        let needed = world.snake().len();

        let mut best: Option<(bool, u32, Direction)> = None;

        for dir in Self::candidate_directions(current) {
            let next = head.moved_in_direction(dir);
            if !Self::is_safe(world, next) {
                continue;
            }

            let roomy = Self::open_area(world, next, needed) >= needed;
            let distance = world.food().map_or(0, |food| next.manhattan(food));

            let better = match best {
                None => true,
                Some((best_roomy, best_distance, _)) => {
                    (roomy && !best_roomy) || (roomy == best_roomy && distance < best_distance)
                }
            };
            if better {
                best = Some((roomy, distance, dir));
            }
        }

        best.map(|(_, _, dir)| dir).unwrap_or(current)
    }

    /// Current heading first so ties keep the snake going straight
    fn candidate_directions(current: Direction) -> Vec<Direction> {
        std::iter::once(current)
            .chain(
                Direction::ALL
                    .into_iter()
                    .filter(move |d| *d != current && !d.is_opposite(current)),
            )
            .collect()
    }

    fn is_safe(world: &WorldState, next: Position) -> bool {
        if !world.grid().in_bounds(next) || world.meteors().contains(&next) {
            return false;
        }
        let growing = world.food() == Some(next);
        !world.snake().will_self_collide(next, growing)
    }

    /// Cells reachable from `start`, counting up to `limit`
    fn open_area(world: &WorldState, start: Position, limit: usize) -> usize {
        let body = world.snake_segments();
        // The tail moves away as the snake advances.
        let blocked: HashSet<Position> = body[..body.len() - 1]
            .iter()
            .chain(world.meteors())
            .copied()
            .collect();

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            if seen.len() >= limit {
                break;
            }
            for dir in Direction::ALL {
                let next = pos.moved_in_direction(dir);
                if world.grid().in_bounds(next) && !blocked.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine, PortalPair, Snake};

    fn world(snake: Snake, food: Option<Position>, meteors: Vec<Position>) -> WorldState {
        let engine = GameEngine::with_seed(GameConfig::plain(12, 12), 1);
        engine
            .world_from_parts(snake, food, meteors, None::<PortalPair>)
            .unwrap()
    }

    #[test]
    fn test_heads_towards_food() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = world(snake, Some(Position::new(2, 5)), vec![]);

        assert_eq!(GreedyAgent::new().choose_direction(&state), Direction::Up);
    }

    #[test]
    fn test_goes_straight_to_food() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = world(snake, Some(Position::new(5, 9)), vec![]);

        assert_eq!(GreedyAgent::new().choose_direction(&state), Direction::Right);
    }

    #[test]
    fn test_avoids_wall_and_meteor() {
        // Heading into the right wall with a meteor above.
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        let state = world(snake, Some(Position::new(1, 10)), vec![Position::new(4, 10)]);

        assert_eq!(GreedyAgent::new().choose_direction(&state), Direction::Down);
    }

    #[test]
    fn test_never_reverses() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let state = world(snake, Some(Position::new(5, 1)), vec![]);

        assert_ne!(GreedyAgent::new().choose_direction(&state), Direction::Left);
    }
}
