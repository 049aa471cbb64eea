//! End-to-end checks of the simulation through the public API

use std::collections::HashSet;
use std::time::Duration;

use space_snake::agent::GreedyAgent;
use space_snake::game::{
    Action, Clock, Direction, EndReason, GameConfig, GameEngine, GameError, ManualClock,
    PortalPair, Position, Snake, StepResult, WorldState,
};

fn snake(segments: &[(i32, i32)], direction: Direction) -> Snake {
    let body = segments.iter().map(|&p| Position::from(p)).collect();
    Snake::from_segments(body, direction).unwrap()
}

fn expected_interval(config: &GameConfig, score: u32) -> Duration {
    let steps = score / config.score_speedup_interval;
    config
        .base_tick_interval()
        .saturating_sub(config.speed_step() * steps)
        .max(config.min_tick_interval())
}

fn assert_in_interior(world: &WorldState) {
    let grid = world.grid();
    for &seg in world.snake_segments() {
        assert!(grid.in_bounds(seg), "snake segment {:?} outside", seg);
    }
    for &meteor in world.meteors() {
        assert!(grid.in_bounds(meteor), "meteor {:?} outside", meteor);
    }
    if let Some(food) = world.food() {
        assert!(grid.in_bounds(food), "food {:?} outside", food);
    }
    if let Some(ends) = world.portals() {
        assert!(ends.iter().all(|&p| grid.in_bounds(p)), "portal outside");
    }
}

#[test]
fn eating_food_grows_snake_and_scores() {
    let mut engine = GameEngine::with_seed(GameConfig::plain(22, 22), 11);
    let mut world = engine
        .world_from_parts(
            snake(&[(10, 10), (10, 9), (10, 8)], Direction::Right),
            Some(Position::new(10, 11)),
            vec![],
            None,
        )
        .unwrap();

    let result = engine
        .step(&mut world, Action::Move(Direction::Right), Duration::ZERO)
        .unwrap();

    assert!(matches!(result, StepResult::Continue { ref events, .. } if events.ate_food));
    assert_eq!(
        world.snake_segments(),
        &[
            Position::new(10, 11),
            Position::new(10, 10),
            Position::new(10, 9),
            Position::new(10, 8),
        ]
    );
    assert_eq!(world.score(), 1);

    let food = world.food().unwrap();
    assert!(!world.snake().contains(food));
    assert!(world.grid().in_bounds(food));
}

#[test]
fn straight_line_never_self_collides() {
    let mut engine = GameEngine::with_seed(GameConfig::plain(60, 10), 2);
    let mut world = engine
        .world_from_parts(
            snake(&[(5, 3), (5, 2), (5, 1)], Direction::Right),
            None,
            vec![],
            None,
        )
        .unwrap();

    // Interior columns run 1..=58, so the head can move from 3 to 58.
    for _ in 0..55 {
        let result = engine
            .step(&mut world, Action::Continue, Duration::ZERO)
            .unwrap();
        assert!(!result.is_ended());
        assert_eq!(world.snake().len(), 3);
    }

    let result = engine
        .step(&mut world, Action::Continue, Duration::ZERO)
        .unwrap();
    assert_eq!(
        result,
        StepResult::Ended {
            score: 0,
            reason: EndReason::Wall
        }
    );
}

#[test]
fn moving_into_top_border_ends_game() {
    let mut engine = GameEngine::with_seed(GameConfig::plain(10, 10), 1);
    let mut world = engine
        .world_from_parts(Snake::new(Position::new(1, 4), Direction::Up, 1), None, vec![], None)
        .unwrap();

    let result = engine
        .step(&mut world, Action::Move(Direction::Up), Duration::ZERO)
        .unwrap();
    assert!(result.is_ended());
    assert!(!world.is_running());

    let err = engine
        .step(&mut world, Action::Continue, Duration::ZERO)
        .unwrap_err();
    assert_eq!(err, GameError::StepAfterGameOver { score: 0 });
}

#[test]
fn portal_round_trip_respects_cooldown() {
    let mut engine = GameEngine::with_seed(GameConfig::plain(22, 22), 4);
    let pair = PortalPair::new(Position::new(5, 5), Position::new(5, 7)).unwrap();
    let mut world = engine
        .world_from_parts(
            Snake::new(Position::new(5, 4), Direction::Right, 1),
            None,
            vec![],
            Some(pair),
        )
        .unwrap();
    let clock = ManualClock::new();

    // Enter (5,5) and come out at (5,7) as an extra head segment.
    let result = engine
        .step(&mut world, Action::Continue, clock.now())
        .unwrap();
    assert!(matches!(result, StepResult::Continue { ref events, .. } if events.teleported));
    assert_eq!(world.snake().head(), Position::new(5, 7));
    assert_eq!(world.snake().len(), 2);

    // Walk back onto (5,5) well inside the cooldown window.
    clock.advance(Duration::from_millis(150));
    engine
        .step(&mut world, Action::Move(Direction::Left), clock.now())
        .unwrap();
    clock.advance(Duration::from_millis(150));
    let result = engine
        .step(&mut world, Action::Move(Direction::Left), clock.now())
        .unwrap();

    assert!(matches!(result, StepResult::Continue { ref events, .. } if !events.teleported));
    assert_eq!(world.snake().head(), Position::new(5, 5));
    assert_eq!(world.snake().len(), 2);
}

#[test]
fn new_game_rejects_overcrowded_board() {
    let mut config = GameConfig::new(6, 6);
    config.meteor_count = 40;
    let mut engine = GameEngine::with_seed(config, 0);

    assert!(matches!(
        engine.new_game(),
        Err(GameError::InvalidConfiguration(_))
    ));
}

#[test]
fn autopilot_games_keep_invariants() {
    let agent = GreedyAgent::new();

    for seed in 0..8 {
        let config = GameConfig::default();
        let mut engine = GameEngine::with_seed(config.clone(), seed);
        let mut world = engine.new_game().unwrap();
        let clock = ManualClock::new();

        let mut seen_intervals: Vec<(u32, Duration)> = Vec::new();
        assert_in_interior(&world);

        for _ in 0..3_000 {
            let len_before = world.snake().len();
            let score_before = world.score();
            let interval_before = world.tick_interval();

            let action = Action::Move(agent.choose_direction(&world));
            let result = engine.step(&mut world, action, clock.now()).unwrap();

            let StepResult::Continue {
                tick_interval,
                events,
            } = result
            else {
                break;
            };

            // Length changes only through food and teleport.
            let expected_len =
                len_before + usize::from(events.ate_food) + usize::from(events.teleported);
            assert_eq!(world.snake().len(), expected_len);
            assert_eq!(world.score(), score_before + u32::from(events.ate_food));

            if events.ate_food {
                let food = world.food().unwrap();
                let body: HashSet<Position> = world.snake_segments().iter().copied().collect();
                assert!(!body.contains(&food));
                assert!(!world.meteors().contains(&food));
            }

            // Speed only goes up, once per threshold, and stays above the floor.
            assert!(world.tick_interval() <= interval_before);
            assert!(world.tick_interval() >= config.min_tick_interval());
            assert_eq!(world.tick_interval(), expected_interval(&config, world.score()));
            assert_eq!(events.speed_changed, world.tick_interval() != interval_before);
            seen_intervals.push((world.score(), world.tick_interval()));

            assert_in_interior(&world);
            assert!(tick_interval >= world.tick_interval());
            clock.advance(tick_interval);
        }

        for pair in seen_intervals.windows(2) {
            if pair[0].0 == pair[1].0 {
                assert_eq!(pair[0].1, pair[1].1);
            }
        }
    }
}
