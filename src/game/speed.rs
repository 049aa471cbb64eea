use std::time::Duration;

use super::action::Direction;
use super::config::GameConfig;

/// Score-driven tick interval
///
/// Every time the score reaches a positive multiple of `score_speedup_interval`
/// the interval shrinks by `speed_step`, never below `min_interval`. Each
/// score value can trigger at most one speed-up.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedController {
    current: Duration,
    step: Duration,
    min_interval: Duration,
    speedup_every: u32,
    vertical_multiplier: f64,
    last_speedup_score: Option<u32>,
}

impl SpeedController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            current: config.base_tick_interval(),
            step: config.speed_step(),
            min_interval: config.min_tick_interval(),
            speedup_every: config.score_speedup_interval.max(1),
            vertical_multiplier: config.vertical_speed_multiplier,
            last_speedup_score: None,
        }
    }

    pub fn current_interval(&self) -> Duration {
        self.current
    }

    /// Returns the new interval if this score made the game faster
    pub fn on_food_eaten(&mut self, score: u32) -> Option<Duration> {
        if score == 0 || score % self.speedup_every != 0 {
            return None;
        }
        if self.last_speedup_score.is_some_and(|last| last >= score) {
            return None;
        }
        self.last_speedup_score = Some(score);

        let next = self.current.saturating_sub(self.step).max(self.min_interval);
        if next == self.current {
            return None;
        }
        self.current = next;
        Some(next)
    }

    /// Effective interval for a heading; vertical moves are stretched
    pub fn interval_for(&self, direction: Direction) -> Duration {
        if direction.is_vertical() {
            let nanos = self.current.as_nanos() as f64 * self.vertical_multiplier;
            Duration::from_nanos(nanos.round() as u64)
        } else {
            self.current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> SpeedController {
        SpeedController::new(&GameConfig::default())
    }

    #[test]
    fn test_speedup_every_five_points() {
        let mut speed = controller();
        for score in 1..5 {
            assert_eq!(speed.on_food_eaten(score), None);
        }
        assert_eq!(speed.on_food_eaten(5), Some(Duration::from_millis(140)));
        assert_eq!(speed.current_interval(), Duration::from_millis(140));
        assert_eq!(speed.on_food_eaten(10), Some(Duration::from_millis(130)));
    }

    #[test]
    fn test_speedup_is_idempotent_per_score() {
        let mut speed = controller();
        assert!(speed.on_food_eaten(5).is_some());
        assert_eq!(speed.on_food_eaten(5), None);
        assert_eq!(speed.on_food_eaten(5), None);
        assert_eq!(speed.current_interval(), Duration::from_millis(140));
    }

    #[test]
    fn test_clamped_at_minimum() {
        let mut speed = controller();
        let mut last = speed.current_interval();
        for score in 1..=200 {
            speed.on_food_eaten(score);
            let now = speed.current_interval();
            assert!(now <= last);
            assert!(now >= Duration::from_millis(50));
            last = now;
        }
        assert_eq!(speed.current_interval(), Duration::from_millis(50));
        assert_eq!(speed.on_food_eaten(205), None);
    }

    #[test]
    fn test_vertical_multiplier() {
        let speed = controller();
        assert_eq!(speed.interval_for(Direction::Left), Duration::from_millis(150));
        assert_eq!(speed.interval_for(Direction::Up), Duration::from_millis(300));

        let flat = SpeedController::new(&GameConfig {
            vertical_speed_multiplier: 1.0,
            ..Default::default()
        });
        assert_eq!(flat.interval_for(Direction::Down), Duration::from_millis(150));
    }
}
