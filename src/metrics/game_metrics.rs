use std::time::Duration;

use crate::game::EndReason;

/// Per-session numbers shown in the header. Kept in memory only.
pub struct GameMetrics {
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
    pub last_end: Option<EndReason>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            last_end: None,
        }
    }

    /// `elapsed` comes from the game clock, so paused time is excluded
    pub fn update(&mut self, elapsed: Duration) {
        self.elapsed_time = elapsed;
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.last_end = None;
    }

    pub fn on_game_over(&mut self, final_score: u32, reason: EndReason) {
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
        self.last_end = Some(reason);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
