//! Aggregate statistics over many games
//!
//! Used by headless mode to summarise autopilot runs.

use std::collections::BTreeMap;

use crate::game::EndReason;

/// Totals and averages over every recorded game
///
/// # Example
///
/// ```rust
/// use space_snake::game::EndReason;
/// use space_snake::metrics::SessionStats;
///
/// let mut stats = SessionStats::new();
/// stats.record_game(4, 120, EndReason::Wall);
/// stats.record_game(8, 300, EndReason::Meteor);
///
/// assert_eq!(stats.games(), 2);
/// assert_eq!(stats.best_score(), 8);
/// assert!((stats.mean_score() - 6.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    scores: Vec<u32>,
    total_steps: u64,
    end_reasons: BTreeMap<&'static str, usize>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, score: u32, steps: u32, reason: EndReason) {
        self.scores.push(score);
        self.total_steps += u64::from(steps);
        *self.end_reasons.entry(reason.as_str()).or_insert(0) += 1;
    }

    /// Record a game that was cut off before it ended
    pub fn record_unfinished(&mut self, score: u32, steps: u32) {
        self.scores.push(score);
        self.total_steps += u64::from(steps);
        *self.end_reasons.entry("step limit").or_insert(0) += 1;
    }

    pub fn unfinished(&self) -> usize {
        self.end_reasons.get("step limit").copied().unwrap_or(0)
    }

    pub fn games(&self) -> usize {
        self.scores.len()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Average score, or 0.0 before any game is recorded
    pub fn mean_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().map(|&s| f64::from(s)).sum::<f64>() / self.scores.len() as f64
    }

    pub fn mean_steps(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.total_steps as f64 / self.scores.len() as f64
    }

    pub fn end_count(&self, reason: EndReason) -> usize {
        self.end_reasons.get(reason.as_str()).copied().unwrap_or(0)
    }

    /// One-line summary, e.g. `Games: 2 | Best: 8 | Mean: 6.00 | Steps: 210.0 | meteor=1 wall=1`
    pub fn format_summary(&self) -> String {
        let reasons = self
            .end_reasons
            .iter()
            .map(|(reason, count)| format!("{}={}", reason, count))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "Games: {} | Best: {} | Mean: {:.2} | Steps: {:.1} | {}",
            self.games(),
            self.best_score(),
            self.mean_score(),
            self.mean_steps(),
            reasons
        )
    }
}
