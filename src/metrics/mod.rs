pub mod game_metrics;
pub mod session_stats;

pub use game_metrics::GameMetrics;
pub use session_stats::SessionStats;
