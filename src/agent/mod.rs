//! Autopilot policies that drive the snake from a world snapshot

pub mod greedy;

pub use greedy::GreedyAgent;
