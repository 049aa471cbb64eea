//! Space Snake - Snake on a hazardous board
//!
//! This library provides:
//! - Core game logic with meteors, portals and speed-up (game module)
//! - TUI rendering (render module)
//! - Keyboard handling (input module)
//! - A greedy autopilot (agent module)
//! - Session metrics (metrics module)
//! - Interactive and headless execution modes (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
