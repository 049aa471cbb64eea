//! Core simulation for Space Snake
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies. Callers own the [`WorldState`], hand it to
//! [`GameEngine::step`] once per tick together with a clock reading, and read
//! the result back through the snapshot accessors.

pub mod action;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hazards;
pub mod spawner;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GameConfig;
pub use engine::{GameEngine, StepEvents, StepResult};
pub use error::GameError;
pub use grid::Grid;
pub use hazards::PortalPair;
pub use state::{EndReason, GameStatus, Position, Snake, WorldState};
