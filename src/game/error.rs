use std::fmt;

/// Errors raised by the simulation core
///
/// Reaching game over is not an error; it is reported through
/// [`StepResult::Ended`](super::StepResult::Ended).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The configuration cannot produce a playable world
    InvalidConfiguration(String),
    /// `step` was called on a world that has already ended
    StepAfterGameOver { score: u32 },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidConfiguration(reason) => {
                write!(f, "invalid game configuration: {}", reason)
            }
            GameError::StepAfterGameOver { score } => {
                write!(f, "step called after game over (final score {})", score)
            }
        }
    }
}

impl std::error::Error for GameError {}
