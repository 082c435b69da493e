use thiserror::Error;

/// Errors surfaced by the engine and the layers that drive it.
///
/// Collisions are not errors: they are reported through
/// [`crate::game::StepOutcome`] and the game status.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SnakeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("game session not found: {0}")]
    NotInitialized(String),

    #[error("food cannot be placed: board {width}x{height} is full")]
    GridFull { width: u16, height: u16 },
}
