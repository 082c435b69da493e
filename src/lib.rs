//! Turn-based Snake: a grid simulation engine plus the HTTP/WebSocket layer
//! that serves it.
//!
//! [`game::SnakeEngine`] is the whole simulation. Callers choose a direction,
//! advance one step, and read a [`snapshot::Snapshot`]; nothing moves on its
//! own.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod server;
pub mod session;
pub mod snake;
pub mod snapshot;

pub use config::{EngineConfig, GridSize};
pub use error::SnakeError;
pub use game::{GameStatus, SnakeEngine, StepOutcome};
pub use input::Direction;
pub use snake::Position;
pub use snapshot::Snapshot;
