//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! `GameEngine::advance` is a plain state transition and can be driven from tests.

pub mod clock;
pub mod config;
pub mod engine;
pub mod heading;
pub mod state;

// Re-export commonly used types
pub use clock::{ClockEvent, GameClock, LoopState};
pub use config::{GameConfig, SpeedConfig};
pub use engine::{GameEngine, StepResult};
pub use heading::Heading;
pub use state::{CollisionType, GameState, Position, Snake};
