//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven by the episode runner, the RL environment and the interactive modes.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepOutcome};
pub use state::{GameState, Position, Snake, StateSnapshot, TerminalCause};
