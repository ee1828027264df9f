//! Error types for the game core and the decision-maker boundary

use thiserror::Error;

/// Errors returned by the engine, the runner and the RL environment.
///
/// These indicate misuse by the driving code. Collisions are not errors; they
/// are reported through [`crate::game::StepOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The board cannot hold the initial snake plus one food cell
    #[error("board {width}x{height} is too small for a snake of length {initial_length}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        initial_length: usize,
    },

    /// `step` was called after the snake died
    #[error("game is over; reset before stepping again")]
    GameOver,

    /// Action index outside the discrete action space
    #[error("invalid action index {0}, expected 0..=3")]
    InvalidAction(usize),

    /// The environment episode already terminated or was truncated
    #[error("episode is over; call reset")]
    EpisodeOver,
}

/// A fault raised by a decision-maker while choosing a move.
///
/// The runner never propagates these: it logs them and keeps the snake going
/// straight for that tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// The decision-maker produced something that is not a direction symbol
    #[error("invalid direction symbol {0:?}")]
    InvalidSymbol(String),

    /// The decision-maker reported its own failure
    #[error("decision-maker failed: {0}")]
    Failed(String),

    /// The decision-maker panicked while choosing a move
    #[error("decision-maker panicked: {0}")]
    Panicked(String),
}
