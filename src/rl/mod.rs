//! Reinforcement learning interface for the Snake game
//!
//! Provides:
//! - Flat grid observations (0 = empty, 1 = snake, 2 = food)
//! - Per-step rewards (keep-alive, food, death)
//! - A reset/step environment over a 4-action discrete space
//!
//! Training itself happens outside this crate.

pub mod environment;
pub mod observation;
pub mod reward;

pub use environment::{ACTION_COUNT, EnvInfo, SnakeEnvironment, Transition};
pub use observation::{create_observation, observation_as_f32};
pub use reward::RewardConfig;
