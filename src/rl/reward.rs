//! Reward signal for learning loops

use serde::{Deserialize, Serialize};

use crate::game::StepOutcome;

/// Per-step reward constants.
///
/// Trained policies depend on these values; the defaults must not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Normal tick where the snake survives without eating
    pub keep_alive: f32,
    /// Tick where the snake eats the food
    pub food: f32,
    /// Tick where the snake dies
    pub death: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            keep_alive: 0.01,
            food: 1.0,
            death: -1.0,
        }
    }
}

impl RewardConfig {
    /// Reward for one step; death overrides food, food overrides keep-alive
    pub fn reward(&self, outcome: &StepOutcome) -> f32 {
        if outcome.collided() {
            self.death
        } else if outcome.ate_food {
            self.food
        } else {
            self.keep_alive
        }
    }
}
