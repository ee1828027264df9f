use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::DecisionMaker;
use crate::error::DecisionError;
use crate::game::{Direction, StateSnapshot};

/// Baseline that picks uniformly among the three non-reversing directions
#[derive(Debug, Clone)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl DecisionMaker for RandomBot {
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError> {
        let current = snapshot.direction;
        let choices: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|dir| !current.is_opposite(*dir))
            .collect();

        choices
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| DecisionError::Failed("no direction to choose from".to_string()))
    }

    fn name(&self) -> &str {
        "random"
    }
}
