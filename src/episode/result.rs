use serde::{Deserialize, Serialize};

use crate::game::TerminalCause;

/// Points a single food item is worth in the composite score
pub const FOOD_WEIGHT: u64 = 10;

/// Summary of one finished episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeResult {
    /// Food eaten
    pub score: u32,
    /// Ticks survived
    pub ticks: u32,
    /// `ticks + 10 * score`
    pub composite: u64,
}

impl EpisodeResult {
    pub fn new(score: u32, ticks: u32) -> Self {
        Self {
            score,
            ticks,
            composite: u64::from(ticks) + FOOD_WEIGHT * u64::from(score),
        }
    }
}

/// Why an episode stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// The game reached a terminal state
    Terminated(TerminalCause),
    /// The tick budget ran out while the snake was alive
    TickBudget,
}
