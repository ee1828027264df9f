//! Episode runner: drives the engine with a decision-maker until the game
//! ends or the tick budget runs out.

pub mod result;
pub mod runner;

pub use result::{EpisodeEnd, EpisodeResult, FOOD_WEIGHT};
pub use runner::{Episode, EpisodeRunner, run_episode};
