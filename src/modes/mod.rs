pub mod eval;
pub mod human;
pub mod terminal;
pub mod watch;

pub use eval::{EpisodeRecord, EvalConfig, EvalMode};
pub use human::{HumanMode, KeyboardPlayer};
pub use watch::{PlaybackSpeed, WatchMode};
