//! Snake Arena - a deterministic Snake engine for pluggable decision-makers
//!
//! This library provides:
//! - Core game logic with an injected RNG (game module)
//! - Decision-makers and the episode runner that drives them (bot, episode)
//! - A reset/step environment for learning loops (rl module)
//! - TUI rendering and the human, watch and eval modes (render, input, modes)

pub mod bot;
pub mod episode;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
