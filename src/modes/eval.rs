//! Headless evaluation
//!
//! Plays a batch of episodes with one decision-maker and reports each result
//! plus aggregate statistics, either as text or as JSON lines.

use std::io::Write;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use crate::bot::{BotKind, DecisionMaker};
use crate::episode::{EpisodeEnd, EpisodeRunner};
use crate::game::GameConfig;
use crate::metrics::EpisodeStats;
use crate::render::render_text;

#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub episodes: usize,
    pub bot: BotKind,
    /// Episode `i` uses engine seed `seed + i`; `None` draws from entropy
    pub seed: Option<u64>,
    /// Emit JSON lines instead of text
    pub json: bool,
    /// Print the final board of every episode (text output only)
    pub show_board: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            bot: BotKind::Greedy,
            seed: None,
            json: false,
            show_board: false,
        }
    }
}

/// One line of JSON output per episode
#[derive(Debug, Clone, Serialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub score: u32,
    pub ticks: u32,
    pub composite: u64,
    pub fallbacks: u32,
    pub end: Option<EpisodeEnd>,
}

pub struct EvalMode {
    runner: EpisodeRunner,
    config: EvalConfig,
    bot: Box<dyn DecisionMaker>,
}

impl EvalMode {
    pub fn new(game: GameConfig, config: EvalConfig) -> Result<Self> {
        let runner = EpisodeRunner::new(game).context("Invalid game configuration")?;
        let bot = config.bot.build(config.seed);
        Ok(Self {
            runner,
            config,
            bot,
        })
    }

    /// Play every episode, writing results to `out`
    pub fn run(&mut self, out: &mut impl Write) -> Result<EpisodeStats> {
        let mut stats = EpisodeStats::new(self.config.episodes);

        info!(
            bot = self.bot.name(),
            episodes = self.config.episodes,
            width = self.runner.config().grid_width,
            height = self.runner.config().grid_height,
            max_ticks = self.runner.config().max_ticks,
            "starting evaluation"
        );

        for i in 0..self.config.episodes {
            let rng = match self.config.seed {
                Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(i as u64)),
                None => StdRng::from_entropy(),
            };

            let mut episode = self.runner.start(rng)?;
            let result = episode.run_to_end(self.bot.as_mut())?;
            stats.record(&result);

            let record = EpisodeRecord {
                episode: i,
                score: result.score,
                ticks: result.ticks,
                composite: result.composite,
                fallbacks: episode.fallbacks(),
                end: episode.end(),
            };
            info!(
                episode = i,
                score = record.score,
                ticks = record.ticks,
                composite = record.composite,
                fallbacks = record.fallbacks,
                "episode complete"
            );

            if self.config.json {
                serde_json::to_writer(&mut *out, &record).context("Failed to write result")?;
                writeln!(out)?;
            } else {
                writeln!(
                    out,
                    "Episode {:>4}: score {:>3}  ticks {:>5}  composite {:>6}{}",
                    i,
                    record.score,
                    record.ticks,
                    record.composite,
                    match record.end {
                        Some(EpisodeEnd::TickBudget) => "  (tick budget)",
                        _ => "",
                    }
                )?;
                if self.config.show_board {
                    writeln!(out, "{}", render_text(&episode.snapshot()))?;
                }
            }
        }

        if self.config.json {
            serde_json::to_writer(&mut *out, &stats.summary())
                .context("Failed to write summary")?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", stats.format_summary())?;
        }
        info!(summary = %stats.format_summary(), "evaluation finished");

        Ok(stats)
    }
}
