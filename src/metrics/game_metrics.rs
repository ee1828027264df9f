use std::time::{Duration, Instant};

use crate::episode::EpisodeResult;

/// Session metrics shown in the TUI header
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub best_composite: u64,
    pub games_played: u32,
    pub fallbacks: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            best_composite: 0,
            games_played: 0,
            fallbacks: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.fallbacks = 0;
    }

    pub fn on_game_over(&mut self, result: &EpisodeResult) {
        self.games_played += 1;
        self.high_score = self.high_score.max(result.score);
        self.best_composite = self.best_composite.max(result.composite);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
