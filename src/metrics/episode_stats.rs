//! Statistics over many finished episodes
//!
//! Used by the evaluation mode to compare decision-makers.

use std::collections::VecDeque;

use serde::Serialize;

use crate::episode::EpisodeResult;

/// Episode statistics with rolling averages
///
/// Totals and bests cover every recorded episode; means cover the most recent
/// `window_size` episodes.
///
/// # Example
///
/// ```rust
/// use snake_arena::episode::EpisodeResult;
/// use snake_arena::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record(&EpisodeResult::new(5, 150));
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.best_composite(), 200);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Recent results (rolling window)
    recent: VecDeque<EpisodeResult>,

    /// Total number of episodes recorded
    total_episodes: usize,

    /// Ticks summed over every episode
    total_ticks: u64,

    /// Highest score seen
    best_score: u32,

    /// Highest composite seen
    best_composite: u64,

    /// Window size for rolling averages
    window_size: usize,
}

/// Serializable view of the statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSummary {
    pub episodes: usize,
    pub total_ticks: u64,
    pub mean_score: f64,
    pub mean_ticks: f64,
    pub mean_composite: f64,
    pub best_score: u32,
    pub best_composite: u64,
}

impl EpisodeStats {
    /// Create a tracker averaging over the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            recent: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_ticks: 0,
            best_score: 0,
            best_composite: 0,
            window_size,
        }
    }

    /// Record the result of an episode
    pub fn record(&mut self, result: &EpisodeResult) {
        if self.recent.len() >= self.window_size {
            self.recent.pop_front();
        }
        self.recent.push_back(*result);

        self.total_episodes += 1;
        self.total_ticks += u64::from(result.ticks);
        self.best_score = self.best_score.max(result.score);
        self.best_composite = self.best_composite.max(result.composite);
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn best_composite(&self) -> u64 {
        self.best_composite
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Mean score over the rolling window, 0.0 when empty
    pub fn mean_score(&self) -> f64 {
        self.mean(|r| f64::from(r.score))
    }

    /// Mean ticks over the rolling window
    pub fn mean_ticks(&self) -> f64 {
        self.mean(|r| f64::from(r.ticks))
    }

    /// Mean composite over the rolling window
    pub fn mean_composite(&self) -> f64 {
        self.mean(|r| r.composite as f64)
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            episodes: self.total_episodes,
            total_ticks: self.total_ticks,
            mean_score: self.mean_score(),
            mean_ticks: self.mean_ticks(),
            mean_composite: self.mean_composite(),
            best_score: self.best_score,
            best_composite: self.best_composite,
        }
    }

    /// One-line summary for logs
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Score: {:.2} | Ticks: {:.1} | Composite: {:.1} | Best: {} ({})",
            self.total_episodes,
            self.mean_score(),
            self.mean_ticks(),
            self.mean_composite(),
            self.best_composite,
            self.best_score,
        )
    }

    fn mean(&self, value: impl Fn(&EpisodeResult) -> f64) -> f64 {
        if self.recent.is_empty() {
            0.0
        } else {
            self.recent.iter().map(value).sum::<f64>() / self.recent.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = EpisodeStats::new(10);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.mean_ticks(), 0.0);
        assert_eq!(stats.mean_composite(), 0.0);
    }

    #[test]
    fn test_record_episode() {
        let mut stats = EpisodeStats::new(10);
        stats.record(&EpisodeResult::new(3, 50));

        assert_eq!(stats.total_episodes(), 1);
        assert_eq!(stats.total_ticks(), 50);
        assert!((stats.mean_score() - 3.0).abs() < 1e-9);
        assert!((stats.mean_composite() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = EpisodeStats::new(3);

        stats.record(&EpisodeResult::new(1, 10));
        stats.record(&EpisodeResult::new(2, 20));
        stats.record(&EpisodeResult::new(3, 30));
        assert!((stats.mean_score() - 2.0).abs() < 1e-9);

        // A 4th episode evicts the first
        stats.record(&EpisodeResult::new(4, 40));
        assert_eq!(stats.total_episodes(), 4);
        assert!((stats.mean_score() - 3.0).abs() < 1e-9);
        assert_eq!(stats.total_ticks(), 100);
    }

    #[test]
    fn test_bests_survive_eviction() {
        let mut stats = EpisodeStats::new(1);
        stats.record(&EpisodeResult::new(9, 100));
        stats.record(&EpisodeResult::new(1, 5));

        assert_eq!(stats.best_score(), 9);
        assert_eq!(stats.best_composite(), 190);
        assert!((stats.mean_score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_window_is_clamped() {
        let mut stats = EpisodeStats::new(0);
        stats.record(&EpisodeResult::new(2, 2));
        assert_eq!(stats.window_size(), 1);
        assert!((stats.mean_score() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = EpisodeStats::new(100);
        stats.record(&EpisodeResult::new(5, 150));

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Score: 5.00"));
        assert!(summary.contains("Ticks: 150.0"));
        assert!(summary.contains("Composite: 200.0"));
        assert!(summary.contains("Best: 200 (5)"));
    }

    #[test]
    fn test_summary_serializes() {
        let mut stats = EpisodeStats::new(10);
        stats.record(&EpisodeResult::new(1, 10));

        let json = serde_json::to_value(stats.summary()).unwrap();
        assert_eq!(json["episodes"], 1);
        assert_eq!(json["best_composite"], 20);
    }
}
