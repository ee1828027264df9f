//! Watch a decision-maker play
//!
//! Runs episodes with a bot at a fixed tick rate and draws every step.
//!
//! # Controls
//!
//! - Space/P: Pause/unpause
//! - R: Start a new episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::time::Duration;
use tokio::time::{Interval, interval};

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::bot::DecisionMaker;
use crate::episode::{Episode, EpisodeRunner};
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step)
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl PlaybackSpeed {
    /// Get the tick interval for this speed
    pub fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Watch mode state
pub struct WatchMode {
    runner: EpisodeRunner,
    bot: Box<dyn DecisionMaker>,
    /// Seeds each episode's engine so a `--seed` run replays identically
    seeds: StdRng,
    episode: Episode,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    speed: Option<PlaybackSpeed>,
    paused: bool,
    should_quit: bool,
    result_recorded: bool,
    episode_count: usize,
}

impl WatchMode {
    pub fn new(
        config: GameConfig,
        bot: Box<dyn DecisionMaker>,
        seed: Option<u64>,
        tick_interval: Duration,
    ) -> Result<Self> {
        let runner = EpisodeRunner::new(config).context("Invalid game configuration")?;
        let mut seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let episode = runner.start(StdRng::seed_from_u64(seeds.next_u64()))?;

        Ok(Self {
            runner,
            bot,
            seeds,
            episode,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            speed: None,
            paused: false,
            should_quit: false,
            result_recorded: false,
            episode_count: 1,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_watch_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.episode.snapshot();
                    let hud = self.hud();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics, &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Play one tick, recording the result once the episode ends
    fn advance(&mut self) -> Result<()> {
        self.episode
            .advance(self.bot.as_mut())
            .context("Episode step failed")?;
        self.metrics.fallbacks = self.episode.fallbacks();

        if self.episode.is_finished() && !self.result_recorded {
            self.metrics.on_game_over(&self.episode.result());
            self.result_recorded = true;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Quit => self.should_quit = true,
                KeyAction::TogglePause => self.paused = !self.paused,
                KeyAction::Restart => self.restart()?,
                KeyAction::SetSpeed(speed) => {
                    self.speed = Some(speed);
                    self.tick_interval = speed.tick_interval();
                    *tick_timer = interval(self.tick_interval);
                }
                KeyAction::Move(_) | KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn restart(&mut self) -> Result<()> {
        self.episode = self
            .runner
            .start(StdRng::seed_from_u64(self.seeds.next_u64()))?;
        self.metrics.on_game_start();
        self.result_recorded = false;
        self.episode_count += 1;
        Ok(())
    }

    fn hud(&self) -> Hud {
        let mut status = format!("Episode {}", self.episode_count);
        if let Some(speed) = self.speed {
            status.push_str(&format!(" | {}", speed.as_str()));
        }
        if self.paused {
            status.push_str(" | PAUSED");
        } else if self.episode.is_finished() && self.episode.engine().is_alive() {
            status.push_str(" | Tick budget reached");
        }

        Hud {
            title: format!("Snake: {}", self.bot.name()),
            status,
            controls: vec![
                ("Space", "pause"),
                ("1-4", "speed"),
                ("R", "restart"),
                ("Q", "quit"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::GreedyBot;

    fn watch(seed: u64) -> WatchMode {
        WatchMode::new(
            GameConfig::default(),
            Box::new(GreedyBot::new()),
            Some(seed),
            Duration::from_millis(50),
        )
        .unwrap()
    }

    #[test]
    fn test_playback_speed() {
        assert_eq!(PlaybackSpeed::Slow.tick_interval(), Duration::from_millis(500));
        assert_eq!(PlaybackSpeed::Normal.tick_interval(), Duration::from_millis(125));
        assert_eq!(PlaybackSpeed::Fast.tick_interval(), Duration::from_millis(50));
        assert_eq!(PlaybackSpeed::VeryFast.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_advance_records_game_over_once() {
        let mut mode = watch(3);
        while !mode.episode.is_finished() {
            mode.advance().unwrap();
        }
        mode.advance().unwrap();

        assert_eq!(mode.metrics.games_played, 1);
        assert!(mode.result_recorded);
    }

    #[test]
    fn test_restart_starts_fresh_episode() {
        let mut mode = watch(4);
        mode.advance().unwrap();
        mode.restart().unwrap();

        assert_eq!(mode.episode.result().ticks, 0);
        assert_eq!(mode.episode_count, 2);
        assert!(!mode.result_recorded);
    }

    #[test]
    fn test_same_seed_replays_same_food() {
        let a = watch(8);
        let b = watch(8);
        assert_eq!(a.episode.snapshot().food, b.episode.snapshot().food);
    }

    #[test]
    fn test_hud_reports_pause() {
        let mut mode = watch(1);
        mode.paused = true;
        mode.speed = Some(PlaybackSpeed::Fast);

        let hud = mode.hud();
        assert_eq!(hud.title, "Snake: greedy");
        assert_eq!(hud.status, "Episode 1 | Fast | PAUSED");
    }
}
