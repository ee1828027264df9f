use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::time::interval;

use super::terminal::{Tui, restore_terminal, setup_terminal};
use crate::bot::DecisionMaker;
use crate::episode::{Episode, EpisodeRunner};
use crate::error::DecisionError;
use crate::game::{Direction, GameConfig, StateSnapshot};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer};

/// Decision-maker fed by the keyboard.
///
/// Holds the last key pressed since the previous tick; with no key the snake
/// keeps going.
#[derive(Debug, Default)]
pub struct KeyboardPlayer {
    pending: Option<Direction>,
}

impl KeyboardPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, direction: Direction) {
        self.pending = Some(direction);
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

impl DecisionMaker for KeyboardPlayer {
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError> {
        Ok(self.pending.take().unwrap_or(snapshot.direction))
    }

    fn name(&self) -> &str {
        "human"
    }
}

pub struct HumanMode {
    runner: EpisodeRunner,
    episode: Episode,
    player: KeyboardPlayer,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    paused: bool,
    should_quit: bool,
    result_recorded: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, tick_interval: Duration) -> Result<Self> {
        let runner = EpisodeRunner::new(config).context("Invalid game configuration")?;
        let episode = runner.start(StdRng::from_entropy())?;

        Ok(Self {
            runner,
            episode,
            player: KeyboardPlayer::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            paused: false,
            should_quit: false,
            result_recorded: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.update_game()?;
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(direction) => self.player.press(direction),
                KeyAction::TogglePause => self.paused = !self.paused,
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::SetSpeed(_) | KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        self.episode
            .advance(&mut self.player)
            .context("Episode step failed")?;

        if self.episode.is_finished() && !self.result_recorded {
            self.metrics.on_game_over(&self.episode.result());
            self.result_recorded = true;
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.episode = self.runner.start(StdRng::from_entropy())?;
        self.metrics.on_game_start();
        self.player.clear();
        self.result_recorded = false;
        Ok(())
    }

    fn hud(&self) -> Hud {
        Hud {
            title: "Snake".to_string(),
            status: if self.paused {
                "PAUSED".to_string()
            } else {
                String::new()
            },
            controls: vec![
                ("↑↓←→/WASD", "move"),
                ("Space", "pause"),
                ("R", "restart"),
                ("Q", "quit"),
            ],
        }
    }
}
