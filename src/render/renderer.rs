use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::episode::EpisodeResult;
use crate::game::{Position, StateSnapshot};
use crate::metrics::GameMetrics;

/// Mode-specific text around the board
#[derive(Debug, Clone, Default)]
pub struct Hud {
    /// Board title, e.g. the bot's name
    pub title: String,
    /// Extra status shown in the header (speed, pause state)
    pub status: String,
    /// Key hints as (keys, action) pairs
    pub controls: Vec<(&'static str, &'static str)>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        snapshot: &StateSnapshot,
        metrics: &GameMetrics,
        hud: &Hud,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics, hud), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.alive {
            frame.render_widget(self.render_grid(snapshot, hud), game_area);
        } else {
            frame.render_widget(self.render_game_over(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(hud), chunks[2]);
    }

    fn render_grid(&self, snapshot: &StateSnapshot, hud: &Hud) -> Paragraph<'_> {
        let head = snapshot.head();
        let mut lines = Vec::with_capacity(snapshot.board_height);

        for y in 0..snapshot.board_height {
            let mut spans = Vec::with_capacity(snapshot.board_width);

            for x in 0..snapshot.board_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" {} ", hud.title)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        snapshot: &StateSnapshot,
        metrics: &GameMetrics,
        hud: &Hud,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(snapshot.tick.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(
                format!("{} ({})", metrics.high_score, metrics.best_composite),
                value,
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];

        if metrics.fallbacks > 0 {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Fallbacks: ", Style::default().fg(Color::Red)));
            spans.push(Span::styled(metrics.fallbacks.to_string(), value));
        }

        if !hud.status.is_empty() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(hud.status.clone(), Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &StateSnapshot) -> Paragraph<'_> {
        let result = EpisodeResult::new(snapshot.score, snapshot.tick);
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", label),
                Span::styled(result.score.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Ticks: ", label),
                Span::styled(result.ticks.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Composite: ", label),
                Span::styled(result.composite.to_string(), value),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, (keys, action)) in hud.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*keys, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {}", action)));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
