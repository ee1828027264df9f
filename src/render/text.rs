//! Plain-text board rendering for logs and headless runs.

use std::fmt::Write;

use crate::game::{Position, StateSnapshot};

/// Draw the board with a border, `@` for the head, `o` for the body and `*`
/// for food, followed by a score/tick line.
///
/// ```text
/// +----+
/// |*   |
/// | oo@|
/// +----+
/// Score: 0  Tick: 3
/// ```
pub fn render_text(snapshot: &StateSnapshot) -> String {
    let border = format!("+{}+", "-".repeat(snapshot.board_width));
    let mut out = String::with_capacity((snapshot.board_width + 3) * (snapshot.board_height + 3));

    out.push_str(&border);
    out.push('\n');

    for y in 0..snapshot.board_height {
        out.push('|');
        for x in 0..snapshot.board_width {
            let pos = Position::new(x as i32, y as i32);
            let cell = match snapshot.snake.iter().position(|p| *p == pos) {
                Some(0) => '@',
                Some(_) => 'o',
                None if pos == snapshot.food => '*',
                None => ' ',
            };
            out.push(cell);
        }
        out.push_str("|\n");
    }

    out.push_str(&border);
    out.push('\n');
    let _ = write!(out, "Score: {}  Tick: {}", snapshot.score, snapshot.tick);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_render_text() {
        let snapshot = StateSnapshot {
            board_width: 4,
            board_height: 2,
            snake: vec![Position::new(3, 1), Position::new(2, 1), Position::new(1, 1)],
            food: Position::new(0, 0),
            direction: Direction::Right,
            tick: 3,
            score: 0,
            alive: true,
        };

        let expected = "+----+\n|*   |\n| oo@|\n+----+\nScore: 0  Tick: 3";
        assert_eq!(render_text(&snapshot), expected);
    }
}
