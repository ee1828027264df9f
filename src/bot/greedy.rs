use super::DecisionMaker;
use crate::error::DecisionError;
use crate::game::{Direction, StateSnapshot};

/// Greedy baseline: close the horizontal gap to the food first, then the
/// vertical one, never asking for a 180° turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }

    /// The move for a snapshot; never fails
    pub fn choose(snapshot: &StateSnapshot) -> Direction {
        let head = snapshot.head();
        let food = snapshot.food;
        let current = snapshot.direction;

        if head.x < food.x && current != Direction::Left {
            return Direction::Right;
        }
        if head.x > food.x && current != Direction::Right {
            return Direction::Left;
        }

        if head.y < food.y && current != Direction::Up {
            return Direction::Down;
        }
        if head.y > food.y && current != Direction::Down {
            return Direction::Up;
        }

        current
    }
}

impl DecisionMaker for GreedyBot {
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError> {
        Ok(Self::choose(snapshot))
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn snapshot(head: Position, food: Position, direction: Direction) -> StateSnapshot {
        StateSnapshot {
            board_width: 10,
            board_height: 10,
            snake: vec![head],
            food,
            direction,
            tick: 0,
            score: 0,
            alive: true,
        }
    }

    #[test]
    fn test_aligns_horizontally_first() {
        let s = snapshot(Position::new(2, 2), Position::new(7, 8), Direction::Down);
        assert_eq!(GreedyBot::choose(&s), Direction::Right);

        let s = snapshot(Position::new(7, 2), Position::new(1, 8), Direction::Up);
        assert_eq!(GreedyBot::choose(&s), Direction::Left);
    }

    #[test]
    fn test_never_requests_reverse() {
        // Food behind the snake: fall through to the vertical check
        let s = snapshot(Position::new(7, 2), Position::new(1, 8), Direction::Right);
        assert_eq!(GreedyBot::choose(&s), Direction::Down);

        // Food straight behind with no vertical gap: keep going
        let s = snapshot(Position::new(7, 2), Position::new(1, 2), Direction::Right);
        assert_eq!(GreedyBot::choose(&s), Direction::Right);
    }

    #[test]
    fn test_aligns_vertically_when_column_matches() {
        let s = snapshot(Position::new(4, 6), Position::new(4, 1), Direction::Right);
        assert_eq!(GreedyBot::choose(&s), Direction::Up);

        let s = snapshot(Position::new(4, 1), Position::new(4, 6), Direction::Left);
        assert_eq!(GreedyBot::choose(&s), Direction::Down);

        let s = snapshot(Position::new(4, 1), Position::new(4, 6), Direction::Up);
        assert_eq!(GreedyBot::choose(&s), Direction::Up);
    }

    #[test]
    fn test_next_move_is_pure() {
        let mut bot = GreedyBot::new();
        let s = snapshot(Position::new(2, 2), Position::new(2, 0), Direction::Left);
        let first = bot.next_move(&s);
        assert_eq!(first, bot.next_move(&s));
        assert_eq!(first, Ok(Direction::Up));
    }
}
