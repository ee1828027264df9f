//! Decision-makers that choose the snake's next move
//!
//! Any policy, scripted or learned, plugs into the episode runner by
//! implementing [`DecisionMaker`]. The runner only ever hands out a
//! [`StateSnapshot`], so a decision-maker cannot reach into the engine.

pub mod greedy;
pub mod random;

pub use greedy::GreedyBot;
pub use random::RandomBot;

use crate::error::DecisionError;
use crate::game::{Direction, StateSnapshot};

/// A policy mapping a state snapshot to a requested direction.
///
/// Returning `Err` is the supported way to report a fault; the runner then
/// keeps the snake going straight for that tick. Policies that produce raw
/// symbols can convert them with `symbol.parse::<Direction>()`, which yields
/// [`DecisionError::InvalidSymbol`] for anything that is not a direction.
pub trait DecisionMaker {
    /// Choose the next move
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError>;

    /// Short name used in logs
    fn name(&self) -> &str {
        "anonymous"
    }
}

impl<D: DecisionMaker + ?Sized> DecisionMaker for &mut D {
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError> {
        (**self).next_move(snapshot)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<D: DecisionMaker + ?Sized> DecisionMaker for Box<D> {
    fn next_move(&mut self, snapshot: &StateSnapshot) -> Result<Direction, DecisionError> {
        (**self).next_move(snapshot)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Built-in decision-makers selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotKind {
    Greedy,
    Random,
}

impl BotKind {
    /// Build the decision-maker; `seed` only matters for the random bot
    pub fn build(self, seed: Option<u64>) -> Box<dyn DecisionMaker> {
        match self {
            BotKind::Greedy => Box::new(GreedyBot::new()),
            BotKind::Random => Box::new(match seed {
                Some(seed) => RandomBot::seeded(seed),
                None => RandomBot::from_entropy(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    fn snapshot() -> StateSnapshot {
        StateSnapshot {
            board_width: 10,
            board_height: 10,
            snake: vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            food: Position::new(8, 5),
            direction: Direction::Right,
            tick: 0,
            score: 0,
            alive: true,
        }
    }

    #[test]
    fn test_boxed_and_borrowed_bots_delegate() {
        let mut greedy = GreedyBot::new();
        let borrowed: &mut GreedyBot = &mut greedy;
        assert_eq!(borrowed.next_move(&snapshot()), Ok(Direction::Right));
        assert_eq!(borrowed.name(), "greedy");

        let mut boxed = BotKind::Greedy.build(None);
        assert_eq!(boxed.next_move(&snapshot()), Ok(Direction::Right));
        assert_eq!(boxed.name(), "greedy");
    }

    #[test]
    fn test_seeded_random_bots_agree() {
        let mut a = BotKind::Random.build(Some(5));
        let mut b = BotKind::Random.build(Some(5));
        for _ in 0..20 {
            assert_eq!(a.next_move(&snapshot()), b.next_move(&snapshot()));
        }
    }
}
