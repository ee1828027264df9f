use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameState, Position, Snake, StateSnapshot, TerminalCause},
};
use crate::error::GameError;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Direction actually taken (after u-turn coercion)
    pub direction: Direction,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it ended on this step
    pub terminal: Option<TerminalCause>,
}

impl StepOutcome {
    /// Whether this step ended the game
    pub fn terminated(&self) -> bool {
        self.terminal.is_some()
    }

    /// Whether this step killed the snake
    pub fn collided(&self) -> bool {
        self.terminal.is_some_and(|cause| cause.is_collision())
    }
}

/// The game engine that handles all game logic.
///
/// The engine owns the game state and the random source used for food
/// placement. Seeding the random source makes a game fully reproducible.
#[derive(Debug)]
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    state: GameState,
    terminal: Option<TerminalCause>,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Engine whose food placement is reproducible from `seed`
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game engine and its initial state
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let state = Self::initial_state(&config, &mut rng)?;
        Ok(Self {
            config,
            state,
            terminal: None,
            rng,
        })
    }

    /// Wrap an existing state, e.g. to replay a position or set up a scenario
    pub fn from_state(state: GameState, rng: R) -> Self {
        let config = GameConfig {
            grid_width: state.grid_width,
            grid_height: state.grid_height,
            initial_snake_length: state.snake.len(),
            ..Default::default()
        };
        Self {
            config,
            state,
            terminal: None,
            rng,
        }
    }

    /// Reset the game to initial state, keeping the random source
    pub fn reset(&mut self) -> Result<&GameState, GameError> {
        self.config.validate()?;
        self.state = Self::initial_state(&self.config, &mut self.rng)?;
        self.terminal = None;
        Ok(&self.state)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive
    }

    /// Why the game ended, once it has
    pub fn terminal_cause(&self) -> Option<TerminalCause> {
        self.terminal
    }

    /// Current direction of travel
    pub fn direction(&self) -> Direction {
        self.state.snake.direction
    }

    /// Execute one step of the game.
    ///
    /// The tick counter advances on every call. On a collision the snake,
    /// food, score and direction are left exactly as they were before the
    /// call and the game becomes terminal.
    pub fn step(&mut self, requested: Direction) -> Result<StepOutcome, GameError> {
        if !self.state.is_alive {
            return Err(GameError::GameOver);
        }

        // Prevent 180° turns
        let current = self.state.snake.direction;
        let direction = if current.is_opposite(requested) {
            current
        } else {
            requested
        };

        self.state.ticks = self.state.ticks.saturating_add(1);

        let new_head = self.state.snake.head().moved_in_direction(direction);

        if let Some(cause) = self.check_collision(new_head) {
            self.state.is_alive = false;
            self.terminal = Some(cause);
            debug!(
                ?cause,
                tick = self.state.ticks,
                score = self.state.score,
                "snake died"
            );
            return Ok(StepOutcome {
                direction,
                ate_food: false,
                terminal: Some(cause),
            });
        }

        self.state.snake.direction = direction;
        self.state.snake.push_head(new_head);

        let ate_food = new_head == self.state.food;
        let mut terminal = None;

        if ate_food {
            self.state.score += 1;
            match spawn_food(&self.state, &mut self.rng) {
                Some(food) => {
                    debug!(x = food.x, y = food.y, score = self.state.score, "food respawned");
                    self.state.food = food;
                }
                None => {
                    debug!(score = self.state.score, "board filled");
                    self.state.is_alive = false;
                    terminal = Some(TerminalCause::BoardFilled);
                }
            }
        } else {
            self.state.snake.pop_tail();
        }

        self.terminal = terminal;
        Ok(StepOutcome {
            direction,
            ate_food,
            terminal,
        })
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<TerminalCause> {
        if !self.state.is_in_bounds(pos) {
            return Some(TerminalCause::Wall);
        }

        if self.state.is_occupied_by_snake(pos) {
            return Some(TerminalCause::SelfCollision);
        }

        None
    }

    fn initial_state(config: &GameConfig, rng: &mut R) -> Result<GameState, GameError> {
        let center_x = (config.grid_width / 2) as i32;
        let center_y = (config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            config.initial_snake_length,
        );

        // Food position is a placeholder until the free cells are known
        let mut state = GameState::new(
            snake,
            Position::new(center_x, center_y),
            config.grid_width,
            config.grid_height,
        );
        state.food = spawn_food(&state, rng).ok_or(GameError::BoardTooSmall {
            width: config.grid_width,
            height: config.grid_height,
            initial_length: config.initial_snake_length,
        })?;

        Ok(state)
    }
}

/// Pick a free cell uniformly at random
fn spawn_food<R: Rng>(state: &GameState, rng: &mut R) -> Option<Position> {
    state.free_cells().choose(rng).copied()
}
