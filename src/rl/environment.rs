use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::observation::create_observation;
use super::reward::RewardConfig;
use crate::error::GameError;
use crate::game::{Direction, GameConfig, GameEngine, GameState};

/// Number of discrete actions: 0 = Up, 1 = Down, 2 = Left, 3 = Right
pub const ACTION_COUNT: usize = 4;

/// Extra information returned with every observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvInfo {
    /// Food eaten so far
    pub score: u32,
    /// Ticks elapsed
    pub tick: u32,
}

/// Everything a learning loop gets back from one step
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Vec<u8>,
    pub reward: f32,
    /// The snake died or filled the board
    pub terminated: bool,
    /// The tick budget ran out with the snake alive
    pub truncated: bool,
    pub info: EnvInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides a reset/step interface with:
/// - Flat observations (one value per cell, see [`create_observation`])
/// - Discrete action space (4 actions: Up, Down, Left, Right)
/// - Scalar rewards from [`RewardConfig`]
#[derive(Debug)]
pub struct SnakeEnvironment<R = StdRng> {
    engine: GameEngine<R>,
    rewards: RewardConfig,
    done: bool,
}

impl SnakeEnvironment<StdRng> {
    /// Environment with reproducible food placement
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SnakeEnvironment<R> {
    /// Create a new Snake environment
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        Ok(Self {
            engine: GameEngine::new(config, rng)?,
            rewards: RewardConfig::default(),
            done: false,
        })
    }

    /// Replace the reward constants
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> Result<(Vec<u8>, EnvInfo), GameError> {
        self.engine.reset()?;
        self.done = false;
        Ok((self.observation(), self.info()))
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Move Up
    /// - 1: Move Down
    /// - 2: Move Left
    /// - 3: Move Right
    pub fn step(&mut self, action: usize) -> Result<Transition, GameError> {
        if self.done {
            return Err(GameError::EpisodeOver);
        }
        let direction = Direction::from_index(action)?;

        let outcome = self.engine.step(direction)?;
        let reward = self.rewards.reward(&outcome);

        let terminated = outcome.terminated();
        let truncated = !terminated && self.engine.state().ticks >= self.engine.config().max_ticks;
        self.done = terminated || truncated;

        Ok(Transition {
            observation: self.observation(),
            reward,
            terminated,
            truncated,
            info: self.info(),
        })
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Vec<u8> {
        create_observation(self.engine.state())
    }

    /// Size of the discrete action space
    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    /// Length of every observation vector
    pub fn observation_len(&self) -> usize {
        let config = self.engine.config();
        config.grid_width * config.grid_height
    }

    pub fn info(&self) -> EnvInfo {
        let state = self.engine.state();
        EnvInfo {
            score: state.score,
            tick: state.ticks,
        }
    }

    /// Whether the current episode is over
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Get reference to current game state (for testing/debugging)
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::rl::observation::{FOOD, SNAKE};

    fn env(config: GameConfig) -> SnakeEnvironment {
        SnakeEnvironment::seeded(config, 17).unwrap()
    }

    /// Environment whose food sits right above the starting head
    fn env_with_food_above() -> SnakeEnvironment {
        let mut env = env(GameConfig::default());
        let mut state = env.state().clone();
        state.food = Position::new(5, 4);
        env.engine = GameEngine::from_state(state, StdRng::seed_from_u64(1));
        env
    }

    #[test]
    fn test_reset_returns_valid_observation() {
        let mut env = env(GameConfig::default());
        let (obs, info) = env.reset().unwrap();

        assert_eq!(obs.len(), 100);
        assert_eq!(env.observation_len(), 100);
        assert_eq!(obs.iter().filter(|&&v| v == SNAKE).count(), 3);
        assert_eq!(obs.iter().filter(|&&v| v == FOOD).count(), 1);
        assert_eq!(info, EnvInfo { score: 0, tick: 0 });
    }

    #[test]
    fn test_keep_alive_reward() {
        let mut env = env(GameConfig::default());
        env.reset().unwrap();
        env.engine = {
            let mut state = env.state().clone();
            state.food = Position::new(0, 0);
            GameEngine::from_state(state, StdRng::seed_from_u64(2))
        };

        let transition = env.step(3).unwrap();

        assert_eq!(transition.reward, 0.01);
        assert!(!transition.terminated);
        assert!(!transition.truncated);
        assert_eq!(transition.info.tick, 1);
    }

    #[test]
    fn test_food_reward() {
        let mut env = env_with_food_above();

        let transition = env.step(0).unwrap();

        assert_eq!(transition.reward, 1.0);
        assert_eq!(transition.info.score, 1);
        assert!(!transition.terminated);
    }

    #[test]
    fn test_death_reward_and_episode_over() {
        let mut env = env(GameConfig::default());
        env.reset().unwrap();

        // Go up until the wall; food on the way only changes the reward
        let mut last = env.step(0).unwrap();
        while !last.terminated {
            last = env.step(0).unwrap();
        }

        assert_eq!(last.reward, -1.0);
        assert!(env.is_done());
        assert_eq!(env.step(0), Err(GameError::EpisodeOver));
        assert_eq!(env.step(9), Err(GameError::EpisodeOver));

        env.reset().unwrap();
        assert!(!env.is_done());
        assert!(env.step(0).is_ok());
    }

    #[test]
    fn test_truncation_at_tick_budget() {
        let mut env = env(GameConfig::default().with_max_ticks(2));
        env.reset().unwrap();

        let first = env.step(3).unwrap();
        assert!(!first.truncated);

        let second = env.step(3).unwrap();
        assert!(second.truncated);
        assert!(!second.terminated);
        assert_eq!(env.step(3), Err(GameError::EpisodeOver));
    }

    #[test]
    fn test_invalid_action() {
        let mut env = env(GameConfig::default());
        assert_eq!(env.action_count(), 4);
        for action in 0..env.action_count() {
            assert!(Direction::from_index(action).is_ok());
        }
        assert_eq!(env.step(env.action_count()), Err(GameError::InvalidAction(4)));
        assert_eq!(env.state().ticks, 0);
    }

    #[test]
    fn test_reverse_action_goes_straight() {
        let mut env = env(GameConfig::default());
        env.reset().unwrap();
        env.step(2).unwrap(); // Left while facing Right

        assert_eq!(env.state().snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_observation_changes_after_step() {
        let mut env = env(GameConfig::default());
        let (before, _) = env.reset().unwrap();
        let transition = env.step(3).unwrap();

        assert_ne!(before, transition.observation);
    }
}
