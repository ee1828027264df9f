use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use super::result::{EpisodeEnd, EpisodeResult};
use crate::bot::DecisionMaker;
use crate::error::{DecisionError, GameError};
use crate::game::{Direction, GameConfig, GameEngine, StateSnapshot, StepOutcome};

/// One episode in progress.
///
/// Owns the engine for the lifetime of the episode and advances it one tick
/// at a time. Interactive modes call [`Episode::advance`] between frames;
/// headless callers use [`Episode::run_to_end`].
#[derive(Debug)]
pub struct Episode<R = StdRng> {
    engine: GameEngine<R>,
    max_ticks: u32,
    fallbacks: u32,
}

impl<R: Rng> Episode<R> {
    pub fn new(engine: GameEngine<R>, max_ticks: u32) -> Self {
        Self {
            engine,
            max_ticks,
            fallbacks: 0,
        }
    }

    /// Play one tick.
    ///
    /// Returns `Ok(None)` once the episode is finished. A faulty decision is
    /// replaced by the current direction and logged.
    pub fn advance<D>(&mut self, decision_maker: &mut D) -> Result<Option<StepOutcome>, GameError>
    where
        D: DecisionMaker + ?Sized,
    {
        if self.is_finished() {
            return Ok(None);
        }

        let snapshot = self.engine.snapshot();
        let direction = match request_move(decision_maker, &snapshot) {
            Ok(direction) => direction,
            Err(err) => {
                self.fallbacks += 1;
                warn!(
                    bot = decision_maker.name(),
                    tick = snapshot.tick,
                    error = %err,
                    "bad move from decision-maker, going straight"
                );
                snapshot.direction
            }
        };

        self.engine.step(direction).map(Some)
    }

    /// Play until the snake dies or the tick budget runs out
    pub fn run_to_end<D>(&mut self, decision_maker: &mut D) -> Result<EpisodeResult, GameError>
    where
        D: DecisionMaker + ?Sized,
    {
        while self.advance(decision_maker)?.is_some() {}

        let result = self.result();
        debug!(
            bot = decision_maker.name(),
            score = result.score,
            ticks = result.ticks,
            fallbacks = self.fallbacks,
            end = ?self.end(),
            "episode finished"
        );
        Ok(result)
    }

    pub fn is_finished(&self) -> bool {
        !self.engine.is_alive() || self.engine.state().ticks >= self.max_ticks
    }

    /// Why the episode stopped, or `None` while it is still running
    pub fn end(&self) -> Option<EpisodeEnd> {
        if let Some(cause) = self.engine.terminal_cause() {
            return Some(EpisodeEnd::Terminated(cause));
        }
        if self.engine.state().ticks >= self.max_ticks {
            return Some(EpisodeEnd::TickBudget);
        }
        None
    }

    /// Score, ticks and composite so far
    pub fn result(&self) -> EpisodeResult {
        let state = self.engine.state();
        EpisodeResult::new(state.score, state.ticks)
    }

    /// How many ticks fell back to going straight
    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.engine.snapshot()
    }
}

/// Runs whole episodes with a fixed configuration
#[derive(Debug, Clone)]
pub struct EpisodeRunner {
    config: GameConfig,
}

impl EpisodeRunner {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start an episode on a fresh engine
    pub fn start<R: Rng>(&self, rng: R) -> Result<Episode<R>, GameError> {
        let engine = GameEngine::new(self.config.clone(), rng)?;
        Ok(Episode::new(engine, self.config.max_ticks))
    }

    /// Play a full episode and return its summary
    pub fn run<D, R>(&self, decision_maker: &mut D, rng: R) -> Result<EpisodeResult, GameError>
    where
        D: DecisionMaker + ?Sized,
        R: Rng,
    {
        self.start(rng)?.run_to_end(decision_maker)
    }
}

/// Play one episode on a fresh `board_width` x `board_height` board.
///
/// The decision-maker is asked for a move every tick. Errors and panics from
/// it, and invalid symbols, never abort the episode: the snake keeps its
/// current direction instead. The episode ends when the snake dies or after
/// `max_ticks` ticks.
pub fn run_episode<D, R>(
    decision_maker: &mut D,
    max_ticks: u32,
    board_width: usize,
    board_height: usize,
    rng: R,
) -> Result<EpisodeResult, GameError>
where
    D: DecisionMaker + ?Sized,
    R: Rng,
{
    let config = GameConfig::new(board_width, board_height).with_max_ticks(max_ticks);
    EpisodeRunner::new(config)?.run(decision_maker, rng)
}

static QUIET_PANIC_HOOK: Once = Once::new();

thread_local! {
    static ASKING_DECISION_MAKER: Cell<bool> = const { Cell::new(false) };
}

/// Wrap the process panic hook so panics inside a move request stay silent.
///
/// The fault is reported through `warn!` instead; printing it would also draw
/// over the TUI, which renders to stderr. Panics anywhere else still reach the
/// previous hook.
fn install_quiet_panic_hook() {
    QUIET_PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !ASKING_DECISION_MAKER.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Ask for a move, turning a panic into a captured fault
fn request_move<D>(decision_maker: &mut D, snapshot: &StateSnapshot) -> Result<Direction, DecisionError>
where
    D: DecisionMaker + ?Sized,
{
    install_quiet_panic_hook();

    ASKING_DECISION_MAKER.with(|flag| flag.set(true));
    let decision = panic::catch_unwind(AssertUnwindSafe(|| decision_maker.next_move(snapshot)));
    ASKING_DECISION_MAKER.with(|flag| flag.set(false));

    match decision {
        Ok(decision) => decision,
        Err(payload) => Err(DecisionError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
