use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_arena::bot::BotKind;
use snake_arena::game::GameConfig;
use snake_arena::modes::{EvalConfig, EvalMode, HumanMode, WatchMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Snake engine for pluggable decision-makers")]
struct Cli {
    /// Run mode
    #[arg(long, value_enum, default_value_t = Mode::Watch)]
    mode: Mode,

    /// Grid width [default: 10]
    #[arg(long)]
    width: Option<usize>,

    /// Grid height [default: 10]
    #[arg(long)]
    height: Option<usize>,

    /// Tick budget per episode [default: 1000]
    #[arg(long)]
    max_ticks: Option<u32>,

    /// JSON file with a game configuration; size flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Decision-maker for watch and eval modes
    #[arg(long, value_enum, default_value_t = BotArg::Greedy)]
    bot: BotArg,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to evaluate
    #[arg(long, default_value_t = 100)]
    episodes: usize,

    /// Print eval results as JSON lines
    #[arg(long)]
    json: bool,

    /// Print the final board of each evaluated episode
    #[arg(long)]
    show_board: bool,

    /// Milliseconds per tick in human and watch modes
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch a bot play
    Watch,
    /// Run episodes headless and report statistics
    Eval,
}

#[derive(Clone, Copy, ValueEnum)]
enum BotArg {
    /// Head straight for the food
    Greedy,
    /// Random non-reversing moves
    Random,
}

impl From<BotArg> for BotKind {
    fn from(arg: BotArg) -> Self {
        match arg {
            BotArg::Greedy => BotKind::Greedy,
            BotArg::Random => BotKind::Random,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.max_ticks = max_ticks;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;
    let tick_interval = Duration::from_millis(cli.tick_ms.max(1));

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, tick_interval)?;
            human_mode.run().await?;
        }
        Mode::Watch => {
            let bot = BotKind::from(cli.bot).build(cli.seed);
            let mut watch_mode = WatchMode::new(config, bot, cli.seed, tick_interval)?;
            watch_mode.run().await?;
        }
        Mode::Eval => {
            // Only headless runs log; the TUI owns the terminal otherwise
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();

            let eval_config = EvalConfig {
                episodes: cli.episodes,
                bot: cli.bot.into(),
                seed: cli.seed,
                json: cli.json,
                show_board: cli.show_board,
            };
            let mut eval_mode = EvalMode::new(config, eval_config)?;
            eval_mode.run(&mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
