use anyhow::{anyhow, Result};
use clap::Parser;
use snake_dqn::game::GameConfig;
use snake_dqn::modes::{TrainConfig, TrainMode};
use snake_dqn::rl::{default_device, TrainingBackend};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake-dqn")]
#[command(version, about = "Train a DQN agent to play Snake")]
struct Cli {
    /// Number of episodes to train
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Grid width in cells
    #[arg(long, default_value = "32")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "24")]
    height: usize,

    /// Seed for game and exploration RNGs (random when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to save the trained model
    #[arg(long, default_value = "models/snake_dqn.mpk")]
    save_path: PathBuf,

    /// Log training progress every N episodes
    #[arg(long, default_value = "50")]
    log_frequency: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let game_config = GameConfig::new(cli.width, cli.height);
    game_config
        .validate()
        .map_err(|msg| anyhow!("invalid game configuration: {msg}"))?;

    let mut config = TrainConfig::new(cli.episodes, cli.save_path);
    config.game_config = game_config;
    config.seed = cli.seed;
    config.log_frequency = cli.log_frequency.max(1);

    let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device());
    train_mode.run()
}
