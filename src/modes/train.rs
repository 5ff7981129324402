//! Training mode for the DQN agent
//!
//! This module implements the training loop: run episodes in the Snake
//! environment, feed every transition to the agent for the fast update,
//! run the batched replay update at episode end, and save the model
//! whenever a new record score is reached.
//!
//! # Example
//!
//! ```rust,ignore
//! use snake_dqn::modes::{TrainMode, TrainConfig};
//! use snake_dqn::rl::{default_device, TrainingBackend};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(1000, PathBuf::from("models/snake_dqn.mpk"));
//! let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device());
//! train_mode.run()?;
//! ```

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use crate::game::{GameConfig, GameState};
use crate::metrics::TrainingStats;
use crate::rl::{save_model, AgentConfig, DqnAgent, SnakeEnvironment, Transition};

/// Observer of the live game state during training
///
/// Called after every environment step, e.g. to drive an external viewer.
/// Publish errors are reported but never abort training.
pub trait StateSink {
    fn publish(&mut self, state: &GameState) -> Result<()>;
}

/// Default sink: discard the state
pub struct NullSink;

impl StateSink for NullSink {
    fn publish(&mut self, _state: &GameState) -> Result<()> {
        Ok(())
    }
}

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Path to save the model (written on every new record and at the end)
    pub save_path: PathBuf,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Seed for game and exploration RNGs; random when absent
    pub seed: Option<u64>,

    /// Game configuration (grid size, rewards)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub agent_config: AgentConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    pub fn new(num_episodes: usize, save_path: PathBuf) -> Self {
        Self {
            num_episodes,
            save_path,
            log_frequency: 50,
            seed: None,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
        }
    }
}

/// Training mode for the DQN agent
///
/// Runs the training loop, logging progress periodically and checkpointing
/// on record scores.
pub struct TrainMode<B: AutodiffBackend> {
    agent: DqnAgent<B>,
    env: SnakeEnvironment,
    stats: TrainingStats,
    config: TrainConfig,
    sink: Box<dyn StateSink>,
}

impl<B: AutodiffBackend> TrainMode<B> {
    /// Create a new training mode
    pub fn new(config: TrainConfig, device: B::Device) -> Self {
        Self::with_sink(config, device, Box::new(NullSink))
    }

    /// Create a training mode that publishes each step's state to a sink
    pub fn with_sink(config: TrainConfig, device: B::Device, sink: Box<dyn StateSink>) -> Self {
        let (agent_rng, env_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };

        let agent = DqnAgent::new(config.agent_config.clone(), device, agent_rng);
        let env = SnakeEnvironment::new(config.game_config.clone(), env_rng);

        // 100-episode rolling window for smoothed statistics
        let stats = TrainingStats::new(100);

        Self {
            agent,
            env,
            stats,
            config,
            sink,
        }
    }

    /// Run the training loop
    ///
    /// Trains the agent for the configured number of episodes. The model is
    /// saved whenever a new record score is reached (failures there are
    /// reported and ignored) and once more at the end (failure is fatal).
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.num_episodes {
            let (episode_reward, episode_steps, episode_score) = self.run_episode();
            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);

            let summary = self.agent.end_episode(episode_score);
            self.stats.record_replay_loss(summary.replay_loss);

            if summary.new_record {
                // A failed checkpoint must not end a long training run
                if let Err(err) = self.save_model() {
                    eprintln!("Warning: failed to save record model: {err:#}");
                } else {
                    println!(
                        "  New record: {} (game {})",
                        episode_score, summary.games_played
                    );
                }
            }

            if (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }
        }

        self.save_model()
            .with_context(|| format!("Failed to save final model to {:?}", self.config.save_path))?;

        println!("\nTraining complete!");
        println!("Final model saved to: {:?}", self.config.save_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run a single training episode
    ///
    /// Returns the total reward, number of steps, and final score.
    fn run_episode(&mut self) -> (f32, u32, u32) {
        let mut obs = self.env.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let action = self.agent.select_action(&obs);
            let outcome = self.env.step(action);
            let next_obs = self.env.observation();

            let loss = self.agent.observe_transition(Transition {
                state: obs,
                action: action.one_hot(),
                reward: outcome.reward,
                next_state: next_obs,
                done: outcome.done,
            });
            self.stats.record_step_loss(loss);

            if let Err(err) = self.sink.publish(self.env.state()) {
                eprintln!("Warning: state sink failed: {err:#}");
            }

            episode_reward += outcome.reward;
            episode_steps += 1;
            obs = next_obs;

            if outcome.done {
                return (episode_reward, episode_steps, outcome.score);
            }
        }
    }

    fn save_model(&self) -> Result<()> {
        save_model(
            &self.agent,
            self.config.game_config.grid_width,
            self.config.game_config.grid_height,
            &self.config.save_path,
        )
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("DQN Training - Snake");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Game Config: {}x{} grid",
            self.config.game_config.grid_width, self.config.game_config.grid_height
        );
        println!("Agent Config:");
        println!("  Learning rate: {}", self.config.agent_config.learning_rate);
        println!("  Gamma: {}", self.config.agent_config.gamma);
        println!(
            "  Epsilon: {}/{} decaying per game",
            self.config.agent_config.epsilon_base,
            self.config.agent_config.exploration_draw_range
        );
        println!(
            "  Replay memory: {} transitions",
            self.config.agent_config.memory_capacity
        );
        println!("  Batch size: {}", self.config.agent_config.batch_size);
        println!("  Hidden width: {}", self.config.agent_config.hidden_dim);
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary()
        );
    }
}
