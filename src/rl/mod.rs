//! Deep Q-learning for the Snake game
//!
//! Provides:
//! - 11-feature danger/direction/food observations
//! - Bounded experience replay with uniform sampling
//! - Two-layer Q-network with an Adam trainer (Bellman targets)
//! - Epsilon-greedy DQN agent
//! - Model persistence via Burn's Record system

pub mod agent;
pub mod backend;
pub mod config;
pub mod environment;
pub mod memory;
pub mod network;
pub mod observation;
pub mod persistence;
pub mod trainer;

pub use agent::{DqnAgent, EpisodeSummary};
pub use backend::{default_device, TrainingBackend};
pub use config::AgentConfig;
pub use environment::{SnakeEnvironment, StepOutcome};
pub use memory::{ReplayMemory, Transition};
pub use network::{QNetwork, QNetworkConfig};
pub use observation::{extract, Observation, OBSERVATION_DIM};
pub use persistence::{load_network, save_model, ModelMetadata};
pub use trainer::{NextValueEstimator, OnlineNetwork, QTrainer};
