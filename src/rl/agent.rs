//! DQN agent
//!
//! Epsilon-greedy action selection over the Q-network plus orchestration of
//! the per-step and per-episode learning calls. Exploration decays linearly
//! with the number of completed games.

use super::{
    config::AgentConfig,
    memory::{ReplayMemory, Transition},
    network::{QNetwork, QNetworkConfig},
    observation::{Observation, OBSERVATION_DIM},
    trainer::QTrainer,
};
use crate::game::{TurnAction, ACTION_DIM};
use burn::tensor::{backend::AutodiffBackend, Tensor, TensorData};
use burn::module::AutodiffModule;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Outcome of finishing an episode
#[derive(Debug, Clone, Copy)]
pub struct EpisodeSummary {
    /// Games played so far, including this one
    pub games_played: u32,
    /// Loss of the batched replay update (0.0 when memory was empty)
    pub replay_loss: f32,
    /// Whether this episode's score set a new record
    pub new_record: bool,
}

/// Q-learning agent with epsilon-greedy policy and experience replay
///
/// Owns the replay memory and the exploration RNG. The network's parameters
/// are mutated only through the trainer's update step.
pub struct DqnAgent<B: AutodiffBackend> {
    network: QNetwork<B>,
    trainer: QTrainer<B>,
    memory: ReplayMemory,
    config: AgentConfig,
    games_played: u32,
    record_score: u32,
    rng: StdRng,
    device: B::Device,
}

impl<B: AutodiffBackend> DqnAgent<B> {
    /// Create a new agent with the given configuration and exploration RNG
    pub fn new(config: AgentConfig, device: B::Device, rng: StdRng) -> Self {
        config.validate().expect("invalid agent configuration");

        let network = QNetworkConfig::new(config.hidden_dim).init(&device);
        let trainer = QTrainer::new(&config, device.clone());
        let memory = ReplayMemory::new(config.memory_capacity);

        Self {
            network,
            trainer,
            memory,
            config,
            games_played: 0,
            record_score: 0,
            rng,
            device,
        }
    }

    /// Create an agent with a deterministic exploration seed
    pub fn seeded(config: AgentConfig, device: B::Device, seed: u64) -> Self {
        Self::new(config, device, StdRng::seed_from_u64(seed))
    }

    /// Current integer-valued epsilon: `max(0, E0 - games_played)`
    pub fn epsilon(&self) -> u32 {
        self.config.epsilon_base.saturating_sub(self.games_played)
    }

    /// Select an action for the given observation
    ///
    /// With probability epsilon (out of the configured draw range) a uniform
    /// random action is explored; otherwise the arg-max of the Q-network's
    /// value estimates is exploited, ties broken by the first index.
    pub fn select_action(&mut self, observation: &Observation) -> TurnAction {
        let draw = self.rng.gen_range(0..self.config.exploration_draw_range);
        if draw < self.epsilon() {
            TurnAction::ALL[self.rng.gen_range(0..ACTION_DIM)]
        } else {
            self.greedy_action(observation)
        }
    }

    /// Arg-max action under the current value estimates
    fn greedy_action(&self, observation: &Observation) -> TurnAction {
        let input = Tensor::<B::InnerBackend, 2>::from_data(
            TensorData::new(observation.to_vec(), [1, OBSERVATION_DIM]),
            &self.device,
        );

        let q_values: Vec<f32> = self
            .network
            .clone()
            .valid()
            .forward(input)
            .into_data()
            .to_vec()
            .expect("q-values are f32");

        let mut best = 0;
        for i in 1..ACTION_DIM {
            if q_values[i] > q_values[best] {
                best = i;
            }
        }
        TurnAction::ALL[best]
    }

    /// Record a transition and run the fast single-transition update
    ///
    /// Returns the training loss for diagnostics.
    pub fn observe_transition(&mut self, transition: Transition) -> f32 {
        self.memory.record(transition.clone());

        let (network, loss) = self
            .trainer
            .train_step(self.network.clone(), std::slice::from_ref(&transition));
        self.network = network;
        loss
    }

    /// Close out an episode: batched replay update and record bookkeeping
    ///
    /// The caller is responsible for invoking the persistence collaborator
    /// when `new_record` is set; its failure must not abort training.
    pub fn end_episode(&mut self, score: u32) -> EpisodeSummary {
        self.games_played += 1;

        let batch = self.memory.sample(self.config.batch_size, &mut self.rng);
        let (network, replay_loss) = self.trainer.train_step(self.network.clone(), &batch);
        self.network = network;

        let new_record = score > self.record_score;
        if new_record {
            self.record_score = score;
        }

        EpisodeSummary {
            games_played: self.games_played,
            replay_loss,
            new_record,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn record_score(&self) -> u32 {
        self.record_score
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Borrow the Q-network, e.g. for persistence
    pub fn network(&self) -> &QNetwork<B> {
        &self.network
    }

    /// Replace the Q-network, e.g. after loading a checkpoint
    pub fn set_network(&mut self, network: QNetwork<B>) {
        self.network = network;
    }
}
