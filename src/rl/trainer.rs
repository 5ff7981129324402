//! Q-learning trainer
//!
//! Computes Bellman targets and performs one Adam gradient step per call
//! against the Q-network. The same entry point serves both the fast
//! single-transition update after every move and the batched replay update
//! at episode end.

use super::{
    config::AgentConfig,
    memory::Transition,
    network::QNetwork,
    observation::{Observation, OBSERVATION_DIM},
};
use crate::game::ACTION_DIM;
use burn::{
    module::AutodiffModule,
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    tensor::{backend::AutodiffBackend, ElementConversion, Tensor, TensorData},
};

/// Source of the `max_a Q(s', a)` term in the Bellman target
///
/// The default estimator reads the online network's own current parameters
/// (no separate target network). A target-network variant can be swapped in
/// here without touching the engine or the agent.
pub trait NextValueEstimator<B: AutodiffBackend> {
    /// Best next-state value estimate for each transition in the batch
    fn max_next_q(
        &self,
        online: &QNetwork<B>,
        next_states: &[Observation],
        device: &B::Device,
    ) -> Vec<f32>;
}

/// Default estimator: bootstrap from the online network itself
#[derive(Debug, Default)]
pub struct OnlineNetwork;

impl<B: AutodiffBackend> NextValueEstimator<B> for OnlineNetwork {
    fn max_next_q(
        &self,
        online: &QNetwork<B>,
        next_states: &[Observation],
        device: &B::Device,
    ) -> Vec<f32> {
        let n = next_states.len();
        let flat: Vec<f32> = next_states.iter().flatten().copied().collect();

        let network = online.clone().valid();
        let input = Tensor::<B::InnerBackend, 2>::from_data(
            TensorData::new(flat, [n, OBSERVATION_DIM]),
            device,
        );

        network
            .forward(input)
            .max_dim(1)
            .into_data()
            .to_vec()
            .expect("max q-values are f32")
    }
}

/// Gradient-based trainer for the Q-network
///
/// Owns the optimizer state; the network itself passes through `train_step`
/// by value, so nothing else can observe parameters mid-update.
pub struct QTrainer<B: AutodiffBackend> {
    optim: OptimizerAdaptor<Adam<B::InnerBackend>, QNetwork<B>, B>,
    learning_rate: f64,
    gamma: f32,
    estimator: Box<dyn NextValueEstimator<B>>,
    device: B::Device,
}

impl<B: AutodiffBackend> QTrainer<B> {
    /// Create a trainer with the default online-network value estimator
    pub fn new(config: &AgentConfig, device: B::Device) -> Self {
        Self::with_estimator(config, device, Box::new(OnlineNetwork))
    }

    /// Create a trainer with a custom next-state value estimator
    pub fn with_estimator(
        config: &AgentConfig,
        device: B::Device,
        estimator: Box<dyn NextValueEstimator<B>>,
    ) -> Self {
        Self {
            optim: AdamConfig::new().init(),
            learning_rate: config.learning_rate,
            gamma: config.gamma,
            estimator,
            device,
        }
    }

    /// Perform one gradient step toward the Bellman targets
    ///
    /// For each transition the target replaces only the taken action's slot:
    /// `reward` when the transition is terminal, otherwise
    /// `reward + gamma * max_a Q(next_state, a)`. Every other slot is held
    /// at its current prediction, making the loss a masked MSE regression.
    pub fn train_step(
        &mut self,
        network: QNetwork<B>,
        batch: &[Transition],
    ) -> (QNetwork<B>, f32) {
        if batch.is_empty() {
            return (network, 0.0);
        }

        let n = batch.len();

        let states_flat: Vec<f32> = batch.iter().flat_map(|t| t.state).collect();
        let next_states: Vec<Observation> = batch.iter().map(|t| t.next_state).collect();

        // Constant targets are assembled from a no-grad forward at the
        // current parameters, so non-taken slots contribute zero gradient
        let current_q: Vec<f32> = network
            .clone()
            .valid()
            .forward(Tensor::<B::InnerBackend, 2>::from_data(
                TensorData::new(states_flat.clone(), [n, OBSERVATION_DIM]),
                &self.device,
            ))
            .into_data()
            .to_vec()
            .expect("q-values are f32");

        let next_max = self
            .estimator
            .max_next_q(&network, &next_states, &self.device);

        let mut targets = current_q;
        for (i, transition) in batch.iter().enumerate() {
            let q_new = if transition.done {
                transition.reward
            } else {
                transition.reward + self.gamma * next_max[i]
            };
            let taken = transition
                .action
                .iter()
                .position(|&v| v == 1.0)
                .expect("transition action is one-hot");
            targets[i * ACTION_DIM + taken] = q_new;
        }

        let states = Tensor::<B, 2>::from_data(
            TensorData::new(states_flat, [n, OBSERVATION_DIM]),
            &self.device,
        );
        let target_tensor = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [n, ACTION_DIM]),
            &self.device,
        );

        let predictions = network.forward(states);
        let diff = predictions - target_tensor;
        let loss = (diff.clone() * diff).mean();

        let loss_value = loss.clone().into_scalar().elem::<f32>();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &network);
        let network = self.optim.step(self.learning_rate, network, grads);

        (network, loss_value)
    }
}
