//! Q-value network
//!
//! A small feed-forward function approximator mapping the 11-dimensional
//! observation to one value estimate per action:
//!
//! ```text
//! Input: [batch, 11]
//!   ↓ Linear(11 → 256) + ReLU
//!   ↓ Linear(256 → 3)
//! Output: [batch, 3] Q-values over {straight, right, left}
//! ```
//!
//! Deterministic given fixed parameters and input; differentiable with
//! respect to parameters on an autodiff backend.

use crate::game::ACTION_DIM;
use crate::rl::observation::OBSERVATION_DIM;
use burn::{
    module::Module,
    nn::{Linear, LinearConfig},
    tensor::{activation::relu, backend::Backend, Tensor},
};

/// Configuration for the Q-network
#[derive(Debug, Clone)]
pub struct QNetworkConfig {
    /// Number of input features
    pub input_dim: usize,
    /// Hidden layer width
    pub hidden_dim: usize,
    /// Number of actions scored
    pub output_dim: usize,
}

impl QNetworkConfig {
    /// Create a configuration with the given hidden width
    pub fn new(hidden_dim: usize) -> Self {
        Self {
            input_dim: OBSERVATION_DIM,
            hidden_dim,
            output_dim: ACTION_DIM,
        }
    }

    /// Initialize the network from this configuration
    pub fn init<B: Backend>(&self, device: &B::Device) -> QNetwork<B> {
        QNetwork {
            linear1: LinearConfig::new(self.input_dim, self.hidden_dim).init(device),
            linear2: LinearConfig::new(self.hidden_dim, self.output_dim).init(device),
        }
    }
}

impl Default for QNetworkConfig {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Two-layer feed-forward Q-value approximator
///
/// Parameters are owned exclusively here; only the trainer's update step
/// mutates them (by consuming and returning the module).
#[derive(Module, Debug)]
pub struct QNetwork<B: Backend> {
    linear1: Linear<B>,
    linear2: Linear<B>,
}

impl<B: Backend> QNetwork<B> {
    /// Forward pass: `[batch, 11]` observations to `[batch, 3]` Q-values
    pub fn forward(&self, observations: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.linear1.forward(observations);
        let x = relu(x);
        self.linear2.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::backend::Autodiff;
    use burn::tensor::TensorData;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_forward_pass_shape() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        let input = Tensor::zeros([2, OBSERVATION_DIM], &device);
        let output = network.forward(input);

        assert_eq!(output.dims(), [2, ACTION_DIM]);
    }

    #[test]
    fn test_forward_is_deterministic() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        let input = Tensor::ones([1, OBSERVATION_DIM], &device);
        let a = network.forward(input.clone()).into_data();
        let b = network.forward(input).into_data();

        assert_eq!(
            a.as_slice::<f32>().unwrap(),
            b.as_slice::<f32>().unwrap()
        );
    }

    #[test]
    fn test_output_finite() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestBackend>(&device);

        let input = Tensor::ones([4, OBSERVATION_DIM], &device);
        let output: TensorData = network.forward(input).into_data();

        for &v in output.as_slice::<f32>().unwrap() {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_gradient_flow() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::default().init::<TestAutodiffBackend>(&device);

        let input = Tensor::ones([1, OBSERVATION_DIM], &device).require_grad();
        let output = network.forward(input.clone());
        let loss = output.sum();
        let grads = loss.backward();

        let input_grad = input.grad(&grads);
        assert!(input_grad.is_some(), "gradients should flow back to input");
    }

    #[test]
    fn test_custom_hidden_width() {
        let device = NdArrayDevice::default();
        let network = QNetworkConfig::new(32).init::<TestBackend>(&device);

        let input = Tensor::zeros([1, OBSERVATION_DIM], &device);
        assert_eq!(network.forward(input).dims(), [1, ACTION_DIM]);
    }
}
