//! Backend type aliases and device management
//!
//! The NdArray backend is sufficient for this environment: the observation
//! is an 11-element vector and the network is two linear layers, so CPU
//! training keeps up with the simulation comfortably.

use burn::backend::{
    ndarray::{NdArray, NdArrayDevice},
    Autodiff,
};

/// Backend type for training (with autodiff)
///
/// Inference on the greedy path runs on `B::InnerBackend` via
/// `AutodiffModule::valid`, so no separate inference alias is needed.
pub type TrainingBackend = Autodiff<NdArray<f32>>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_device() {
        let device = default_device();
        let _device_copy = device.clone();
    }
}
