//! Model persistence for saving and loading trained agents
//!
//! Serializes the Q-network weights through Burn's Record system, with a
//! JSON metadata sidecar carrying the hyperparameters and training progress
//! needed to reconstruct the network on load.

use super::{AgentConfig, DqnAgent, QNetwork, QNetworkConfig};
use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Metadata saved alongside the network weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Agent configuration used during training
    pub agent_config: AgentConfig,

    /// Grid width in cells
    pub grid_width: usize,

    /// Grid height in cells
    pub grid_height: usize,

    /// Number of episodes completed
    pub games_played: u32,

    /// Best score reached so far
    pub record_score: u32,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    pub fn new(
        agent_config: AgentConfig,
        grid_width: usize,
        grid_height: usize,
        games_played: u32,
        record_score: u32,
    ) -> Self {
        Self {
            agent_config,
            grid_width,
            grid_height,
            games_played,
            record_score,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Save a trained agent's Q-network to a file
///
/// The model is saved in two files:
/// - `<path>` - Network weights (Burn record format)
/// - `<path>.meta.json` - Metadata as JSON
///
/// Creates parent directories if they don't exist.
pub fn save_model<B: AutodiffBackend>(
    agent: &DqnAgent<B>,
    grid_width: usize,
    grid_height: usize,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let record = agent.network().clone().into_record();
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(record, path.to_path_buf())
        .context("Failed to save network weights")?;

    let metadata = ModelMetadata::new(
        agent.config().clone(),
        grid_width,
        grid_height,
        agent.games_played(),
        agent.record_score(),
    );

    let meta_path = path.with_extension("meta.json");
    let meta_json =
        serde_json::to_string_pretty(&metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Load a trained Q-network from a file
///
/// Reads the metadata sidecar first to recover the network shape, then loads
/// the weights into a freshly initialized network.
pub fn load_network<B: AutodiffBackend>(
    path: &Path,
    device: &B::Device,
) -> Result<(QNetwork<B>, ModelMetadata)> {
    let meta_path = path.with_extension("meta.json");
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: ModelMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    let network = QNetworkConfig::new(metadata.agent_config.hidden_dim).init::<B>(device);

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    Ok((network.load_record(record), metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{default_device, TrainingBackend};
    use burn::tensor::{Tensor, TensorData};
    use tempfile::TempDir;

    #[test]
    fn test_metadata_creation() {
        let metadata = ModelMetadata::new(AgentConfig::default(), 32, 24, 120, 17);

        assert_eq!(metadata.grid_width, 32);
        assert_eq!(metadata.grid_height, 24);
        assert_eq!(metadata.games_played, 120);
        assert_eq!(metadata.record_score, 17);
        assert!(!metadata.version.is_empty());
    }

    #[test]
    fn test_metadata_serialization() {
        let metadata = ModelMetadata::new(AgentConfig::default(), 10, 10, 5, 2);

        let json = serde_json::to_string(&metadata).unwrap();
        let deserialized: ModelMetadata = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.grid_width, 10);
        assert_eq!(deserialized.games_played, 5);
        assert_eq!(deserialized.record_score, 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let device = default_device();
        let config = AgentConfig {
            hidden_dim: 16,
            ..Default::default()
        };
        let agent = DqnAgent::<TrainingBackend>::seeded(config, device, 3);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.mpk");

        save_model(&agent, 32, 24, &path).unwrap();

        let (loaded, metadata) = load_network::<TrainingBackend>(&path, &device).unwrap();
        assert_eq!(metadata.agent_config.hidden_dim, 16);
        assert_eq!(metadata.games_played, 0);

        // Loaded weights must reproduce the saved network's outputs
        let input = Tensor::<TrainingBackend, 2>::from_data(
            TensorData::new(vec![1.0f32; 11], [1, 11]),
            &device,
        );
        let original = agent.network().forward(input.clone()).into_data();
        let reloaded = loaded.forward(input).into_data();
        assert_eq!(
            original.as_slice::<f32>().unwrap(),
            reloaded.as_slice::<f32>().unwrap()
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let device = default_device();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.mpk");

        assert!(load_network::<TrainingBackend>(&path, &device).is_err());
    }
}
