//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the DQN agent and trainer
///
/// Defaults are the reference constants. Passed explicitly into the agent
/// constructor so independent training runs can coexist in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate for the Adam optimizer
    ///
    /// Default: 1e-3
    pub learning_rate: f64,

    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.9
    pub gamma: f32,

    /// Base of the linear epsilon schedule
    ///
    /// Exploration probability is `max(0, epsilon_base - games_played)` out
    /// of `exploration_draw_range`, so exploration decays to zero after
    /// `epsilon_base` completed episodes.
    ///
    /// Default: 80
    pub epsilon_base: u32,

    /// Denominator of the epsilon schedule: the uniform exploration draw is
    /// taken from `[0, exploration_draw_range)`
    ///
    /// Default: 200
    pub exploration_draw_range: u32,

    /// Maximum number of transitions kept for experience replay
    ///
    /// Default: 100_000
    pub memory_capacity: usize,

    /// Number of transitions sampled for the batched end-of-episode update
    ///
    /// Default: 1000
    pub batch_size: usize,

    /// Hidden layer width of the Q-network
    ///
    /// Default: 256
    pub hidden_dim: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            gamma: 0.9,
            epsilon_base: 80,
            exploration_draw_range: 200,
            memory_capacity: 100_000,
            batch_size: 1000,
            hidden_dim: 256,
        }
    }
}

impl AgentConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in (0, 1), got {}", self.gamma));
        }

        if self.exploration_draw_range == 0 {
            return Err("exploration_draw_range must be at least 1".to_string());
        }

        if self.epsilon_base > self.exploration_draw_range {
            return Err(format!(
                "epsilon_base ({}) cannot exceed exploration_draw_range ({})",
                self.epsilon_base, self.exploration_draw_range
            ));
        }

        if self.memory_capacity == 0 {
            return Err("memory_capacity must be at least 1".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }

        if self.hidden_dim == 0 {
            return Err("hidden_dim must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate, 1e-3);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.epsilon_base, 80);
        assert_eq!(config.exploration_draw_range, 200);
        assert_eq!(config.memory_capacity, 100_000);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.hidden_dim, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_gamma() {
        let mut config = AgentConfig::default();
        config.gamma = 1.0;
        assert!(config.validate().is_err());

        config.gamma = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_learning_rate() {
        let mut config = AgentConfig::default();
        config.learning_rate = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_epsilon_above_range() {
        let mut config = AgentConfig::default();
        config.epsilon_base = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_sizes() {
        let mut config = AgentConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = AgentConfig::default();
        config.memory_capacity = 0;
        assert!(config.validate().is_err());
    }
}
