use serde::{Deserialize, Serialize};

/// Configuration for the game simulation
///
/// All reward constants default to the reference values; they are explicit
/// fields rather than module-level globals so independent training runs can
/// use different settings in one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Episode ends when steps exceed this multiple of the snake length
    pub frame_cap_per_segment: u32,

    // Rewards
    /// Reward for eating food
    pub food_reward: f32,
    /// Penalty for each step (discourages indefinite wandering)
    pub step_penalty: f32,
    /// Penalty for dying or timing out
    pub death_penalty: f32,

    // Shaping, applied only on non-terminal non-food steps
    /// Bonus when the Manhattan distance to food is below the threshold
    pub proximity_bonus: f32,
    /// Manhattan distance (in cells) under which the proximity bonus applies
    pub proximity_threshold: i32,
    /// Penalty when the head sits on the boundary ring of the grid
    pub wall_penalty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        // 32x24 cells is the reference 640x480 board at 20-unit cells
        Self {
            grid_width: 32,
            grid_height: 24,
            initial_snake_length: 3,
            frame_cap_per_segment: 100,
            food_reward: 10.0,
            step_penalty: -0.1,
            death_penalty: -10.0,
            proximity_bonus: 5.0,
            proximity_threshold: 5,
            wall_penalty: -2.0,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < 4 || self.grid_height < 4 {
            return Err(format!(
                "grid must be at least 4x4, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length < 3 {
            return Err(format!(
                "initial_snake_length must be at least 3, got {}",
                self.initial_snake_length
            ));
        }

        if self.initial_snake_length > self.grid_width / 2 + 1 {
            return Err(format!(
                "initial_snake_length ({}) does not fit the grid width ({})",
                self.initial_snake_length, self.grid_width
            ));
        }

        if self.frame_cap_per_segment == 0 {
            return Err("frame_cap_per_segment must be at least 1".to_string());
        }

        if self.proximity_threshold < 0 {
            return Err(format!(
                "proximity_threshold must be non-negative, got {}",
                self.proximity_threshold
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 24);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.food_reward, 10.0);
        assert_eq!(config.death_penalty, -10.0);
        assert_eq!(config.step_penalty, -0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_tiny_grid() {
        let config = GameConfig::new(3, 3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_short_snake() {
        let mut config = GameConfig::default();
        config.initial_snake_length = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_snake() {
        let mut config = GameConfig::small();
        config.initial_snake_length = 8;
        assert!(config.validate().is_err());
    }
}
