//! RL view of the snake game
//!
//! Wraps the game engine and its state behind the reset/step interface the
//! training loop drives, translating raw game state into observations.

use super::observation::{self, Observation};
use crate::game::{GameConfig, GameEngine, GameState, TurnAction};
use rand::rngs::StdRng;

/// Result of advancing the environment by one action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Reward emitted by the game rules for this step
    pub reward: f32,
    /// Whether the episode has ended
    pub done: bool,
    /// Score after the step
    pub score: u32,
}

/// Episodic environment pairing a game engine with its current state
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
}

impl SnakeEnvironment {
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        let mut engine = GameEngine::new(config, rng);
        let state = engine.reset();
        Self { engine, state }
    }

    /// Create an environment with a deterministic food-placement seed
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        let mut engine = GameEngine::seeded(config, seed);
        let state = engine.reset();
        Self { engine, state }
    }

    /// Start a fresh episode and return its initial observation
    pub fn reset(&mut self) -> Observation {
        self.state = self.engine.reset();
        observation::extract(&self.state)
    }

    /// Advance the game by one action
    pub fn step(&mut self, action: TurnAction) -> StepOutcome {
        let result = self.engine.step(&mut self.state, action);
        StepOutcome {
            reward: result.reward,
            done: result.terminated,
            score: result.score,
        }
    }

    /// Observation of the current state
    pub fn observation(&self) -> Observation {
        observation::extract(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::observation::OBSERVATION_DIM;

    fn test_env() -> SnakeEnvironment {
        SnakeEnvironment::seeded(GameConfig::default(), 7)
    }

    #[test]
    fn test_reset_returns_initial_observation() {
        let mut env = test_env();
        let obs = env.reset();

        assert_eq!(obs.len(), OBSERVATION_DIM);
        assert!(env.state().is_alive);
        assert_eq!(env.state().score, 0);
    }

    #[test]
    fn test_step_advances_state() {
        let mut env = test_env();
        env.reset();
        let steps_before = env.state().steps;

        let outcome = env.step(TurnAction::Straight);

        assert_eq!(env.state().steps, steps_before + 1);
        assert!(outcome.reward.is_finite());
    }

    #[test]
    fn test_observation_matches_state() {
        let mut env = test_env();
        env.reset();

        let obs = env.observation();
        assert_eq!(obs, observation::extract(env.state()));
    }

    #[test]
    fn test_driving_into_wall_terminates() {
        let mut env = test_env();
        env.reset();

        let mut last = StepOutcome {
            reward: 0.0,
            done: false,
            score: 0,
        };
        for _ in 0..env.config().grid_width {
            last = env.step(TurnAction::Straight);
            if last.done {
                break;
            }
        }

        assert!(last.done);
        assert!(!env.state().is_alive);
    }

    #[test]
    fn test_reset_after_termination_starts_fresh() {
        let mut env = test_env();
        env.reset();

        for _ in 0..env.config().grid_width {
            if env.step(TurnAction::Straight).done {
                break;
            }
        }

        env.reset();
        assert!(env.state().is_alive);
        assert_eq!(env.state().steps, 0);
    }
}
