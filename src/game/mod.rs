//! Core game logic for Snake
//!
//! Deterministic, frame-stepped simulation with no I/O or rendering
//! dependencies. Used directly by the RL training loop.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, TurnAction, ACTION_DIM};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use state::{GameState, Position, Snake};
