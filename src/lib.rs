//! Snake DQN - deep Q-learning on a grid-based Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - DQN training infrastructure (rl module)
//! - Training statistics (metrics module)
//! - The training execution mode (modes module)

pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
