pub mod train;

pub use train::{StateSink, TrainConfig, TrainMode};
