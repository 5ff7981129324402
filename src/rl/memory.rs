//! Experience replay memory
//!
//! Bounded, age-ordered buffer of transitions with uniform random batch
//! sampling. Storing past transitions and training on random batches of
//! them decorrelates updates from strict temporal order.

use super::observation::Observation;
use crate::game::ACTION_DIM;
use rand::rngs::StdRng;
use std::collections::VecDeque;

/// A single recorded step, immutable once stored
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Observation,
    pub action: [f32; ACTION_DIM],
    pub reward: f32,
    pub next_state: Observation,
    pub done: bool,
}

/// Bounded FIFO buffer of transitions
///
/// On overflow the oldest transition is evicted. Sampling never mutates the
/// buffer and never biases toward recency beyond that eviction.
pub struct ReplayMemory {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    /// Create a replay memory holding at most `capacity` transitions
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest entry at capacity
    pub fn record(&mut self, transition: Transition) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Sample a batch of transitions
    ///
    /// Returns every stored transition when the buffer holds at most
    /// `batch_size` entries; otherwise a uniform sample of exactly
    /// `batch_size` entries without replacement.
    pub fn sample(&self, batch_size: usize, rng: &mut StdRng) -> Vec<Transition> {
        if self.buffer.len() <= batch_size {
            return self.buffer.iter().cloned().collect();
        }

        rand::seq::index::sample(rng, self.buffer.len(), batch_size)
            .iter()
            .map(|i| self.buffer[i].clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn transition(reward: f32) -> Transition {
        Transition {
            state: [0.0; 11],
            action: [1.0, 0.0, 0.0],
            reward,
            next_state: [0.0; 11],
            done: false,
        }
    }

    #[test]
    fn test_record_and_len() {
        let mut memory = ReplayMemory::new(10);
        assert!(memory.is_empty());

        memory.record(transition(1.0));
        memory.record(transition(2.0));

        assert_eq!(memory.len(), 2);
        assert!(!memory.is_empty());
    }

    #[test]
    fn test_capacity_evicts_oldest_in_order() {
        let mut memory = ReplayMemory::new(5);

        for i in 0..6 {
            memory.record(transition(i as f32));
        }

        // Capacity never exceeded; the oldest entry is gone and the newest
        // five remain in original relative order
        assert_eq!(memory.len(), 5);
        let rewards: Vec<f32> = memory.buffer.iter().map(|t| t.reward).collect();
        assert_eq!(rewards, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_sample_returns_everything_when_small() {
        let mut memory = ReplayMemory::new(100);
        for i in 0..4 {
            memory.record(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(0);
        let batch = memory.sample(10, &mut rng);

        assert_eq!(batch.len(), 4);
        let mut rewards: Vec<f32> = batch.iter().map(|t| t.reward).collect();
        rewards.sort_by(f32::total_cmp);
        assert_eq!(rewards, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sample_exact_batch_without_replacement() {
        let mut memory = ReplayMemory::new(100);
        for i in 0..50 {
            memory.record(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(1);
        let batch = memory.sample(20, &mut rng);

        assert_eq!(batch.len(), 20);
        let mut rewards: Vec<f32> = batch.iter().map(|t| t.reward).collect();
        rewards.sort_by(f32::total_cmp);
        rewards.dedup();
        assert_eq!(rewards.len(), 20);
    }

    #[test]
    fn test_sample_does_not_mutate_buffer() {
        let mut memory = ReplayMemory::new(100);
        for i in 0..30 {
            memory.record(transition(i as f32));
        }

        let mut rng = StdRng::seed_from_u64(2);
        let before: Vec<f32> = memory.buffer.iter().map(|t| t.reward).collect();
        memory.sample(10, &mut rng);
        let after: Vec<f32> = memory.buffer.iter().map(|t| t.reward).collect();

        assert_eq!(before, after);
    }
}
