//! Training statistics tracking for DQN
//!
//! This module provides utilities for tracking and monitoring training
//! progress, including episode rewards, lengths, scores, and loss values.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// Tracks episode-level metrics (rewards, lengths, scores) and training-level
/// metrics (per-step loss, end-of-episode replay loss) using rolling windows
/// for smoothed statistics. Also keeps the all-time mean score and the record
/// score, which never leave the window.
///
/// # Example
///
/// ```rust
/// use snake_dqn::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// // Record an episode
/// stats.record_episode(15.5, 150, 5);
///
/// // Record a replay update
/// stats.record_replay_loss(0.02);
///
/// // Get statistics
/// println!("Mean reward: {}", stats.mean_episode_reward());
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<u32>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Per-step training losses (rolling window)
    step_losses: VecDeque<f32>,

    /// End-of-episode replay losses (rolling window)
    replay_losses: VecDeque<f32>,

    /// Total number of episodes completed
    total_episodes: u32,

    /// Total number of environment steps taken
    total_steps: u64,

    /// Sum of all episode scores, for the all-time mean
    total_score: u64,

    /// Best score seen so far
    record_score: u32,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent values to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            step_losses: VecDeque::with_capacity(window_size),
            replay_losses: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            total_score: 0,
            record_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// # Arguments
    ///
    /// * `reward` - Total reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `score` - Final score (food items eaten)
    pub fn record_episode(&mut self, reward: f32, length: u32, score: u32) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += u64::from(length);
        self.total_score += u64::from(score);
        if score > self.record_score {
            self.record_score = score;
        }
    }

    /// Record the loss of a fast single-transition update
    pub fn record_step_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.step_losses, loss, self.window_size);
    }

    /// Record the loss of a batched end-of-episode replay update
    pub fn record_replay_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.replay_losses, loss, self.window_size);
    }

    /// Mean episode reward over the rolling window
    pub fn mean_episode_reward(&self) -> f32 {
        Self::mean_f32(&self.episode_rewards)
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        Self::mean_u32(&self.episode_lengths)
    }

    /// Mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        Self::mean_u32(&self.episode_scores)
    }

    /// All-time mean score across every completed episode
    pub fn overall_mean_score(&self) -> f32 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.total_score as f32 / self.total_episodes as f32
        }
    }

    /// Mean per-step loss over the rolling window
    pub fn mean_step_loss(&self) -> f32 {
        Self::mean_f32(&self.step_losses)
    }

    /// Mean replay loss over the rolling window
    pub fn mean_replay_loss(&self) -> f32 {
        Self::mean_f32(&self.replay_losses)
    }

    /// Total number of episodes completed
    pub fn total_episodes(&self) -> u32 {
        self.total_episodes
    }

    /// Total number of environment steps taken
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Best score seen so far
    pub fn record_score(&self) -> u32 {
        self.record_score
    }

    /// Window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the current statistics
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_dqn::metrics::TrainingStats;
    ///
    /// let mut stats = TrainingStats::new(100);
    /// stats.record_episode(15.5, 150, 5);
    /// stats.record_replay_loss(0.02);
    ///
    /// println!("{}", stats.format_summary());
    /// // Output: Episodes: 1 | Steps: 150 | Score: 5.00 (mean 5.00, record 5) | Reward: 15.50 | Len: 150.0 | Loss: 0.0000 | Replay: 0.0200
    /// ```
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Score: {:.2} (mean {:.2}, record {}) | Reward: {:.2} | Len: {:.1} | Loss: {:.4} | Replay: {:.4}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_score(),
            self.overall_mean_score(),
            self.record_score,
            self.mean_episode_reward(),
            self.mean_episode_length(),
            self.mean_step_loss(),
            self.mean_replay_loss(),
        )
    }

    fn mean_f32(deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    fn mean_u32(deque: &VecDeque<u32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<u32>() as f32 / deque.len() as f32
        }
    }

    /// Push to a deque with the rolling-window size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
