use super::{
    action::{Direction, TurnAction},
    config::GameConfig,
    state::{GameState, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the episode has terminated
    pub terminated: bool,
    /// Score after the step (food eaten so far)
    pub score: u32,
}

/// The game engine that handles all simulation logic
///
/// The random source is injected so food placement is reproducible under a
/// fixed seed. The engine holds no episode state itself; `GameState` is
/// created by `reset` and advanced in place by `step`.
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration and RNG
    ///
    /// Panics on an invalid configuration; `reset` relies on the validated
    /// bounds to always find a free cell for food.
    pub fn new(config: GameConfig, rng: StdRng) -> Self {
        config.validate().expect("invalid game configuration");
        Self { config, rng }
    }

    /// Create an engine with a deterministic seed
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its initial state
    ///
    /// Heading is RIGHT, the head sits at the board center with the body
    /// extending left behind it, and food is placed on a free cell.
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self
            .spawn_food(&snake)
            .expect("a fresh board always has a free cell for food");

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
    }

    /// Execute one step of the game
    ///
    /// Resolves the relative turn, prepends the new head, then checks for
    /// termination (collision or frame cap) before resolving food and tail
    /// movement. On a terminal step the state is left in its post-collision
    /// form: the tail is not trimmed and no new food is placed.
    pub fn step(&mut self, state: &mut GameState, action: TurnAction) -> StepResult {
        if !state.is_alive {
            return StepResult {
                reward: 0.0,
                terminated: true,
                score: state.score,
            };
        }

        state.steps += 1;

        let new_direction = state.snake.direction.turned(action);
        state.snake.direction = new_direction;

        let new_head = state.snake.head().moved_in_direction(new_direction);
        state.snake.push_head(new_head);

        // Frame cap scales with snake length, bounding episode duration
        let frame_cap = self.config.frame_cap_per_segment * state.snake.len() as u32;
        if state.is_collision(new_head) || state.steps > frame_cap {
            state.is_alive = false;
            return StepResult {
                reward: self.config.death_penalty,
                terminated: true,
                score: state.score,
            };
        }

        if new_head == state.food {
            state.score += 1;
            // Tail is kept: net growth by one segment
            match self.spawn_food(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    // The snake fills the board; nothing left to eat
                    state.is_alive = false;
                    return StepResult {
                        reward: self.config.food_reward,
                        terminated: true,
                        score: state.score,
                    };
                }
            }
            return StepResult {
                reward: self.config.food_reward,
                terminated: false,
                score: state.score,
            };
        }

        state.snake.pop_tail();

        // Shaping applies only on non-terminal, non-food steps so it can
        // never double-count with the food bonus
        let mut reward = self.config.step_penalty;
        let distance = state.snake.head().manhattan_distance(state.food);
        if distance < self.config.proximity_threshold {
            reward += self.config.proximity_bonus;
        } else if state.head_on_boundary() {
            reward += self.config.wall_penalty;
        }

        StepResult {
            reward,
            terminated: false,
            score: state.score,
        }
    }

    /// Place food on a uniformly random free cell
    ///
    /// Rejection sampling with a bounded retry budget, then a deterministic
    /// scan over the remaining free cells. Returns `None` only when the
    /// snake occupies the entire board.
    fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        let width = self.config.grid_width;
        let height = self.config.grid_height;

        let max_draws = width * height * 4;
        for _ in 0..max_draws {
            let pos = Position::new(
                self.rng.gen_range(0..width) as i32,
                self.rng.gen_range(0..height) as i32,
            );
            if !snake.body.contains(&pos) {
                return Some(pos);
            }
        }

        // Dense board: enumerate free cells and pick one uniformly
        let free: Vec<Position> = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.body.contains(pos))
            .collect();

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }
}
