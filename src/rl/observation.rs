//! Feature extraction from game state
//!
//! Maps the raw engine state to the fixed 11-dimensional observation vector
//! consumed by the policy: 3 danger flags relative to the heading, 4 heading
//! one-hot flags and 4 food-relative position flags.

use crate::game::{Direction, GameState, TurnAction};

/// Number of features in an observation
pub const OBSERVATION_DIM: usize = 11;

/// Fixed-length feature vector derived from a game state
pub type Observation = [f32; OBSERVATION_DIM];

/// Extract the observation vector from a game state
///
/// Pure and deterministic: no side effects, recomputed each step. Danger
/// flags probe one cell ahead, to the right and to the left of the current
/// heading; food flags compare coordinates strictly (not mutually exclusive
/// on ties, not normalized by distance).
pub fn extract(state: &GameState) -> Observation {
    let head = state.snake.head();
    let heading = state.snake.direction;

    let probe = |dir: Direction| state.is_collision(head.moved_in_direction(dir));

    let danger_straight = probe(heading);
    let danger_right = probe(heading.turned(TurnAction::TurnRight));
    let danger_left = probe(heading.turned(TurnAction::TurnLeft));

    let dir_left = heading == Direction::Left;
    let dir_right = heading == Direction::Right;
    let dir_up = heading == Direction::Up;
    let dir_down = heading == Direction::Down;

    let food = state.food;
    let food_left = food.x < head.x;
    let food_right = food.x > head.x;
    let food_up = food.y < head.y;
    let food_down = food.y > head.y;

    let flag = |b: bool| if b { 1.0 } else { 0.0 };

    [
        flag(danger_straight),
        flag(danger_right),
        flag(danger_left),
        flag(dir_left),
        flag(dir_right),
        flag(dir_up),
        flag(dir_down),
        flag(food_left),
        flag(food_right),
        flag(food_up),
        flag(food_down),
    ]
}
