use anyhow::{bail, Result};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Clockwise traversal order used to resolve relative turns
const CLOCKWISE: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

impl Direction {
    /// Returns the delta (dx, dy) for moving one cell in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Index of this direction in the clockwise cycle
    fn clockwise_index(&self) -> usize {
        CLOCKWISE
            .iter()
            .position(|d| d == self)
            .expect("direction is always in the clockwise cycle")
    }

    /// Resolve a relative turn against this heading
    ///
    /// Straight keeps the heading, a right turn advances one position in the
    /// clockwise cycle and a left turn retreats one position.
    pub fn turned(&self, action: TurnAction) -> Direction {
        let idx = self.clockwise_index();
        match action {
            TurnAction::Straight => *self,
            TurnAction::TurnRight => CLOCKWISE[(idx + 1) % 4],
            TurnAction::TurnLeft => CLOCKWISE[(idx + 3) % 4],
        }
    }
}

/// Number of discrete actions available to the agent
pub const ACTION_DIM: usize = 3;

/// A movement decision relative to the snake's current heading
///
/// Actions are turn-relative, not absolute compass directions. The one-hot
/// wire encoding is index 0 = straight, 1 = right turn, 2 = left turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    Straight,
    TurnRight,
    TurnLeft,
}

impl TurnAction {
    /// All actions in encoding order
    pub const ALL: [TurnAction; ACTION_DIM] = [
        TurnAction::Straight,
        TurnAction::TurnRight,
        TurnAction::TurnLeft,
    ];

    /// Index of this action in the one-hot encoding
    pub fn index(&self) -> usize {
        match self {
            TurnAction::Straight => 0,
            TurnAction::TurnRight => 1,
            TurnAction::TurnLeft => 2,
        }
    }

    /// One-hot encoding of this action
    pub fn one_hot(&self) -> [f32; ACTION_DIM] {
        let mut v = [0.0; ACTION_DIM];
        v[self.index()] = 1.0;
        v
    }

    /// Decode a one-hot action vector
    ///
    /// Anything other than the three recognized one-hot patterns is a caller
    /// contract violation and fails fast rather than silently defaulting.
    pub fn from_one_hot(v: [f32; ACTION_DIM]) -> Result<TurnAction> {
        for action in TurnAction::ALL {
            if v == action.one_hot() {
                return Ok(action);
            }
        }
        bail!("invalid one-hot action vector: {:?}", v);
    }
}
