/// Direction the snake is travelling in
///
/// `None` is the resting direction of a freshly created snake that has not
/// moved yet. It has a zero delta and is opposite to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn is_moving(&self) -> bool {
        *self != Direction::None
    }
}

/// A command coming from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Steer the snake
    Move(Direction),
    /// Start a fresh round (only honoured after game over)
    Reset,
    /// Stop the main loop after the current tick
    Quit,
}

impl From<Direction> for Request {
    fn from(direction: Direction) -> Self {
        Request::Move(direction)
    }
}
