use rand::Rng;

use super::action::Direction;
use super::food;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit segments, head first. Returns `None` for an
    /// empty body or one with repeated cells.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        let distinct = body
            .iter()
            .enumerate()
            .all(|(i, pos)| !body[..i].contains(pos));
        distinct.then_some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// True if any segment, tail included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, keeping the tail when growing
    pub(crate) fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false, a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Waiting for the first directional input
    #[default]
    NotStarted,
    Running,
    /// Terminal until an explicit reset
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// The snake covers every cell, no food can be placed
    BoardFull,
}

/// Authoritative snapshot of one round
///
/// Everything outside the engine only reads it. A finished round is never
/// reused: resetting builds a new `GridState`.
///
/// `create` is the only public constructor, so every round begins NotStarted:
///
/// ```rust
/// use arcade_snake::game::{GameStatus, GridState};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let state = GridState::create(20, 20, &mut StdRng::seed_from_u64(1));
/// assert_eq!(state.status(), GameStatus::NotStarted);
/// ```
///
/// ```compile_fail
/// use arcade_snake::game::{GridState, Position, Snake};
///
/// let snake = Snake::new(Position::new(0, 0));
/// let _ = GridState::from_parts(5, 5, snake, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    width: usize,
    height: usize,
    pub(crate) snake: Snake,
    pub(crate) direction: Direction,
    pub(crate) next_direction: Direction,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) status: GameStatus,
    pub(crate) end_reason: Option<EndReason>,
    pub(crate) ticks: u64,
}

impl GridState {
    /// Fresh round: one-cell snake in the centre, resting, food on a random free cell
    pub fn create<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let center = Position::new((width / 2) as i32, (height / 2) as i32);
        let snake = Snake::new(center);
        let food = food::place_food(rng, width, height, &snake);
        Self::from_parts(width, height, snake, food)
    }

    /// Assemble a NotStarted state around an existing snake and food
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        snake: Snake,
        food: Option<Position>,
    ) -> Self {
        Self {
            width,
            height,
            snake,
            direction: Direction::None,
            next_direction: Direction::None,
            food,
            score: 0,
            status: GameStatus::NotStarted,
            end_reason: None,
            ticks: 0,
        }
    }

    /// Same as `from_parts`, already moving in `direction`
    #[cfg(test)]
    pub(crate) fn running(
        width: usize,
        height: usize,
        snake: Snake,
        food: Option<Position>,
        direction: Direction,
    ) -> Self {
        let mut state = Self::from_parts(width, height, snake, food);
        state.direction = direction;
        state.next_direction = direction;
        state.status = GameStatus::Running;
        state
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Direction committed on the last tick
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction that will be committed on the next tick
    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Number of ticks that moved the snake or ended the round
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.width
            && pos.y >= 0
            && (pos.y as usize) < self.height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::None), pos);
    }

    #[test]
    fn test_snake_from_segments() {
        let snake =
            Snake::from_segments(vec![Position::new(5, 5), Position::new(4, 5)]).unwrap();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        assert!(Snake::from_segments(vec![]).is_none());
        assert!(
            Snake::from_segments(vec![Position::new(1, 1), Position::new(1, 1)]).is_none()
        );
    }

    #[test]
    fn test_snake_advance() {
        let mut snake =
            Snake::from_segments(vec![Position::new(5, 5), Position::new(4, 5)]).unwrap();

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.segments(), &[Position::new(6, 5), Position::new(5, 5)]);

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Position::new(5, 5));
    }

    #[test]
    fn test_create_fresh_round() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GridState::create(20, 20, &mut rng);

        assert_eq!(state.snake().segments(), &[Position::new(10, 10)]);
        assert_eq!(state.direction(), Direction::None);
        assert_eq!(state.score(), 0);
        assert_eq!(state.status(), GameStatus::NotStarted);
        assert_eq!(state.end_reason(), None);

        let food = state.food().expect("a 20x20 grid has free cells");
        assert!(state.is_in_bounds(food));
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_create_on_odd_grid_is_centered() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GridState::create(7, 5, &mut rng);
        assert_eq!(state.head(), Position::new(3, 2));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GridState::from_parts(
            20,
            20,
            Snake::new(Position::new(5, 5)),
            Some(Position::new(10, 10)),
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }
}
