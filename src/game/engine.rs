use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::Direction,
    config::GameConfig,
    food,
    state::{CollisionType, EndReason, GameStatus, GridState, Position},
};

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
    /// Whether the round is over after this tick
    pub terminated: bool,
}

/// Advances a `GridState` one tick at a time
///
/// The random source is a type parameter so tests can drive food placement
/// with a seeded generator.
pub struct SimulationEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl SimulationEngine<ThreadRng> {
    /// Create a new engine backed by the thread-local generator
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SimulationEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh round. The previous state is dropped by the caller, never recycled.
    pub fn reset(&mut self) -> GridState {
        GridState::create(self.config.grid_width, self.config.grid_height, &mut self.rng)
    }

    /// Buffer a direction for the next tick
    ///
    /// Reversals are checked against the committed direction, not the buffered
    /// one, so two quick presses cannot fold the snake onto itself. The first
    /// accepted request of a round starts it; the snake moves on the next tick.
    /// Returns whether the request was accepted.
    pub fn request_direction(&self, state: &mut GridState, direction: Direction) -> bool {
        if state.status == GameStatus::GameOver || !direction.is_moving() {
            return false;
        }

        if state.direction.is_opposite(direction) {
            log::trace!("ignoring reversal {:?} -> {:?}", state.direction, direction);
            return false;
        }

        state.next_direction = direction;

        if state.status == GameStatus::NotStarted {
            state.status = GameStatus::Running;
            log::info!("round started heading {:?}", direction);
        }

        true
    }

    /// Execute one tick of the game
    pub fn tick(&mut self, state: &mut GridState) -> TickResult {
        match state.status {
            GameStatus::GameOver => {
                return TickResult {
                    terminated: true,
                    ..Default::default()
                };
            }
            GameStatus::NotStarted => return TickResult::default(),
            GameStatus::Running => {}
        }

        if !state.next_direction.is_moving() {
            return TickResult::default();
        }

        state.direction = state.next_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision) = self.check_collision(state, new_head) {
            state.ticks += 1;
            Self::end_round(state, EndReason::Collision(collision));

            return TickResult {
                ate_food: false,
                collision: Some(collision),
                terminated: true,
            };
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        if ate_food {
            state.score = state.score.saturating_add(self.config.food_reward);
            state.food = food::place_food(
                &mut self.rng,
                state.width(),
                state.height(),
                &state.snake,
            );

            if state.food.is_none() {
                Self::end_round(state, EndReason::BoardFull);
                return TickResult {
                    ate_food,
                    collision: None,
                    terminated: true,
                };
            }
        }

        TickResult {
            ate_food,
            collision: None,
            terminated: false,
        }
    }

    /// Check if the new head position causes a collision
    ///
    /// The tail still counts as occupied: it only moves out after the head moves in.
    fn check_collision(&self, state: &GridState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn end_round(state: &mut GridState, reason: EndReason) {
        state.status = GameStatus::GameOver;
        state.end_reason = Some(reason);
        log::info!(
            "round over ({:?}) with score {} after {} ticks",
            reason,
            state.score,
            state.ticks
        );
    }
}
