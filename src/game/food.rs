//! Food placement
//!
//! Food lands on a cell chosen uniformly among the cells the snake does not
//! cover. Random probing is cheap while the board is mostly empty; once the
//! probe budget runs out the free cells are enumerated instead, so placement
//! always terminates and a full board is reported as `None`.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::state::{Position, Snake};

/// Probes per grid cell before falling back to enumeration
const PROBES_PER_CELL: usize = 4;

/// Pick a free cell for the next food, or `None` if the snake fills the grid
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    snake: &Snake,
) -> Option<Position> {
    let cells = width.saturating_mul(height);
    if cells == 0 || snake.len() >= cells {
        return None;
    }

    for _ in 0..cells.saturating_mul(PROBES_PER_CELL) {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let pos = Position::new(x, y);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    log::debug!("food probing exhausted, scanning {} cells", cells);
    free_cells(width, height, snake).choose(rng)
}

fn free_cells(width: usize, height: usize, snake: &Snake) -> impl Iterator<Item = Position> + '_ {
    (0..height)
        .flat_map(move |y| (0..width).map(move |x| Position::new(x as i32, y as i32)))
        .filter(|pos| !snake.occupies(*pos))
}
