use std::collections::HashSet;

use crate::grid::Grid;
use crate::render::{Drawable, Renderer, BORDER_COLOR, FOOD_COLOR};
use crate::Position;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

/// Random picks to try before falling back to scanning for free cells.
const MAX_RANDOM_PICKS: usize = 64;

#[derive(Clone, Debug)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Places food on a random cell outside `excluded`. If the board is full
    /// it starts at the top-left corner and will be moved on the next meal.
    pub fn spawn<R: Rng>(grid: &Grid, excluded: &HashSet<Position>, rng: &mut R) -> Self {
        let mut food = Food { position: (0, 0) };
        food.relocate(grid, excluded, rng);
        food
    }

    #[cfg(test)]
    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to a uniformly random cell not in `excluded`.
    /// Returns `None`, leaving the food where it was, if every cell is taken.
    pub fn relocate<R: Rng>(
        &mut self,
        grid: &Grid,
        excluded: &HashSet<Position>,
        rng: &mut R,
    ) -> Option<Position> {
        let mut picked = None;

        for _ in 0..MAX_RANDOM_PICKS {
            let pos = (rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
            if !excluded.contains(&pos) {
                picked = Some(pos);
                break;
            }
        }

        if picked.is_none() {
            let free: Vec<Position> = grid.cells().filter(|pos| !excluded.contains(pos)).collect();
            picked = free.choose(rng).copied();
        }

        if let Some(pos) = picked {
            self.position = pos;
        }

        picked
    }
}

impl Drawable for Food {
    fn draw<R: Renderer>(&self, grid: &Grid, renderer: &mut R) -> Result<()> {
        renderer.fill(grid.to_rect(self.position), FOOD_COLOR, Some(BORDER_COLOR))
    }
}
