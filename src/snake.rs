use std::collections::VecDeque;

use crate::grid::Grid;
use crate::render::{Drawable, Renderer, BORDER_COLOR, SNAKE_COLOR};
use crate::Position;
use Heading::*;
use MoveOutcome::*;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { head: Position, vacated: Option<Position> },
    /// The head ran into the body. `vacated` holds every cell the snake
    /// occupied before it was put back at the center.
    SelfCollision { vacated: Vec<Position> },
}

#[derive(Clone, Debug)]
pub struct Snake {
    grid: Grid,
    segments: VecDeque<Position>,
    heading: Heading,
    pending_heading: Option<Heading>,
    target_length: usize,
    last_vacated: Option<Position>,
}

impl Snake {
    pub fn new(grid: Grid) -> Self {
        Snake {
            grid,
            segments: VecDeque::from(vec![grid.center()]),
            heading: Right,
            pending_heading: None,
            target_length: 1,
            last_vacated: None,
        }
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    #[cfg(test)]
    pub fn pending_heading(&self) -> Option<Heading> {
        self.pending_heading
    }

    /// Callers must not pass the reverse of the current heading; see
    /// `input::process_events`.
    pub fn queue_heading(&mut self, heading: Heading) {
        self.pending_heading = Some(heading);
    }

    pub fn apply_pending_heading(&mut self) {
        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    #[cfg(test)]
    pub fn last_vacated(&self) -> Option<Position> {
        self.last_vacated
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> MoveOutcome {
        let new_head = self.grid.wrap(self.heading.delta(), self.head());
        debug_assert!(self.grid.contains(new_head));

        // Head and neck are skipped, the head can only reach the neck by reversing
        if self.segments.iter().skip(2).any(|pos| *pos == new_head) {
            let vacated = self.segments.iter().copied().collect();
            self.reset(rng);
            return SelfCollision { vacated };
        }

        self.segments.push_front(new_head);

        self.last_vacated = if self.segments.len() > self.target_length {
            self.segments.pop_back()
        } else {
            None
        };

        Moved { head: new_head, vacated: self.last_vacated }
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.segments = VecDeque::from(vec![self.grid.center()]);
        self.heading = Heading::ALL.choose(rng).copied().unwrap_or(Right);
        self.pending_heading = None;
        self.target_length = 1;
        self.last_vacated = None;
    }

    #[cfg(test)]
    pub fn from_segments(grid: Grid, segments: &[Position], heading: Heading) -> Self {
        Snake {
            grid,
            segments: segments.iter().copied().collect(),
            heading,
            pending_heading: None,
            target_length: segments.len(),
            last_vacated: None,
        }
    }
}

impl Drawable for Snake {
    fn draw<R: Renderer>(&self, grid: &Grid, renderer: &mut R) -> Result<()> {
        if let Some(vacated) = self.last_vacated {
            renderer.clear(grid.to_rect(vacated))?;
        }

        for pos in &self.segments {
            renderer.fill(grid.to_rect(*pos), SNAKE_COLOR, Some(BORDER_COLOR))?;
        }

        Ok(())
    }
}
