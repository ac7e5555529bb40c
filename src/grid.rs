use crate::{Position, TermInt};

/// Terminal columns per cell. Characters are about twice as tall as they are
/// wide, so two columns by one row draws a roughly square cell.
pub const CELL_WIDTH: TermInt = 2;
pub const CELL_HEIGHT: TermInt = 1;

/// A rectangle in terminal character coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: TermInt,
    pub y: TermInt,
    pub width: TermInt,
    pub height: TermInt,
}

/// Playfield dimensions in cells, plus where the playfield sits on screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    origin: (TermInt, TermInt),
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid { width, height, origin: (0, 0) }
    }

    /// Shifts every cell rectangle by `origin`, leaving room for a frame.
    pub fn with_origin(mut self, origin: (TermInt, TermInt)) -> Self {
        self.origin = origin;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn origin(&self) -> (TermInt, TermInt) {
        self.origin
    }

    pub fn center(&self) -> Position {
        (self.width / 2, self.height / 2)
    }

    #[cfg(test)]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, cell: Position) -> bool {
        (0..self.width).contains(&cell.0) && (0..self.height).contains(&cell.1)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Screen size of the playfield in characters, frame excluded.
    pub fn screen_size(&self) -> (TermInt, TermInt) {
        (self.width as TermInt * CELL_WIDTH, self.height as TermInt * CELL_HEIGHT)
    }

    pub fn to_rect(&self, cell: Position) -> Rect {
        Rect {
            x: self.origin.0 + cell.0 as TermInt * CELL_WIDTH,
            y: self.origin.1 + cell.1 as TermInt * CELL_HEIGHT,
            width: CELL_WIDTH,
            height: CELL_HEIGHT,
        }
    }

    /// Moves `cell` by `delta`, reappearing on the opposite edge when it
    /// leaves the playfield.
    pub fn wrap(&self, delta: (i32, i32), cell: Position) -> Position {
        (
            (cell.0 + delta.0).rem_euclid(self.width),
            (cell.1 + delta.1).rem_euclid(self.height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wraps_at_every_edge() {
        let grid = Grid::new(32, 24);

        assert_eq!(grid.wrap((1, 0), (31, 7)), (0, 7));
        assert_eq!(grid.wrap((-1, 0), (0, 7)), (31, 7));
        assert_eq!(grid.wrap((0, 1), (5, 23)), (5, 0));
        assert_eq!(grid.wrap((0, -1), (5, 0)), (5, 23));
    }

    #[test]
    fn inner_moves_are_plain_addition() {
        let grid = Grid::new(32, 24);
        assert_eq!(grid.wrap((1, 0), (16, 12)), (17, 12));
        assert_eq!(grid.wrap((0, -1), (16, 12)), (16, 11));
    }

    #[test]
    fn center_of_default_board() {
        assert_eq!(Grid::new(32, 24).center(), (16, 12));
    }

    #[test]
    fn rect_is_offset_by_origin() {
        let grid = Grid::new(10, 10).with_origin((1, 1));
        let rect = grid.to_rect((3, 4));

        assert_eq!(rect, Rect { x: 7, y: 5, width: CELL_WIDTH, height: CELL_HEIGHT });
        assert_eq!(grid.screen_size(), (20, 10));
    }

    #[test]
    fn cells_visits_the_whole_board_once() {
        let grid = Grid::new(4, 3);
        let cells: Vec<_> = grid.cells().collect();

        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], (0, 0));
        assert_eq!(cells[11], (3, 2));
        assert!(cells.iter().all(|c| grid.contains(*c)));
    }

    proptest! {
        #[test]
        fn wrap_stays_on_the_board(
            width in 2i32..64,
            height in 2i32..64,
            x in 0i32..64,
            y in 0i32..64,
            dx in -1i32..=1,
            dy in -1i32..=1,
        ) {
            let grid = Grid::new(width, height);
            let cell = (x % width, y % height);
            let moved = grid.wrap((dx, dy), cell);

            prop_assert!(grid.contains(moved));
        }
    }
}
