use crate::grid::{Grid, Rect};

use anyhow::Result;
use crossterm::style::Color;

pub const BOARD_BACKGROUND_COLOR: Color = Color::Rgb { r: 0, g: 0, b: 0 };
pub const BORDER_COLOR: Color = Color::Rgb { r: 93, g: 216, b: 228 };
pub const FOOD_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const SNAKE_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };

/// Something that can paint cell rectangles and show the finished frame.
pub trait Renderer {
    /// Paints `rect` with `color`, outlined with `border` if given.
    fn fill(&mut self, rect: Rect, color: Color, border: Option<Color>) -> Result<()>;

    /// Paints `rect` with the board background.
    fn clear(&mut self, rect: Rect) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}

pub trait Drawable {
    fn draw<R: Renderer>(&self, grid: &Grid, renderer: &mut R) -> Result<()>;
}
