use crate::grid::{Grid, Rect};
use crate::input::{key_to_event, EventSource, InputEvent};
use crate::render::{Renderer, BOARD_BACKGROUND_COLOR, BORDER_COLOR};
use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, read, poll};

/// Something that must be put back the way it was found.
pub trait Session {
    fn setup(&mut self) -> Result<()>;
    fn restore(&mut self) -> Result<()>;
}

/// Runs `body` between `setup` and `restore`. `restore` runs even when setup
/// or `body` fail, and their error is the one returned.
pub fn in_session<S, F>(session: &mut S, body: F) -> Result<()>
where
    S: Session,
    F: FnOnce(&mut S) -> Result<()>,
{
    let res = session.setup().and_then(|_| body(session));
    let restored = session.restore();

    res.and(restored)
}

/// Owns stdout while the game runs: raw mode, alternate screen and a hidden
/// cursor, with drawing commands queued until `present`.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn get_terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    /// Where the playfield must start so that it and its frame are centered.
    pub fn playfield_origin(&self, grid: &Grid) -> Result<(TermInt, TermInt)> {
        let (field_w, field_h) = grid.screen_size();
        let (need_w, need_h) = (field_w + 2, field_h + 2);

        if need_w > self.width || need_h > self.height {
            bail!(
                "terminal is {}x{} but a {}x{} board needs at least {}x{}",
                self.width, self.height, grid.width(), grid.height(), need_w, need_h
            );
        }

        Ok(((self.width - need_w) / 2 + 1, (self.height - need_h) / 2 + 1))
    }

    /// Frames the playfield of `grid`, one character outside of it.
    pub fn draw_borders(&mut self, grid: &Grid) -> Result<()> {
        let (field_w, field_h) = grid.screen_size();
        let (origin_x, origin_y) = grid.origin();
        let (start_x, start_y) = (origin_x - 1, origin_y - 1);
        let (end_x, end_y) = (origin_x + field_w, origin_y + field_h);

        queue!(self.stdout, style::SetForegroundColor(BORDER_COLOR))?;

        for x in start_x..=end_x {
            let ch = if x == start_x || x == end_x {'+'} else {'-'};
            self.print_at((x, start_y), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in origin_y..end_y {
            self.print_at((start_x, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        queue!(self.stdout, style::ResetColor)?;
        Ok(())
    }

    pub fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("flushing stdout")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn paint(&mut self, rect: Rect, background: Color, foreground: Color, row: &str) -> Result<()> {
        queue!(
            self.stdout,
            style::SetBackgroundColor(background),
            style::SetForegroundColor(foreground)
        )?;

        for dy in 0..rect.height {
            queue!(self.stdout, cursor::MoveTo(rect.x, rect.y + dy), style::Print(row))?;
        }

        queue!(self.stdout, style::ResetColor)?;
        Ok(())
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("setting raw mode")
    }

    fn set_cursor_blink(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.context("setting cursor blink")
    }

    fn set_cursor_visibility(&mut self, option: bool) -> Result<()> {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.context("setting cursor visibility")
    }
}

impl Session for TermManager {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("entering alternate screen")?;
        self.set_raw_mode(true)?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)?;
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("clearing screen")?;
        Ok(())
    }

    /// Undoes as much of `setup` as it can, reporting the first failure.
    fn restore(&mut self) -> Result<()> {
        let raw = self.set_raw_mode(false);
        let visible = self.set_cursor_visibility(true);
        let blink = self.set_cursor_blink(true);
        let screen = execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)
            .context("leaving alternate screen");

        raw.and(visible).and(blink).and(screen)
    }
}

impl Renderer for TermManager {
    fn fill(&mut self, rect: Rect, color: Color, border: Option<Color>) -> Result<()> {
        let row = cell_row(rect.width, border.is_some());
        self.paint(rect, color, border.unwrap_or(color), &row)
    }

    fn clear(&mut self, rect: Rect) -> Result<()> {
        let row = cell_row(rect.width, false);
        self.paint(rect, BOARD_BACKGROUND_COLOR, BOARD_BACKGROUND_COLOR, &row)
    }

    fn present(&mut self) -> Result<()> {
        self.flush()
    }
}

impl EventSource for TermManager {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0)).context("polling input")? {
            if let Event::Key(ev) = read().context("reading input")? {
                events.extend(key_to_event(&ev));
            }
        }

        Ok(events)
    }
}

/// One text row of a cell: bracketed when outlined, blank otherwise.
fn cell_row(width: TermInt, outlined: bool) -> String {
    match (outlined, width) {
        (true, 1) => "#".to_string(),
        (true, w) if w >= 2 => format!("[{}]", " ".repeat(w as usize - 2)),
        (_, w) => " ".repeat(w as usize),
    }
}
