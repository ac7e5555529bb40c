use crate::snake::{Heading, Snake};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Turn(Heading),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// A non-blocking source of input, drained once per tick.
pub trait EventSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

pub fn key_to_event(ev: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::Turn(Heading::Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::Turn(Heading::Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::Turn(Heading::Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::Turn(Heading::Right)),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Quit),
        _ => None,
    }
}

/// Applies a tick's worth of input to the snake. Turning straight back onto
/// the current heading is ignored.
pub fn process_events<I>(events: I, snake: &mut Snake) -> Control
where
    I: IntoIterator<Item = InputEvent>,
{
    for ev in events {
        match ev {
            InputEvent::Quit => return Control::Quit,
            InputEvent::Turn(heading) if heading == snake.heading().opposite() => {
                trace!("dropping reversal to {:?}", heading);
            }
            InputEvent::Turn(heading) => snake.queue_heading(heading),
        }
    }

    Control::Continue
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
