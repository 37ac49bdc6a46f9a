use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tracing::debug;

use crate::events::AppEvent;
use crate::events::Event;
use crate::events::SimEvent;

/// Converts a crossterm event into a life event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::AppEvent(AppEvent::Exit)),
            KeyEvent {
                code: KeyCode::Char(' ' | 'p'),
                ..
            } => Some(Event::SimEvent(SimEvent::ToggleRunning)),
            KeyEvent {
                code: KeyCode::Char('r'),
                ..
            } => Some(Event::SimEvent(SimEvent::Reset)),
            KeyEvent {
                code: KeyCode::Char('+' | '='),
                ..
            } => Some(Event::SimEvent(SimEvent::Faster)),
            KeyEvent {
                code: KeyCode::Char('-'),
                ..
            } => Some(Event::SimEvent(SimEvent::Slower)),
            KeyEvent {
                code: KeyCode::Char('d'),
                ..
            } => Some(Event::AppEvent(AppEvent::Dump)),
            _ => None,
        },
        CrossTermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Event::SimEvent(SimEvent::Click { column, row })),
        CrossTermEvent::Resize(cols, rows) => {
            // The grid keeps the size it was created with
            debug!(cols, rows, "Ignoring resize");
            None
        }
        _ => None,
    }
}
