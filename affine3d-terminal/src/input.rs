/// Translation of crossterm events into viewer input
use affine3d_core::{DragMode, InputEvent, Key};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::renderer::{CELL_HEIGHT, CELL_WIDTH};

/// Wheel delta reported per scroll step, matching a mouse notch
const WHEEL_NOTCH: i32 = 120;

/// What the app should do with a terminal event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Input(InputEvent),
    Resize(u16, u16),
    Quit,
}

/// Turns terminal events into actions, remembering the last pointer cell so
/// drags can be reported as deltas
#[derive(Debug, Default)]
pub struct EventTranslator {
    last_pointer: Option<(u16, u16)>,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: &Event) -> Option<Action> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => self.translate_mouse(mouse).map(Action::Input),
            Event::Resize(w, h) => Some(Action::Resize(*w, *h)),
            _ => None,
        }
    }

    fn translate_mouse(&mut self, mouse: &MouseEvent) -> Option<InputEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.last_pointer = Some((mouse.column, mouse.row));
                let mode = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    DragMode::Pan
                } else {
                    DragMode::Rotate
                };
                Some(InputEvent::PointerDown(mode))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (last_col, last_row) = self.last_pointer?;
                self.last_pointer = Some((mouse.column, mouse.row));
                // cells to virtual pixels
                let dx = (mouse.column as f64 - last_col as f64) * CELL_WIDTH;
                let dy = (mouse.row as f64 - last_row as f64) * CELL_HEIGHT;
                Some(InputEvent::PointerMove { dx, dy })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.last_pointer = None;
                Some(InputEvent::PointerUp)
            }
            MouseEventKind::ScrollUp => Some(InputEvent::Wheel(WHEEL_NOTCH)),
            MouseEventKind::ScrollDown => Some(InputEvent::Wheel(-WHEEL_NOTCH)),
            _ => None,
        }
    }
}

fn translate_key(event: &KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    let key = match event.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('a') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') => Key::Right,
        KeyCode::Up | KeyCode::Char('w') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') => Key::Down,
        KeyCode::PageUp => Key::Forward,
        KeyCode::PageDown => Key::Back,
        KeyCode::Char('q') => Key::RollLeft,
        KeyCode::Char('e') => Key::RollRight,
        KeyCode::Char('+') | KeyCode::Char('=') => Key::ScaleUp,
        KeyCode::Char('-') => Key::ScaleDown,
        KeyCode::Tab => Key::Jump,
        KeyCode::Char('r') => Key::Reset,
        _ => return None,
    };
    Some(Action::Input(InputEvent::Key(key)))
}
