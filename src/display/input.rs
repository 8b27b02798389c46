/// Crossterm events → per-tick `InputSnapshot` plus discrete `InputEvent`s.
///
/// Input model: instead of acting on each key event individually, we keep
/// a `key_frame` map recording the frame of the last press/repeat event for
/// every key.  Each frame the keys that are still "fresh" (within
/// `HOLD_WINDOW` frames) count as held, so Space + a direction can be held
/// together.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` frames of silence,
///   which is shorter than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::input::{InputEvent, InputSnapshot, Key};

use super::{cell_center, logical_size};

/// A key counts as held if seen within this many frames (≈133 ms at 60 Hz).
pub const HOLD_WINDOW: u64 = 8;

/// Logical key for a terminal key code, if it is a game key.
pub fn map_key(code: &KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Dash),
        KeyCode::Tab | KeyCode::BackTab => Some(Key::DashAlt),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct InputTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    events: Vec<InputEvent>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
                self.events.push(InputEvent::PointerDown(cell_center(*column, *row)));
            }
            Event::Resize(cols, rows) => {
                let (width, height) = logical_size(*cols, *rows);
                self.events.push(InputEvent::Resize { width, height });
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.kind {
            // Press: record key + emit one-shot events
            KeyEventKind::Press => {
                self.key_frame.insert(key.code.clone(), self.frame);
                let event = match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        InputEvent::Quit
                    }
                    KeyCode::Enter => InputEvent::Confirm,
                    _ => InputEvent::AnyKey,
                };
                self.events.push(event);
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_frame.insert(key.code.clone(), self.frame);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_frame.remove(&key.code);
            }
        }
    }

    /// Game keys held as of the current frame.
    pub fn snapshot(&self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        for (code, &last) in &self.key_frame {
            if self.frame.saturating_sub(last) > HOLD_WINDOW {
                continue;
            }
            if let Some(key) = map_key(code) {
                snapshot.press(key);
            }
        }
        snapshot
    }

    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
