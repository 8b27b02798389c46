/// Per-tick input as seen by the simulation.  Backends build these; the
/// core never polls devices.

use crate::entities::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Dash,
    DashAlt,
}

/// Immutable set of logical keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u8,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: Key) -> Self {
        self.press(key);
        self
    }

    pub fn press(&mut self, key: Key) {
        self.held |= bit(key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held & bit(key) != 0
    }

    pub fn dash_requested(&self) -> bool {
        self.is_held(Key::Dash) || self.is_held(Key::DashAlt)
    }

    /// Unit-step direction from the held movement keys.  Right wins over
    /// left and down over up when both are held.
    pub fn direction(&self) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.is_held(Key::Left) {
            dx = -1.0;
        }
        if self.is_held(Key::Right) {
            dx = 1.0;
        }
        if self.is_held(Key::Up) {
            dy = -1.0;
        }
        if self.is_held(Key::Down) {
            dy = 1.0;
        }
        (dx, dy)
    }
}

fn bit(key: Key) -> u8 {
    1 << key as u8
}

/// Discrete events delivered between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    /// New play-field size in logical units.
    Resize { width: f32, height: f32 },
    PointerDown(Vec2),
    /// Enter: start from the menu, continue from game over.
    Confirm,
    /// Any key press; skips the opening crawl once allowed.
    AnyKey,
}
