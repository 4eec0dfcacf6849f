//! Input events and the persistent directional state they drive.

use std::io;

use crate::ship::Ship;

/// Pixels per frame for a held direction key, before boost.
pub const BASE_SPEED: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    ShieldUp,
    ShieldDown,
    Overdrive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Quit,
}

/// Anything that can produce the events of one frame.
pub trait InputSource {
    /// Drain every event pending since the last call.  Must not block.
    fn poll(&mut self) -> io::Result<Vec<InputEvent>>;
}

/// Source that never produces anything (headless runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl InputSource for Idle {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        Ok(Vec::new())
    }
}

/// Whether the loop should keep going after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Held-key state.  Direction keys set a speed that persists until the key
/// is released; action keys are one-shot calls on the ship.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Controls {
    pub x_speed: f32,
    pub y_speed: f32,
}

impl Controls {
    pub fn apply(&mut self, event: InputEvent, ship: &mut Ship) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::KeyDown(key) => match key {
                Key::Left => self.x_speed = -BASE_SPEED,
                Key::Right => self.x_speed = BASE_SPEED,
                Key::Up => self.y_speed = -BASE_SPEED,
                Key::Down => self.y_speed = BASE_SPEED,
                Key::ShieldUp => ship.increase_shields(),
                Key::ShieldDown => ship.decrease_shields(),
                Key::Overdrive => ship.overdrive(),
            },
            // A release only stops the axis if that key is what drives it.
            InputEvent::KeyUp(key) => match key {
                Key::Left if self.x_speed < 0.0 => self.x_speed = 0.0,
                Key::Right if self.x_speed > 0.0 => self.x_speed = 0.0,
                Key::Up if self.y_speed < 0.0 => self.y_speed = 0.0,
                Key::Down if self.y_speed > 0.0 => self.y_speed = 0.0,
                _ => {}
            },
        }
        Flow::Continue
    }
}
