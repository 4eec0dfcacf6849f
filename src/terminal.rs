//! Keyboard input from the terminal.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
//!   `Press` / `Repeat` / `Release` events map straight onto key-down/up.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated `Press`).  A held direction key is released synthetically
//!   once it has not repeated for `HOLD_WINDOW` frames.

use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use star_shooter::input::{InputEvent, InputSource, Key};

/// A key stays held this many frames after its last press/repeat.  The OS
/// repeat rate is at least 15 Hz, so at 60 FPS this needs to cover 4 frames.
const HOLD_WINDOW: u64 = 4;

enum Mapped {
    Key(Key),
    Quit,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Mapped> {
    let key = match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Mapped::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Mapped::Quit),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::ShieldUp,
        KeyCode::Char('a') | KeyCode::Char('A') => Key::ShieldDown,
        KeyCode::Char('w') | KeyCode::Char('W') => Key::Overdrive,
        _ => return None,
    };
    Some(Mapped::Key(key))
}

fn is_direction(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right | Key::Up | Key::Down)
}

pub struct TerminalInput {
    /// Terminal reports key releases.
    release_events: bool,
    /// Each held direction key → frame it was last seen.
    held: HashMap<Key, u64>,
    frame: u64,
}

impl TerminalInput {
    pub fn new(release_events: bool) -> Self {
        TerminalInput {
            release_events,
            held: HashMap::new(),
            frame: 0,
        }
    }

    fn on_key(&mut self, key: Key, kind: KeyEventKind, events: &mut Vec<InputEvent>) {
        if !is_direction(key) {
            // Action keys are one-shot; ignore repeats and releases.
            if kind == KeyEventKind::Press {
                events.push(InputEvent::KeyDown(key));
            }
            return;
        }
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.held.insert(key, self.frame).is_none() {
                    events.push(InputEvent::KeyDown(key));
                }
            }
            KeyEventKind::Release => {
                if self.held.remove(&key).is_some() {
                    events.push(InputEvent::KeyUp(key));
                }
            }
        }
    }

    fn expire_stale(&mut self, events: &mut Vec<InputEvent>) {
        let frame = self.frame;
        let stale: Vec<Key> = self
            .held
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(&key, _)| key)
            .collect();
        for key in stale {
            self.held.remove(&key);
            events.push(InputEvent::KeyUp(key));
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Vec<InputEvent>> {
        self.frame += 1;
        let mut events = Vec::new();

        while event::poll(Duration::ZERO)? {
            if let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event::read()?
            {
                match map_key(code, modifiers) {
                    Some(Mapped::Quit) => {
                        events.push(InputEvent::Quit);
                        return Ok(events);
                    }
                    Some(Mapped::Key(key)) => self.on_key(key, kind, &mut events),
                    None => {}
                }
            }
        }

        if !self.release_events {
            self.expire_stale(&mut events);
        }
        Ok(events)
    }
}

/// Block until any key is pressed.
pub fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(());
        }
    }
}
