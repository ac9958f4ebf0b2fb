//! Pointer and keyboard intent for the human paddle
//!
//! Event handlers only write here; the frame driver drains it into a
//! `TickInput` once per frame, so paddle movement happens in one place.

use crate::consts::PLAYFIELD_HEIGHT;
use crate::sim::TickInput;

/// The two movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Latest human intent, overwritten as events arrive
#[derive(Debug, Clone, Default)]
pub struct InputState {
    up: bool,
    down: bool,
    /// Pointer target not yet applied by a running step
    pointer_y: Option<f32>,
    activate: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Up => self.up = pressed,
            Key::Down => self.down = pressed,
        }
    }

    /// Handle a raw key name; returns true if it was one of ours
    pub fn key_event(&mut self, name: &str, pressed: bool) -> bool {
        match Key::from_key_name(name) {
            Some(key) => {
                self.set_key(key, pressed);
                true
            }
            None => false,
        }
    }

    /// Pointer moved to playfield height `y`
    pub fn pointer_moved(&mut self, y: f32) {
        self.pointer_y = Some(y);
    }

    /// Click/tap on the playfield
    pub fn activate(&mut self) {
        self.activate = true;
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
        }
    }

    /// Snapshot for the next step
    ///
    /// Held keys persist; the pointer target is kept until a running step
    /// consumes it, so pass `running` as the match's current state.
    pub fn take_tick_input(&mut self, running: bool) -> TickInput {
        let pointer_y = if running {
            self.pointer_y.take()
        } else {
            self.pointer_y
        };
        TickInput {
            up: self.up,
            down: self.down,
            pointer_y,
        }
    }

    /// Whether an activation arrived since the last call
    pub fn take_activate(&mut self) -> bool {
        std::mem::take(&mut self.activate)
    }
}

/// Convert a client-space pointer y into playfield units
///
/// `top` and `height` describe the canvas as laid out on the page, which
/// may be scaled relative to the playfield.
pub fn pointer_to_playfield(client_y: f32, top: f32, height: f32) -> f32 {
    let local = client_y - top;
    if height > 0.0 {
        local * PLAYFIELD_HEIGHT / height
    } else {
        local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("ArrowUp"), Some(Key::Up));
        assert_eq!(Key::from_key_name("ArrowDown"), Some(Key::Down));
        assert_eq!(Key::from_key_name("ArrowLeft"), None);
        assert_eq!(Key::from_key_name("w"), None);
    }

    #[test]
    fn test_held_keys_persist_across_frames() {
        let mut input = InputState::new();
        assert!(input.key_event("ArrowUp", true));
        assert!(!input.key_event("Enter", true));

        assert!(input.take_tick_input(true).up);
        assert!(input.take_tick_input(true).up);

        input.key_event("ArrowUp", false);
        assert!(!input.take_tick_input(true).up);
        assert!(!input.is_held(Key::Up));
    }

    #[test]
    fn test_pointer_consumed_once_when_running() {
        let mut input = InputState::new();
        input.pointer_moved(120.0);
        input.pointer_moved(140.0);

        assert_eq!(input.take_tick_input(true).pointer_y, Some(140.0));
        assert_eq!(input.take_tick_input(true).pointer_y, None);
    }

    #[test]
    fn test_pointer_kept_while_paused() {
        let mut input = InputState::new();
        input.pointer_moved(80.0);

        assert_eq!(input.take_tick_input(false).pointer_y, Some(80.0));
        assert_eq!(input.take_tick_input(true).pointer_y, Some(80.0));
        assert_eq!(input.take_tick_input(true).pointer_y, None);
    }

    #[test]
    fn test_activate_is_one_shot() {
        let mut input = InputState::new();
        assert!(!input.take_activate());
        input.activate();
        assert!(input.take_activate());
        assert!(!input.take_activate());
    }

    #[test]
    fn test_pointer_scaling() {
        // Canvas drawn at half size, 50px down the page
        assert_eq!(pointer_to_playfield(175.0, 50.0, PLAYFIELD_HEIGHT / 2.0), 250.0);
        assert_eq!(pointer_to_playfield(60.0, 10.0, 0.0), 50.0);
    }
}
