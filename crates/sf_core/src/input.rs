//! Input events and the per-frame input snapshot.
//!
//! `InputEvent` is the discrete event record the platform layer produces and the
//! controller forwards verbatim to the current state. `InputState` is the snapshot
//! the controller keeps in sync with those events:
//!
//! - **Level-triggered (held):** `is_held(key)` is true every frame the key is down.
//!
//! - **Edge-triggered (just_pressed / just_released):** true only during the frame
//!   the transition happened. Cleared by `end_frame()`, which the controller calls
//!   once the current state's `update` has consumed the frame.

use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Space,
    Enter,
    Backspace,
    Tab,
    F3,
    F4,
    F5,
    W,
    A,
    S,
    D,
    R,
    /// Any other physical key. The id is opaque but stable for the process,
    /// so held and edge tracking still work per key.
    Other(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Middle,
    Right,
}

impl MouseBtn {
    /// Buttons in snapshot order: left, middle, right.
    pub const ALL: [MouseBtn; 3] = [MouseBtn::Left, MouseBtn::Middle, MouseBtn::Right];
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(MouseBtn),
    MouseUp(MouseBtn),
    MouseMotion { x: f64, y: f64 },
}

impl InputEvent {
    pub fn is_key(&self) -> bool {
        matches!(self, InputEvent::KeyDown(_) | InputEvent::KeyUp(_))
    }

    pub fn is_mouse_button(&self) -> bool {
        matches!(self, InputEvent::MouseDown(_) | InputEvent::MouseUp(_))
    }
}

/// Held set plus the edges seen since the last `end_frame`.
#[derive(Debug)]
struct Buttons<T> {
    held: HashSet<T>,
    pressed: HashSet<T>,
    released: HashSet<T>,
}

impl<T: Copy + Eq + Hash> Buttons<T> {
    fn new() -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
        }
    }

    /// Repeats while held do not produce a second press edge.
    fn press(&mut self, button: T) {
        if self.held.insert(button) {
            self.pressed.insert(button);
        }
    }

    fn release(&mut self, button: T) {
        if self.held.remove(&button) {
            self.released.insert(button);
        }
    }

    fn clear_edges(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

#[derive(Debug)]
pub struct InputState {
    keys: Buttons<Key>,
    mouse: Buttons<MouseBtn>,
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: Buttons::new(),
            mouse: Buttons::new(),
            mouse_position: (0.0, 0.0),
        }
    }

    /// Fold one event into the snapshot. `Quit` leaves it untouched.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
            InputEvent::MouseDown(btn) => self.mouse_down(btn),
            InputEvent::MouseUp(btn) => self.mouse_up(btn),
            InputEvent::MouseMotion { x, y } => self.mouse_position = (x, y),
            InputEvent::Quit => {}
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        self.mouse.press(btn);
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        self.mouse.release(btn);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.keys.pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.keys.released.contains(&key)
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse.held.contains(&btn)
    }

    pub fn is_mouse_just_pressed(&self, btn: MouseBtn) -> bool {
        self.mouse.pressed.contains(&btn)
    }

    pub fn is_mouse_just_released(&self, btn: MouseBtn) -> bool {
        self.mouse.released.contains(&btn)
    }

    /// Held state of left, middle and right buttons.
    pub fn mouse_buttons(&self) -> [bool; 3] {
        MouseBtn::ALL.map(|btn| self.is_mouse_held(btn))
    }

    pub fn any_key_held(&self) -> bool {
        !self.keys.held.is_empty()
    }

    pub fn end_frame(&mut self) {
        self.keys.clear_edges();
        self.mouse.clear_edges();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
