//! Translation from winit window events to controller `InputEvent`s.
//!
//! Bound keys map to their named `Key`; every other physical key becomes
//! `Key::Other` so "any key" screens still see it, without states ever handling
//! platform key codes. OS key repeat is filtered out: a held key produces one
//! `KeyDown` and one `KeyUp`.

use std::hash::{DefaultHasher, Hash, Hasher};

use sf_core::input::{InputEvent, Key, MouseBtn};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CloseRequested => Some(InputEvent::Quit),
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat {
                return None;
            }
            let key = map_key(event.physical_key);
            Some(match event.state {
                ElementState::Pressed => InputEvent::KeyDown(key),
                ElementState::Released => InputEvent::KeyUp(key),
            })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let btn = map_mouse_button(*button)?;
            Some(match state {
                ElementState::Pressed => InputEvent::MouseDown(btn),
                ElementState::Released => InputEvent::MouseUp(btn),
            })
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMotion {
            x: position.x,
            y: position.y,
        }),
        _ => None,
    }
}

/// Every physical key maps to some `Key`.
pub fn map_key(physical: PhysicalKey) -> Key {
    match physical {
        PhysicalKey::Code(code) => bound_key(code).unwrap_or_else(|| unbound_key(&physical)),
        PhysicalKey::Unidentified(_) => unbound_key(&physical),
    }
}

/// Keys with a name of their own.
pub fn bound_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::F3 => Some(Key::F3),
        KeyCode::F4 => Some(Key::F4),
        KeyCode::F5 => Some(Key::F5),
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyR => Some(Key::R),
        _ => None,
    }
}

fn unbound_key(physical: &PhysicalKey) -> Key {
    let mut hasher = DefaultHasher::new();
    physical.hash(&mut hasher);
    Key::Other(hasher.finish())
}

pub fn map_mouse_button(button: MouseButton) -> Option<MouseBtn> {
    match button {
        MouseButton::Left => Some(MouseBtn::Left),
        MouseButton::Middle => Some(MouseBtn::Middle),
        MouseButton::Right => Some(MouseBtn::Right),
        _ => None,
    }
}
