//! Translation from raw window input to simulation ticks.
//!
//! The sim consumes `TickInput` in playfield coordinates; this module owns
//! the keycode mapping and the window-to-playfield pointer conversion, so
//! everything above it stays winit-free and testable.

use engine::app::InputFrame;
use engine::viewport::Viewport;
use winit::event::VirtualKeyCode;

use crate::input::{Key, TickInput};

pub fn map_key(key: VirtualKeyCode) -> Option<Key> {
    match key {
        VirtualKeyCode::Up | VirtualKeyCode::W => Some(Key::Up),
        VirtualKeyCode::Down | VirtualKeyCode::S => Some(Key::Down),
        VirtualKeyCode::Left | VirtualKeyCode::A => Some(Key::Left),
        VirtualKeyCode::Right | VirtualKeyCode::D => Some(Key::Right),
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Some(Key::Enter),
        VirtualKeyCode::Escape => Some(Key::Escape),
        VirtualKeyCode::Space => Some(Key::Space),
        VirtualKeyCode::Y => Some(Key::Y),
        VirtualKeyCode::N => Some(Key::N),
        VirtualKeyCode::P => Some(Key::P),
        _ => None,
    }
}

fn any_held(frame: &InputFrame, keys: &[VirtualKeyCode]) -> bool {
    keys.iter().any(|&k| frame.key_held(k))
}

/// Builds one tick from the frame's raw input. Aliased keys (arrows and
/// WASD) collapse to a single press edge.
pub fn tick_input(frame: &InputFrame, viewport: &Viewport, dt: f32) -> TickInput {
    let mut pressed: Vec<Key> = Vec::new();
    for &code in &frame.keys_pressed {
        if let Some(key) = map_key(code) {
            if !pressed.contains(&key) {
                pressed.push(key);
            }
        }
    }

    let host = viewport.host();
    TickInput {
        dt,
        pressed,
        up_held: any_held(frame, &[VirtualKeyCode::Up, VirtualKeyCode::W]),
        down_held: any_held(frame, &[VirtualKeyCode::Down, VirtualKeyCode::S]),
        left_held: any_held(frame, &[VirtualKeyCode::Left, VirtualKeyCode::A]),
        right_held: any_held(frame, &[VirtualKeyCode::Right, VirtualKeyCode::D]),
        pointer: frame.pointer_pos.map(|(x, y)| viewport.window_to_canvas(x, y)),
        pointer_pressed: frame.pointer_pressed,
        pointer_released: frame.pointer_released,
        pointer_held: frame.pointer_held,
        focused: frame.focused,
        close_requested: frame.close_requested,
        host_width: host.width,
        host_height: host.height,
    }
}
