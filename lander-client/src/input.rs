//! Keyboard polling.

use lander_core::InputState;
use sdl2::{EventPump, event::Event, event::WindowEvent, keyboard::Scancode};

/// Drains pending events and samples the arrow keys.
///
/// Only the held state matters, so key presses are read from the keyboard
/// snapshot after the queue is empty rather than from individual events.
pub fn poll(event_pump: &mut EventPump) -> InputState {
    let mut input = InputState::default();

    for event in event_pump.poll_iter() {
        match event {
            Event::Quit { .. }
            | Event::Window {
                win_event: WindowEvent::Close,
                ..
            } => input.quit = true,
            _ => {}
        }
    }

    let keys = event_pump.keyboard_state();
    input.left = keys.is_scancode_pressed(Scancode::Left);
    input.right = keys.is_scancode_pressed(Scancode::Right);
    input
}
