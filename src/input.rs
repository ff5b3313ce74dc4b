//! Keyboard and mouse state gathered from window events between two frames.

use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Set of currently held keys.
#[derive(Debug, Default, Clone)]
pub struct Keys {
    pressed: HashSet<KeyCode>,
}

impl Keys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        if self.pressed.insert(key) {
            log::debug!("Pressed key: {key:?}");
        }
    }

    pub fn release(&mut self, key: KeyCode) {
        if self.pressed.remove(&key) {
            log::debug!("Released key: {key:?}");
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

impl<const N: usize> From<[KeyCode; N]> for Keys {
    fn from(keys: [KeyCode; N]) -> Self {
        Self {
            pressed: keys.into_iter().collect(),
        }
    }
}

/// Cursor movement since the last read. The very first cursor position only
/// seeds `last`, so the initial jump from wherever the OS put the cursor
/// is not reported as movement.
#[derive(Debug, Default, Clone)]
pub struct Mouse {
    last: Option<(f64, f64)>,
    x_change: f32,
    y_change: f32,
}

impl Mouse {
    pub fn moved_to(&mut self, x: f64, y: f64) {
        let (last_x, last_y) = self.last.unwrap_or((x, y));
        self.x_change += (x - last_x) as f32;
        self.y_change += (y - last_y) as f32;
        self.last = Some((x, y));
        log::trace!("x: {} y: {}", self.x_change, self.y_change);
    }

    /// Returns the horizontal change and resets it.
    pub fn take_x_change(&mut self) -> f32 {
        std::mem::take(&mut self.x_change)
    }

    /// Returns the vertical change and resets it.
    pub fn take_y_change(&mut self) -> f32 {
        std::mem::take(&mut self.y_change)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Input {
    pub keys: Keys,
    pub mouse: Mouse,
    close_requested: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one window event. Escape marks the window for closing.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => self.handle_key(*key, *state),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.moved_to(position.x, position.y)
            }
            WindowEvent::CloseRequested => self.close_requested = true,
            _ => (),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if key == KeyCode::Escape {
                    self.close_requested = true;
                }
                self.keys.press(key);
            }
            ElementState::Released => self.keys.release(key),
        }
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }
}
