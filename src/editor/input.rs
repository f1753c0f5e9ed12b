use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Mouse buttons currently held down.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

impl MouseButtons {
    /// Middle, or left and right together: the buttons that translate along
    /// the view axis.
    #[must_use]
    pub fn is_depth_drag(self) -> bool {
        self.contains(Self::MIDDLE) || self.contains(Self::LEFT | Self::RIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::LEFT,
            MouseButton::Right => Self::RIGHT,
            MouseButton::Middle => Self::MIDDLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Pointer tracking for drag gestures.
///
/// Positions are stored in GL window coordinates (origin bottom-left); the
/// handlers take window-system coordinates (origin top-left) and flip them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Position at the last button event or motion event.
    pub position: Vec2,
    pub buttons: MouseButtons,
}

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a window-system position to GL window coordinates.
    #[must_use]
    pub fn to_gl(x: f32, y: f32, window_height: u32) -> Vec2 {
        Vec2::new(x, window_height as f32 - y - 1.0)
    }

    pub fn handle_button(&mut self, button: MouseButton, state: ButtonState, position: Vec2) {
        self.position = position;
        match state {
            ButtonState::Pressed => self.buttons.insert(button.into()),
            ButtonState::Released => self.buttons.remove(button.into()),
        }
    }

    /// Records a motion event and returns the delta from the previous
    /// position.
    pub fn handle_move(&mut self, position: Vec2) -> Vec2 {
        let delta = position - self.position;
        self.position = position;
        delta
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !self.buttons.is_empty()
    }
}
