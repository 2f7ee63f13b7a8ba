//! Mouse input state tracking.

use glam::Vec2;
use winit::event::MouseButton as WinitMouseButton;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Middle => Ok(Self::Middle),
            WinitMouseButton::Back => Ok(Self::Back),
            WinitMouseButton::Forward => Ok(Self::Forward),
            WinitMouseButton::Other(_) => Err(()),
        }
    }
}

/// Direction of a single mouse wheel tick, as used by digital bindings.
///
/// The discriminants are the values written after `MWh` in binding strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl WheelDirection {
    /// Parse the numeric form.
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            2 => Some(Self::Left),
            3 => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns `true` if a wheel delta of `(x, y)` moves in this direction.
    #[must_use]
    pub fn moved_by(self, x: f32, y: f32) -> bool {
        match self {
            Self::Up => y > 0.0,
            Self::Down => y < 0.0,
            Self::Left => x < 0.0,
            Self::Right => x > 0.0,
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Mouse input state.
///
/// Motion and wheel deltas accumulate over one application frame and are
/// cleared by [`MouseState::end_frame`].
#[derive(Debug, Default)]
pub struct MouseState {
    /// Relative motion since the last frame.
    motion: Vec2,
    /// Wheel delta since the last frame (x = horizontal, y = vertical).
    wheel: Vec2,
    /// Held buttons, indexed by [`MouseButton`] discriminant.
    buttons: [bool; 5],
}

impl MouseState {
    /// Create a new mouse state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate relative motion.
    pub fn add_motion(&mut self, dx: f32, dy: f32) {
        self.motion += Vec2::new(dx, dy);
    }

    /// Accumulate wheel movement.
    pub fn add_wheel(&mut self, x: f32, y: f32) {
        self.wheel += Vec2::new(x, y);
    }

    /// Record a button transition.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        self.buttons[button as usize] = pressed;
    }

    /// Returns `true` if the button is held.
    #[must_use]
    pub const fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons[button as usize]
    }

    /// Relative motion accumulated this frame.
    #[must_use]
    pub const fn motion(&self) -> Vec2 {
        self.motion
    }

    /// Wheel delta accumulated this frame.
    #[must_use]
    pub const fn wheel(&self) -> Vec2 {
        self.wheel
    }

    /// Reset per-frame deltas.
    pub fn end_frame(&mut self) {
        self.motion = Vec2::ZERO;
        self.wheel = Vec2::ZERO;
    }

    /// Clear all mouse state.
    pub fn clear(&mut self) {
        self.end_frame();
        self.buttons = [false; 5];
    }
}
