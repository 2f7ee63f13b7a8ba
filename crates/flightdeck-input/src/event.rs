//! Host-agnostic input events.
//!
//! The host backend translates whatever its event pump produces into
//! [`InputEvent`]s and feeds them to [`crate::Input::handle_event`] one at a
//! time. Only a subset of kinds can ever satisfy a binding; the rest only
//! update device state.

use crate::joystick::{normalize_axis, HatDirection, JoystickId, JoystickInfo};
use crate::keycode::Keycode;
use crate::modifiers::RawModifiers;
use crate::mouse::MouseButton;

/// A single raw input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A key was pressed. `repeat` is set for auto-repeat presses.
    KeyDown {
        key: Keycode,
        modifiers: RawModifiers,
        repeat: bool,
    },
    /// A key was released.
    KeyUp { key: Keycode, modifiers: RawModifiers },
    /// Modifier state changed without a key event (e.g. focus regained).
    ModifiersChanged(RawModifiers),
    /// A joystick button was pressed.
    JoyButtonDown { joystick: JoystickId, button: u8 },
    /// A joystick button was released.
    JoyButtonUp { joystick: JoystickId, button: u8 },
    /// A hat switch moved.
    JoyHatMotion {
        joystick: JoystickId,
        hat: u8,
        direction: HatDirection,
    },
    /// A joystick axis moved. `value` is normalized to [-1, 1].
    JoyAxisMotion {
        joystick: JoystickId,
        axis: u8,
        value: f32,
    },
    /// The mouse wheel moved. Positive `y` is away from the user, positive `x` is right.
    MouseWheel { x: f32, y: f32 },
    /// A mouse button was pressed.
    MouseButtonDown(MouseButton),
    /// A mouse button was released.
    MouseButtonUp(MouseButton),
    /// Relative mouse motion.
    MouseMotion { dx: f32, dy: f32 },
    /// A joystick was connected.
    JoyDeviceAdded { joystick: JoystickId, info: JoystickInfo },
    /// A joystick was disconnected.
    JoyDeviceRemoved { joystick: JoystickId },
    /// The window lost keyboard focus; held keys will never see their release.
    FocusLost,
}

/// Coarse event category used for matching binding variants against events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Key,
    JoyButton,
    JoyHat,
    JoyAxis,
    MouseWheel,
    /// Never bindable: device lifecycle, mouse buttons and motion, focus.
    Other,
}

impl InputEvent {
    /// Build an axis motion event from a raw signed 16-bit reading.
    #[must_use]
    pub fn joy_axis_raw(joystick: JoystickId, axis: u8, raw: i16) -> Self {
        Self::JoyAxisMotion {
            joystick,
            axis,
            value: normalize_axis(raw),
        }
    }

    /// Shorthand for a non-repeat key press.
    #[must_use]
    pub fn key_down(key: Keycode, modifiers: RawModifiers) -> Self {
        Self::KeyDown {
            key,
            modifiers,
            repeat: false,
        }
    }

    /// Shorthand for a key release.
    #[must_use]
    pub fn key_up(key: Keycode, modifiers: RawModifiers) -> Self {
        Self::KeyUp { key, modifiers }
    }

    /// The category of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::KeyDown { .. } | Self::KeyUp { .. } => EventKind::Key,
            Self::JoyButtonDown { .. } | Self::JoyButtonUp { .. } => EventKind::JoyButton,
            Self::JoyHatMotion { .. } => EventKind::JoyHat,
            Self::JoyAxisMotion { .. } => EventKind::JoyAxis,
            Self::MouseWheel { .. } => EventKind::MouseWheel,
            Self::ModifiersChanged(_)
            | Self::MouseButtonDown(_)
            | Self::MouseButtonUp(_)
            | Self::MouseMotion { .. }
            | Self::JoyDeviceAdded { .. }
            | Self::JoyDeviceRemoved { .. }
            | Self::FocusLost => EventKind::Other,
        }
    }

    /// Returns `true` if any binding could match this event.
    #[must_use]
    pub const fn is_bindable(&self) -> bool {
        !matches!(self.kind(), EventKind::Other)
    }

    /// Returns `true` for events originating from a joystick.
    #[must_use]
    pub const fn is_joystick(&self) -> bool {
        matches!(
            self,
            Self::JoyButtonDown { .. }
                | Self::JoyButtonUp { .. }
                | Self::JoyHatMotion { .. }
                | Self::JoyAxisMotion { .. }
                | Self::JoyDeviceAdded { .. }
                | Self::JoyDeviceRemoved { .. }
        )
    }

    /// Press state carried by the event, for events that have one.
    ///
    /// Hat and wheel events have no natural release and always report pressed.
    #[must_use]
    pub const fn pressed(&self) -> Option<bool> {
        match self {
            Self::KeyDown { .. } | Self::JoyButtonDown { .. } => Some(true),
            Self::KeyUp { .. } | Self::JoyButtonUp { .. } => Some(false),
            Self::JoyHatMotion { .. } | Self::MouseWheel { .. } => Some(true),
            _ => None,
        }
    }
}
