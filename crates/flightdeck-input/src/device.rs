//! Current raw device state.

use crate::event::InputEvent;
use crate::joystick::Joysticks;
use crate::keyboard::KeyboardState;
use crate::modifiers::Modifiers;
use crate::mouse::MouseState;

/// Snapshot of every input device the engine knows about.
///
/// Bindings never cache anything; every `is_active`/`value` query reads
/// straight from here.
#[derive(Debug)]
pub struct DeviceState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub joysticks: Joysticks,
    /// When `false`, joystick events neither update state nor dispatch.
    joystick_enabled: bool,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            keyboard: KeyboardState::default(),
            mouse: MouseState::default(),
            joysticks: Joysticks::default(),
            joystick_enabled: true,
        }
    }
}

impl DeviceState {
    /// Create a state with nothing pressed and no joysticks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical modifier state.
    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.keyboard.modifiers()
    }

    /// Whether joystick input is processed.
    #[must_use]
    pub const fn joystick_enabled(&self) -> bool {
        self.joystick_enabled
    }

    /// Enable or disable joystick processing. Disabling releases every control.
    pub fn set_joystick_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.joysticks.release_all();
        }
        self.joystick_enabled = enabled;
    }

    /// Fold one event into the state.
    ///
    /// Returns `false` if the event was dropped because joysticks are disabled.
    /// Device connects are always recorded so GUIDs keep resolving.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers, .. } => {
                self.keyboard.set_key(*key, true, *modifiers);
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.keyboard.set_key(*key, false, *modifiers);
            }
            InputEvent::ModifiersChanged(modifiers) => self.keyboard.set_modifiers(*modifiers),
            InputEvent::MouseWheel { x, y } => self.mouse.add_wheel(*x, *y),
            InputEvent::MouseButtonDown(button) => self.mouse.set_button(*button, true),
            InputEvent::MouseButtonUp(button) => self.mouse.set_button(*button, false),
            InputEvent::MouseMotion { dx, dy } => self.mouse.add_motion(*dx, *dy),
            InputEvent::JoyDeviceAdded { joystick, info } => {
                self.joysticks.connect(*joystick, info.clone());
            }
            InputEvent::JoyDeviceRemoved { joystick } => self.joysticks.disconnect(*joystick),
            InputEvent::FocusLost => {
                self.keyboard.clear();
                self.mouse.clear();
            }
            InputEvent::JoyButtonDown { .. }
            | InputEvent::JoyButtonUp { .. }
            | InputEvent::JoyHatMotion { .. }
            | InputEvent::JoyAxisMotion { .. }
                if !self.joystick_enabled =>
            {
                return false;
            }
            InputEvent::JoyButtonDown { joystick, button } => {
                self.joysticks.set_button(*joystick, *button, true);
            }
            InputEvent::JoyButtonUp { joystick, button } => {
                self.joysticks.set_button(*joystick, *button, false);
            }
            InputEvent::JoyHatMotion {
                joystick,
                hat,
                direction,
            } => self.joysticks.set_hat(*joystick, *hat, *direction),
            InputEvent::JoyAxisMotion {
                joystick,
                axis,
                value,
            } => self.joysticks.set_axis(*joystick, *axis, *value),
        }
        true
    }

    /// Reset per-frame deltas (wheel, motion).
    pub fn end_frame(&mut self) {
        self.mouse.end_frame();
    }
}
