//! Digital bindings: one physical input that is either on or off.

use std::fmt;

use bitflags::bitflags;
use tracing::debug;

use crate::binding::parse::Cursor;
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::joystick::{HatDirection, JoystickRef, Joysticks};
use crate::keycode::Keycode;
use crate::modifiers::Modifiers;
use crate::mouse::WheelDirection;

bitflags! {
    /// Per-binding behavior switches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BehaviorFlags: u8 {
        /// Ignore modifier state entirely when matching, and never persist `Mod`.
        const DISALLOW_MODIFIER = 0b01;
        /// Only keyboard and mouse bindings survive; joystick bindings are
        /// written without their device and parse back as disabled.
        const ALLOW_KEYBOARD_ONLY = 0b10;
    }
}

/// The physical input a [`KeyBinding`] listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyBindingKind {
    /// Bound to nothing. Never matches, never active.
    #[default]
    Disabled,
    /// A keyboard key.
    Key(Keycode),
    /// A joystick button.
    JoyButton { device: JoystickRef, button: u8 },
    /// A joystick hat pointing in (at least) `direction`.
    JoyHat {
        device: JoystickRef,
        hat: u8,
        direction: HatDirection,
    },
    /// One tick of the mouse wheel.
    Wheel(WheelDirection),
}

/// A single digital binding with its required modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyBinding {
    pub kind: KeyBindingKind,
    pub modifiers: Modifiers,
    pub traits: BehaviorFlags,
}

impl KeyBinding {
    /// A binding that never fires.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            kind: KeyBindingKind::Disabled,
            modifiers: Modifiers::empty(),
            traits: BehaviorFlags::empty(),
        }
    }

    /// Bind a keyboard key with no modifiers.
    #[must_use]
    pub const fn key(key: Keycode) -> Self {
        Self {
            kind: KeyBindingKind::Key(key),
            ..Self::disabled()
        }
    }

    /// Bind a joystick button.
    #[must_use]
    pub const fn joy_button(device: JoystickRef, button: u8) -> Self {
        Self {
            kind: KeyBindingKind::JoyButton { device, button },
            ..Self::disabled()
        }
    }

    /// Bind a joystick hat direction.
    #[must_use]
    pub const fn joy_hat(device: JoystickRef, hat: u8, direction: HatDirection) -> Self {
        Self {
            kind: KeyBindingKind::JoyHat {
                device,
                hat,
                direction,
            },
            ..Self::disabled()
        }
    }

    /// Bind a mouse wheel direction.
    #[must_use]
    pub const fn wheel(direction: WheelDirection) -> Self {
        Self {
            kind: KeyBindingKind::Wheel(direction),
            ..Self::disabled()
        }
    }

    /// Require an exact modifier combination.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set behavior flags.
    #[must_use]
    pub const fn with_traits(mut self, traits: BehaviorFlags) -> Self {
        self.traits = traits;
        self
    }

    /// Returns `true` unless the binding is [`KeyBindingKind::Disabled`].
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self.kind, KeyBindingKind::Disabled)
    }

    /// Joystick device this binding refers to, if any.
    #[must_use]
    pub const fn device(&self) -> Option<JoystickRef> {
        match self.kind {
            KeyBindingKind::JoyButton { device, .. } | KeyBindingKind::JoyHat { device, .. } => {
                Some(device)
            }
            _ => None,
        }
    }

    fn modifiers_ok(&self, current: Modifiers) -> bool {
        self.traits.contains(BehaviorFlags::DISALLOW_MODIFIER) || self.modifiers.matches(current)
    }

    /// Returns `true` if `event` is an occurrence of this binding's input.
    ///
    /// Key events are compared against the modifiers they carry; every other
    /// event kind against the modifiers currently held.
    #[must_use]
    pub fn matches(&self, event: &InputEvent, devices: &DeviceState) -> bool {
        match (self.kind, event) {
            (
                KeyBindingKind::Key(bound),
                InputEvent::KeyDown { key, modifiers, .. } | InputEvent::KeyUp { key, modifiers },
            ) => bound == *key && self.modifiers_ok(Modifiers::unify(*modifiers)),
            (
                KeyBindingKind::JoyButton { device, button },
                InputEvent::JoyButtonDown { joystick, button: b }
                | InputEvent::JoyButtonUp { joystick, button: b },
            ) => device.id == *joystick && button == *b && self.modifiers_ok(devices.modifiers()),
            (
                KeyBindingKind::JoyHat {
                    device,
                    hat,
                    direction,
                },
                InputEvent::JoyHatMotion {
                    joystick,
                    hat: h,
                    direction: d,
                },
            ) => {
                device.id == *joystick
                    && hat == *h
                    && d.contains(direction)
                    && self.modifiers_ok(devices.modifiers())
            }
            (KeyBindingKind::Wheel(direction), InputEvent::MouseWheel { x, y }) => {
                direction.moved_by(*x, *y) && self.modifiers_ok(devices.modifiers())
            }
            _ => false,
        }
    }

    /// Returns `true` if the bound input is currently held.
    #[must_use]
    pub fn is_active(&self, devices: &DeviceState) -> bool {
        let held = match self.kind {
            KeyBindingKind::Disabled => return false,
            KeyBindingKind::Key(key) => devices.keyboard.is_pressed(key),
            KeyBindingKind::JoyButton { device, button } => devices.joysticks.button(device.id, button),
            KeyBindingKind::JoyHat {
                device,
                hat,
                direction,
            } => devices.joysticks.hat(device.id, hat).contains(direction),
            KeyBindingKind::Wheel(direction) => {
                let wheel = devices.mouse.wheel();
                direction.moved_by(wheel.x, wheel.y)
            }
        };
        held && self.modifiers_ok(devices.modifiers())
    }

    /// Parse a binding string, keeping `traits`.
    ///
    /// Anything that does not parse, or names a joystick that is not
    /// connected, yields a disabled binding.
    #[must_use]
    pub fn parse(text: &str, traits: BehaviorFlags, joysticks: &Joysticks) -> Self {
        Self::try_parse(text, traits, joysticks).unwrap_or_else(|| {
            if text != "disabled" {
                debug!("Binding {:?} did not parse, disabling it", text);
            }
            Self::disabled().with_traits(traits)
        })
    }

    fn try_parse(text: &str, traits: BehaviorFlags, joysticks: &Joysticks) -> Option<Self> {
        let mut cursor = Cursor::new(text);

        let kind = if cursor.eat("disabled") {
            KeyBindingKind::Disabled
        } else if cursor.eat("Key") {
            KeyBindingKind::Key(Keycode(cursor.uint()?))
        } else if cursor.eat("MWh") {
            KeyBindingKind::Wheel(WheelDirection::from_index(cursor.uint()?)?)
        } else if cursor.eat("Joy") {
            if traits.contains(BehaviorFlags::ALLOW_KEYBOARD_ONLY) {
                return None;
            }
            let device = cursor.device(joysticks)?;
            if cursor.eat("Button") {
                KeyBindingKind::JoyButton {
                    device,
                    button: cursor.uint()?,
                }
            } else if cursor.eat("Hat") {
                let hat = cursor.uint()?;
                if !cursor.eat("Dir") {
                    return None;
                }
                let direction = HatDirection::from_bits(cursor.uint()?).filter(|d| !d.is_empty())?;
                KeyBindingKind::JoyHat {
                    device,
                    hat,
                    direction,
                }
            } else {
                return None;
            }
        } else {
            return None;
        };

        let mut modifiers = Modifiers::empty();
        if cursor.eat("Mod") {
            let mask = cursor.uint()?;
            // Bindings that ignore modifiers drop a stored mask.
            if !traits.contains(BehaviorFlags::DISALLOW_MODIFIER) {
                modifiers = Modifiers::from_mask(mask);
            }
        }

        cursor.is_empty().then_some(Self {
            kind,
            modifiers,
            traits,
        })
    }

    /// Human readable form for options screens.
    #[must_use]
    pub fn describe(&self, joysticks: &Joysticks) -> String {
        let mods = if self.traits.contains(BehaviorFlags::DISALLOW_MODIFIER) {
            String::new()
        } else {
            self.modifiers.describe_prefix()
        };
        match self.kind {
            KeyBindingKind::Disabled => "None".to_string(),
            KeyBindingKind::Key(key) => format!("{mods}{key}"),
            KeyBindingKind::JoyButton { device, button } => {
                format!("{mods}{} Button {button}", joysticks.label(device.id))
            }
            KeyBindingKind::JoyHat {
                device,
                hat,
                direction,
            } => format!(
                "{mods}{} Hat {hat} {}",
                joysticks.label(device.id),
                direction.describe()
            ),
            KeyBindingKind::Wheel(direction) => format!("{mods}Mouse wheel {}", direction.name()),
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyboard_only = self.traits.contains(BehaviorFlags::ALLOW_KEYBOARD_ONLY);
        let write_device = |f: &mut fmt::Formatter<'_>, device: JoystickRef| {
            if keyboard_only {
                f.write_str("Joy/")
            } else {
                write!(f, "Joy{}/", device.guid)
            }
        };

        match self.kind {
            KeyBindingKind::Disabled => return f.write_str("disabled"),
            KeyBindingKind::Key(key) => write!(f, "Key{}", key.code())?,
            KeyBindingKind::JoyButton { device, button } => {
                write_device(f, device)?;
                write!(f, "Button{button}")?;
            }
            KeyBindingKind::JoyHat {
                device,
                hat,
                direction,
            } => {
                write_device(f, device)?;
                write!(f, "Hat{hat}Dir{}", direction.bits())?;
            }
            KeyBindingKind::Wheel(direction) => write!(f, "MWh{}", direction as u8)?,
        }

        if !self.traits.contains(BehaviorFlags::DISALLOW_MODIFIER) && !self.modifiers.is_empty() {
            write!(f, "Mod{}", self.modifiers.bits())?;
        }
        Ok(())
    }
}
