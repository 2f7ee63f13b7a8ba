//! Continuous axes combining analog and digital sources.

use std::fmt;
use std::rc::Rc;

use crate::binding::analog::{JoyAxisBinding, WheelAxisBinding};
use crate::binding::key::KeyBinding;
use crate::binding::{split_slots, AxisCallback, Dispatch, PendingCall, Response};
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::joystick::Joysticks;

/// A named axis in [-1, 1].
///
/// The value is taken from the first active source in the order joystick
/// axis, mouse wheel, digital pair. The digital pair reads `+1` for the
/// positive binding minus `1` for the negative one.
#[derive(Clone, Default)]
pub struct AxisBinding {
    pub axis: JoyAxisBinding,
    pub wheel: WheelAxisBinding,
    pub positive: KeyBinding,
    pub negative: KeyBinding,
    pub enabled: bool,
    callback: Option<AxisCallback>,
}

impl AxisBinding {
    /// An enabled axis with only a digital pair.
    #[must_use]
    pub const fn digital(positive: KeyBinding, negative: KeyBinding) -> Self {
        Self {
            axis: JoyAxisBinding::disabled(),
            wheel: WheelAxisBinding::disabled(),
            positive,
            negative,
            enabled: true,
            callback: None,
        }
    }

    /// Add a joystick axis source.
    #[must_use]
    pub const fn with_axis(mut self, axis: JoyAxisBinding) -> Self {
        self.axis = axis;
        self
    }

    /// Add a mouse wheel source.
    #[must_use]
    pub const fn with_wheel(mut self, wheel: WheelAxisBinding) -> Self {
        self.wheel = wheel;
        self
    }

    /// Install the callback run with the new value after a matching event.
    pub fn set_callback(&mut self, callback: impl Fn(f32) + 'static) {
        self.callback = Some(Rc::new(callback));
    }

    /// Remove the callback.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Returns `true` if any source is currently active.
    #[must_use]
    pub fn is_active(&self, devices: &DeviceState) -> bool {
        self.enabled
            && (self.axis.is_active(devices)
                || self.wheel.is_active(devices)
                || self.positive.is_active(devices)
                || self.negative.is_active(devices))
    }

    /// Current value, 0 when nothing is active.
    #[must_use]
    pub fn value(&self, devices: &DeviceState) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        if self.axis.is_active(devices) {
            return self.axis.value(devices);
        }
        if self.wheel.is_active(devices) {
            return self.wheel.value(devices);
        }
        let held = |binding: &KeyBinding| if binding.is_active(devices) { 1.0 } else { 0.0 };
        held(&self.positive) - held(&self.negative)
    }

    fn dispatch(&self, devices: &DeviceState) -> Dispatch {
        let call = self
            .callback
            .as_ref()
            .map(|callback| PendingCall::Axis(Rc::clone(callback), self.value(devices)));
        Dispatch::new(Response::Matched, call)
    }

    /// Match `event` without running the callback.
    ///
    /// Any matching source consumes the event. `devices` must already reflect
    /// `event`, so the value handed to the callback includes it.
    #[must_use]
    pub fn check_event(&self, event: &InputEvent, devices: &DeviceState) -> Dispatch {
        if !self.enabled {
            return Dispatch::NO_MATCH;
        }
        let matched = self.axis.matches(event, devices)
            || self.wheel.matches(event, devices)
            || self.positive.matches(event, devices)
            || self.negative.matches(event, devices);
        if matched {
            self.dispatch(devices)
        } else {
            Dispatch::NO_MATCH
        }
    }

    /// Match `event` and run the callback immediately.
    pub fn check_event_and_dispatch(&self, event: &InputEvent, devices: &DeviceState) -> Response {
        self.check_event(event, devices).fire()
    }

    /// Replace every source from an `"<axis>,<wheel>,<positive>,<negative>"` string.
    ///
    /// Behavior flags of the digital pair are kept.
    pub fn set_from_str(&mut self, text: &str, joysticks: &Joysticks) {
        let [axis, wheel, positive, negative] = split_slots::<4>(text);
        self.axis = JoyAxisBinding::parse(axis, joysticks);
        self.wheel = WheelAxisBinding::parse(wheel);
        self.positive = KeyBinding::parse(positive, self.positive.traits, joysticks);
        self.negative = KeyBinding::parse(negative, self.negative.traits, joysticks);
    }

    /// Human readable form listing every bound source.
    #[must_use]
    pub fn describe(&self, joysticks: &Joysticks) -> String {
        let mut parts = Vec::new();
        if self.axis.is_enabled() {
            parts.push(self.axis.describe(joysticks));
        }
        if self.wheel.is_enabled() {
            parts.push(self.wheel.describe());
        }
        if self.positive.is_enabled() || self.negative.is_enabled() {
            parts.push(format!(
                "{} / {}",
                self.positive.describe(joysticks),
                self.negative.describe(joysticks)
            ));
        }
        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl PartialEq for AxisBinding {
    fn eq(&self, other: &Self) -> bool {
        self.axis == other.axis
            && self.wheel == other.wheel
            && self.positive == other.positive
            && self.negative == other.negative
            && self.enabled == other.enabled
    }
}

impl fmt::Debug for AxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisBinding")
            .field("axis", &self.axis)
            .field("wheel", &self.wheel)
            .field("positive", &self.positive)
            .field("negative", &self.negative)
            .field("enabled", &self.enabled)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl fmt::Display for AxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.axis, self.wheel, self.positive, self.negative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::analog::{AxisDirection, WheelAxisKind};
    use crate::joystick::{JoystickGuid, JoystickId, JoystickInfo, JoystickRef};
    use crate::keycode::Keycode;
    use crate::modifiers::RawModifiers;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    fn pitch(stick: JoystickRef) -> AxisBinding {
        AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::key(Keycode::W))
            .with_axis(JoyAxisBinding::new(stick, 1, AxisDirection::Positive))
            .with_wheel(WheelAxisBinding::new(WheelAxisKind::Vertical, AxisDirection::Positive))
    }

    fn devices_with_stick() -> (DeviceState, JoystickRef) {
        let mut devices = DeviceState::new();
        devices.apply(&InputEvent::JoyDeviceAdded {
            joystick: JoystickId(0),
            info: JoystickInfo::new(JoystickGuid([7; 16]), "Stick", 3, 4, 1),
        });
        let stick = devices.joysticks.reference(JoystickId(0)).unwrap();
        (devices, stick)
    }

    #[test]
    fn joystick_beats_wheel_beats_digital() {
        let (mut devices, stick) = devices_with_stick();
        let binding = pitch(stick);

        devices.apply(&InputEvent::key_down(Keycode::S, RawModifiers::empty()));
        devices.apply(&InputEvent::MouseWheel { x: 0.0, y: -0.5 });
        devices.apply(&InputEvent::JoyAxisMotion {
            joystick: stick.id,
            axis: 1,
            value: 0.25,
        });
        assert_relative_eq!(binding.value(&devices), 0.25);

        devices.joysticks.set_axis(stick.id, 1, 0.0);
        assert_relative_eq!(binding.value(&devices), -0.5);

        devices.end_frame();
        assert_relative_eq!(binding.value(&devices), 1.0);
    }

    #[test]
    fn opposite_keys_cancel_exactly() {
        let mut devices = DeviceState::new();
        let binding = AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::key(Keycode::W));

        devices.apply(&InputEvent::key_down(Keycode::S, RawModifiers::empty()));
        assert_relative_eq!(binding.value(&devices), 1.0);
        devices.apply(&InputEvent::key_down(Keycode::W, RawModifiers::empty()));
        assert_eq!(binding.value(&devices), 0.0);
        devices.apply(&InputEvent::key_up(Keycode::S, RawModifiers::empty()));
        assert_relative_eq!(binding.value(&devices), -1.0);
    }

    #[test]
    fn disabled_axis_reads_zero() {
        let mut devices = DeviceState::new();
        let mut binding = AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::disabled());
        binding.enabled = false;
        devices.apply(&InputEvent::key_down(Keycode::S, RawModifiers::empty()));
        assert!(!binding.is_active(&devices));
        assert_eq!(binding.value(&devices), 0.0);
    }

    #[test]
    fn dispatch_reports_current_value() {
        let (mut devices, stick) = devices_with_stick();
        let mut binding = pitch(stick);
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        binding.set_callback(move |value| sink.borrow_mut().push(value));

        let motion = InputEvent::JoyAxisMotion {
            joystick: stick.id,
            axis: 1,
            value: -0.75,
        };
        devices.apply(&motion);
        assert_eq!(binding.check_event_and_dispatch(&motion, &devices), Response::Matched);

        devices.joysticks.set_axis(stick.id, 1, 0.0);
        let press = InputEvent::key_down(Keycode::W, RawModifiers::empty());
        devices.apply(&press);
        assert_eq!(binding.check_event_and_dispatch(&press, &devices), Response::Matched);

        let release = InputEvent::key_up(Keycode::W, RawModifiers::empty());
        devices.apply(&release);
        assert_eq!(binding.check_event_and_dispatch(&release, &devices), Response::Matched);

        let other_axis = InputEvent::JoyAxisMotion {
            joystick: stick.id,
            axis: 2,
            value: 1.0,
        };
        assert_eq!(binding.check_event_and_dispatch(&other_axis, &devices), Response::NoMatch);

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_relative_eq!(log[0], -0.75);
        assert_relative_eq!(log[1], -1.0);
        assert_relative_eq!(log[2], 0.0);
    }

    #[test]
    fn string_has_four_slots() {
        let (devices, stick) = devices_with_stick();
        let binding = pitch(stick);
        let text = binding.to_string();
        assert_eq!(
            text,
            format!("Joy{}/Axis1,MWhV,Key115,Key119", stick.guid)
        );

        let mut parsed = AxisBinding::digital(KeyBinding::disabled(), KeyBinding::disabled());
        parsed.set_from_str(&text, &devices.joysticks);
        assert_eq!(parsed, binding);

        parsed.set_from_str("disabled,-MWhH", &devices.joysticks);
        assert!(!parsed.axis.is_enabled());
        assert_eq!(
            parsed.wheel,
            WheelAxisBinding::new(WheelAxisKind::Horizontal, AxisDirection::Negative)
        );
        assert!(!parsed.positive.is_enabled());
        assert!(!parsed.negative.is_enabled());
    }

    #[test]
    fn describe_lists_sources() {
        let (devices, stick) = devices_with_stick();
        assert_eq!(
            pitch(stick).describe(&devices.joysticks),
            "Stick Axis 1, Mouse wheel vertical, S / W"
        );
        assert_eq!(AxisBinding::default().describe(&devices.joysticks), "None");
    }
}
