//! Analog bindings: joystick axes and the mouse wheel as continuous sources.

use std::fmt;

use tracing::debug;

use crate::binding::parse::Cursor;
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::joystick::{JoystickRef, Joysticks};
use crate::modifiers::Modifiers;

/// Sign applied to an analog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisDirection {
    #[default]
    Positive,
    Negative,
}

impl AxisDirection {
    #[inline]
    const fn apply(self, value: f32) -> f32 {
        match self {
            Self::Positive => value,
            Self::Negative => -value,
        }
    }

    const fn prefix(self) -> &'static str {
        match self {
            Self::Positive => "",
            Self::Negative => "-",
        }
    }
}

/// A joystick axis with deadzone and sensitivity shaping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoyAxisBinding {
    /// `None` when the binding is disabled.
    pub device: Option<JoystickRef>,
    pub axis: u8,
    pub direction: AxisDirection,
    /// Fraction of travel around center that reads as zero, in [0, 1].
    pub deadzone: f32,
    /// Gain applied after the deadzone is removed, >= 0.
    pub sensitivity: f32,
    pub modifiers: Modifiers,
}

impl Default for JoyAxisBinding {
    fn default() -> Self {
        Self::disabled()
    }
}

impl JoyAxisBinding {
    /// A binding that is never active.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            device: None,
            axis: 0,
            direction: AxisDirection::Positive,
            deadzone: 0.0,
            sensitivity: 1.0,
            modifiers: Modifiers::empty(),
        }
    }

    /// Bind an axis with no deadzone and unit sensitivity.
    #[must_use]
    pub const fn new(device: JoystickRef, axis: u8, direction: AxisDirection) -> Self {
        Self {
            device: Some(device),
            axis,
            direction,
            ..Self::disabled()
        }
    }

    /// Set the deadzone, clamped to [0, 1].
    #[must_use]
    pub fn with_deadzone(mut self, deadzone: f32) -> Self {
        self.deadzone = deadzone.clamp(0.0, 1.0);
        self
    }

    /// Set the sensitivity, clamped to >= 0.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity.max(0.0);
        self
    }

    /// Require an exact modifier combination.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` if a device is bound.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.device.is_some()
    }

    /// Map a raw reading in [-1, 1] to the binding's output.
    ///
    /// Readings inside the deadzone give 0. The remaining travel is rescaled
    /// to [0, 1], multiplied by the sensitivity, clamped, and given back the
    /// sign of the input (flipped for [`AxisDirection::Negative`]).
    #[must_use]
    pub fn shape(&self, raw: f32) -> f32 {
        let magnitude = raw.abs().min(1.0);
        if magnitude < self.deadzone || self.deadzone >= 1.0 {
            return 0.0;
        }
        let scaled = ((magnitude - self.deadzone) / (1.0 - self.deadzone) * self.sensitivity).clamp(0.0, 1.0);
        self.direction.apply(scaled.copysign(raw))
    }

    /// Returns `true` if the device is connected, the modifiers match, and the
    /// stick is outside the deadzone.
    #[must_use]
    pub fn is_active(&self, devices: &DeviceState) -> bool {
        let Some(device) = self.device else {
            return false;
        };
        devices.joysticks.is_connected(device.id)
            && self.modifiers.matches(devices.modifiers())
            && devices.joysticks.axis(device.id, self.axis).abs() > self.deadzone
    }

    /// Current shaped value, 0 when not active.
    #[must_use]
    pub fn value(&self, devices: &DeviceState) -> f32 {
        match self.device {
            Some(device) if self.is_active(devices) => self.shape(devices.joysticks.axis(device.id, self.axis)),
            _ => 0.0,
        }
    }

    /// Returns `true` if `event` is motion on the bound axis.
    #[must_use]
    pub fn matches(&self, event: &InputEvent, devices: &DeviceState) -> bool {
        match (self.device, event) {
            (Some(device), InputEvent::JoyAxisMotion { joystick, axis, .. }) => {
                device.id == *joystick && self.axis == *axis && self.modifiers.matches(devices.modifiers())
            }
            _ => false,
        }
    }

    /// Parse `[-]Joy<guid>/Axis<n>[/DZ<f>][/E<f>][Mod<n>]`. Failures disable.
    #[must_use]
    pub fn parse(text: &str, joysticks: &Joysticks) -> Self {
        Self::try_parse(text, joysticks).unwrap_or_else(|| {
            if text != "disabled" {
                debug!("Axis binding {:?} did not parse, disabling it", text);
            }
            Self::disabled()
        })
    }

    fn try_parse(text: &str, joysticks: &Joysticks) -> Option<Self> {
        let mut cursor = Cursor::new(text);
        if cursor.eat("disabled") {
            return cursor.is_empty().then(Self::disabled);
        }

        let direction = if cursor.eat("-") {
            AxisDirection::Negative
        } else {
            AxisDirection::Positive
        };
        if !cursor.eat("Joy") {
            return None;
        }
        let device = cursor.device(joysticks)?;
        if !cursor.eat("Axis") {
            return None;
        }
        let mut binding = Self::new(device, cursor.uint()?, direction);

        if cursor.eat("/DZ") {
            binding = binding.with_deadzone(cursor.float()?);
        }
        if cursor.eat("/E") {
            binding = binding.with_sensitivity(cursor.float()?);
        }
        if cursor.eat("Mod") {
            binding.modifiers = Modifiers::from_mask(cursor.uint()?);
        }

        cursor.is_empty().then_some(binding)
    }

    /// Human readable form for options screens.
    #[must_use]
    pub fn describe(&self, joysticks: &Joysticks) -> String {
        let Some(device) = self.device else {
            return "None".to_string();
        };
        format!(
            "{}{}{} Axis {}",
            self.modifiers.describe_prefix(),
            self.direction.prefix(),
            joysticks.label(device.id),
            self.axis
        )
    }
}

impl fmt::Display for JoyAxisBinding {
    #[allow(clippy::float_cmp)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(device) = self.device else {
            return f.write_str("disabled");
        };
        write!(f, "{}Joy{}/Axis{}", self.direction.prefix(), device.guid, self.axis)?;
        if self.deadzone != 0.0 {
            write!(f, "/DZ{}", self.deadzone)?;
        }
        if self.sensitivity != 1.0 {
            write!(f, "/E{}", self.sensitivity)?;
        }
        if !self.modifiers.is_empty() {
            write!(f, "Mod{}", self.modifiers.bits())?;
        }
        Ok(())
    }
}

/// Which wheel axis a [`WheelAxisBinding`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelAxisKind {
    #[default]
    Disabled,
    Vertical,
    Horizontal,
}

/// The mouse wheel read as an axis for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WheelAxisBinding {
    pub kind: WheelAxisKind,
    pub direction: AxisDirection,
    pub modifiers: Modifiers,
}

impl WheelAxisBinding {
    /// A binding that is never active.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            kind: WheelAxisKind::Disabled,
            direction: AxisDirection::Positive,
            modifiers: Modifiers::empty(),
        }
    }

    /// Bind a wheel axis.
    #[must_use]
    pub const fn new(kind: WheelAxisKind, direction: AxisDirection) -> Self {
        Self {
            kind,
            direction,
            modifiers: Modifiers::empty(),
        }
    }

    /// Require an exact modifier combination.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns `true` unless the binding is disabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        !matches!(self.kind, WheelAxisKind::Disabled)
    }

    fn delta(&self, x: f32, y: f32) -> f32 {
        match self.kind {
            WheelAxisKind::Disabled => 0.0,
            WheelAxisKind::Vertical => y,
            WheelAxisKind::Horizontal => x,
        }
    }

    /// Returns `true` if the wheel moved on this axis during the current frame
    /// and the modifiers match.
    #[must_use]
    pub fn is_active(&self, devices: &DeviceState) -> bool {
        let wheel = devices.mouse.wheel();
        self.delta(wheel.x, wheel.y) != 0.0 && self.modifiers.matches(devices.modifiers())
    }

    /// This frame's wheel delta on the axis, clamped to [-1, 1]; 0 when inactive.
    #[must_use]
    pub fn value(&self, devices: &DeviceState) -> f32 {
        if !self.is_active(devices) {
            return 0.0;
        }
        let wheel = devices.mouse.wheel();
        self.direction.apply(self.delta(wheel.x, wheel.y).clamp(-1.0, 1.0))
    }

    /// Returns `true` if `event` moves the wheel on this axis.
    #[must_use]
    pub fn matches(&self, event: &InputEvent, devices: &DeviceState) -> bool {
        match event {
            InputEvent::MouseWheel { x, y } => {
                self.delta(*x, *y) != 0.0 && self.modifiers.matches(devices.modifiers())
            }
            _ => false,
        }
    }

    /// Parse `[-]MWh<V|H>[Mod<n>]`. Failures disable.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_else(|| {
            if text != "disabled" {
                debug!("Wheel binding {:?} did not parse, disabling it", text);
            }
            Self::disabled()
        })
    }

    fn try_parse(text: &str) -> Option<Self> {
        let mut cursor = Cursor::new(text);
        if cursor.eat("disabled") {
            return cursor.is_empty().then(Self::disabled);
        }

        let direction = if cursor.eat("-") {
            AxisDirection::Negative
        } else {
            AxisDirection::Positive
        };
        if !cursor.eat("MWh") {
            return None;
        }
        let kind = if cursor.eat("V") {
            WheelAxisKind::Vertical
        } else if cursor.eat("H") {
            WheelAxisKind::Horizontal
        } else {
            return None;
        };
        let mut binding = Self::new(kind, direction);
        if cursor.eat("Mod") {
            binding.modifiers = Modifiers::from_mask(cursor.uint()?);
        }
        cursor.is_empty().then_some(binding)
    }

    /// Human readable form for options screens.
    #[must_use]
    pub fn describe(&self) -> String {
        let axis = match self.kind {
            WheelAxisKind::Disabled => return "None".to_string(),
            WheelAxisKind::Vertical => "vertical",
            WheelAxisKind::Horizontal => "horizontal",
        };
        format!(
            "{}{}Mouse wheel {axis}",
            self.modifiers.describe_prefix(),
            self.direction.prefix()
        )
    }
}

impl fmt::Display for WheelAxisBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.kind {
            WheelAxisKind::Disabled => return f.write_str("disabled"),
            WheelAxisKind::Vertical => 'V',
            WheelAxisKind::Horizontal => 'H',
        };
        write!(f, "{}MWh{axis}", self.direction.prefix())?;
        if !self.modifiers.is_empty() {
            write!(f, "Mod{}", self.modifiers.bits())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joystick::{JoystickGuid, JoystickId, JoystickInfo};
    use crate::modifiers::RawModifiers;
    use approx::assert_relative_eq;

    const GUID: &str = "03000000c82d00000161000000010000";

    fn devices_with_stick() -> (DeviceState, JoystickRef) {
        let mut devices = DeviceState::new();
        let guid: JoystickGuid = GUID.parse().unwrap();
        devices
            .joysticks
            .connect(JoystickId(0), JoystickInfo::new(guid, "Stick", 4, 12, 1));
        let device = devices.joysticks.reference(JoystickId(0)).unwrap();
        (devices, device)
    }

    #[test]
    fn shape_applies_deadzone_and_rescales() {
        let (_, stick) = devices_with_stick();
        let binding = JoyAxisBinding::new(stick, 0, AxisDirection::Positive).with_deadzone(0.2);

        assert_relative_eq!(binding.shape(0.1), 0.0);
        assert_relative_eq!(binding.shape(-0.19), 0.0);
        assert_relative_eq!(binding.shape(0.2), 0.0);
        assert_relative_eq!(binding.shape(0.6), 0.5, epsilon = 1e-6);
        assert_relative_eq!(binding.shape(-0.6), -0.5, epsilon = 1e-6);
        assert_relative_eq!(binding.shape(1.0), 1.0);
    }

    #[test]
    fn shape_sensitivity_and_direction() {
        let (_, stick) = devices_with_stick();
        let binding = JoyAxisBinding::new(stick, 0, AxisDirection::Negative).with_sensitivity(2.0);

        assert_relative_eq!(binding.shape(0.25), -0.5);
        assert_relative_eq!(binding.shape(-0.25), 0.5);
        // Clamped to full deflection.
        assert_relative_eq!(binding.shape(0.9), -1.0);
    }

    #[test]
    fn shape_full_deadzone_is_silent() {
        let (_, stick) = devices_with_stick();
        let binding = JoyAxisBinding::new(stick, 0, AxisDirection::Positive).with_deadzone(1.0);
        assert_relative_eq!(binding.shape(1.0), 0.0);
    }

    #[test]
    fn shape_is_monotonic_above_deadzone() {
        let (_, stick) = devices_with_stick();
        for direction in [AxisDirection::Positive, AxisDirection::Negative] {
            let binding = JoyAxisBinding::new(stick, 1, direction)
                .with_deadzone(0.15)
                .with_sensitivity(1.3);
            let sign = match direction {
                AxisDirection::Positive => 1.0,
                AxisDirection::Negative => -1.0,
            };
            let mut previous = 0.0_f32;
            for step in 15..=100 {
                let raw = step as f32 / 100.0;
                let value = binding.shape(raw) * sign;
                assert!(value >= previous, "{raw}: {value} < {previous}");
                previous = value;
            }
        }
    }

    #[test]
    fn activity_follows_device_state() {
        let (mut devices, stick) = devices_with_stick();
        let binding = JoyAxisBinding::new(stick, 2, AxisDirection::Positive).with_deadzone(0.1);

        assert!(!binding.is_active(&devices));
        assert_relative_eq!(binding.value(&devices), 0.0);

        devices.joysticks.set_axis(stick.id, 2, 0.55);
        assert!(binding.is_active(&devices));
        assert_relative_eq!(binding.value(&devices), 0.5, epsilon = 1e-6);

        devices.apply(&InputEvent::ModifiersChanged(RawModifiers::LCTRL));
        assert!(!binding.is_active(&devices));
        devices.apply(&InputEvent::ModifiersChanged(RawModifiers::empty()));

        devices.joysticks.disconnect(stick.id);
        assert!(!binding.is_active(&devices));
        assert!(!JoyAxisBinding::disabled().is_active(&devices));
    }

    #[test]
    fn joy_axis_roundtrip() {
        let (devices, stick) = devices_with_stick();
        let bindings = [
            JoyAxisBinding::disabled(),
            JoyAxisBinding::new(stick, 1, AxisDirection::Positive),
            JoyAxisBinding::new(stick, 3, AxisDirection::Negative)
                .with_deadzone(0.25)
                .with_sensitivity(1.75)
                .with_modifiers(Modifiers::SHIFT),
            JoyAxisBinding::new(stick, 0, AxisDirection::Positive).with_deadzone(0.1),
            JoyAxisBinding::new(stick, 2, AxisDirection::Positive).with_sensitivity(1.0 + f32::EPSILON),
        ];
        for binding in bindings {
            let text = binding.to_string();
            assert_eq!(JoyAxisBinding::parse(&text, &devices.joysticks), binding, "{text}");
        }
    }

    #[test]
    fn joy_axis_grammar() {
        let (_, stick) = devices_with_stick();
        let binding = JoyAxisBinding::new(stick, 3, AxisDirection::Negative)
            .with_deadzone(0.25)
            .with_sensitivity(1.5)
            .with_modifiers(Modifiers::CTRL);
        assert_eq!(binding.to_string(), format!("-Joy{GUID}/Axis3/DZ0.25/E1.5Mod192"));
        assert_eq!(
            JoyAxisBinding::new(stick, 0, AxisDirection::Positive).to_string(),
            format!("Joy{GUID}/Axis0")
        );
    }

    #[test]
    fn joy_axis_parse_failures() {
        let (devices, _) = devices_with_stick();
        let js = &devices.joysticks;
        assert!(!JoyAxisBinding::parse(&format!("Joy{GUID}/Button1"), js).is_enabled());
        assert!(!JoyAxisBinding::parse(&format!("Joy{GUID}/Axis"), js).is_enabled());
        assert!(!JoyAxisBinding::parse(&format!("Joy{GUID}/Axis1/DZ"), js).is_enabled());
        assert!(!JoyAxisBinding::parse("Joy00000000000000000000000000000000/Axis1", js).is_enabled());
        assert!(!JoyAxisBinding::parse("Key32", js).is_enabled());
        assert!(!JoyAxisBinding::parse(&format!("Joy{GUID}/Axis1"), &Joysticks::new()).is_enabled());
    }

    #[test]
    fn joy_axis_parse_clamps_shaping() {
        let (devices, _) = devices_with_stick();
        let binding = JoyAxisBinding::parse(&format!("Joy{GUID}/Axis1/DZ1.5"), &devices.joysticks);
        assert_relative_eq!(binding.deadzone, 1.0);
        let binding = JoyAxisBinding::parse(&format!("Joy{GUID}/Axis1/E-2"), &devices.joysticks);
        assert_relative_eq!(binding.sensitivity, 0.0);
    }

    #[test]
    fn wheel_axis_value() {
        let mut devices = DeviceState::new();
        let vertical = WheelAxisBinding::new(WheelAxisKind::Vertical, AxisDirection::Positive);
        let inverted = WheelAxisBinding::new(WheelAxisKind::Vertical, AxisDirection::Negative);
        let horizontal = WheelAxisBinding::new(WheelAxisKind::Horizontal, AxisDirection::Positive);

        assert!(!vertical.is_active(&devices));
        devices.apply(&InputEvent::MouseWheel { x: 0.0, y: 3.0 });
        assert!(vertical.is_active(&devices));
        assert_relative_eq!(vertical.value(&devices), 1.0);
        assert_relative_eq!(inverted.value(&devices), -1.0);
        assert!(!horizontal.is_active(&devices));

        devices.end_frame();
        devices.apply(&InputEvent::MouseWheel { x: -0.5, y: 0.0 });
        assert_relative_eq!(horizontal.value(&devices), -0.5);
        assert_relative_eq!(vertical.value(&devices), 0.0);
    }

    #[test]
    fn wheel_axis_roundtrip() {
        let bindings = [
            WheelAxisBinding::disabled(),
            WheelAxisBinding::new(WheelAxisKind::Vertical, AxisDirection::Positive),
            WheelAxisBinding::new(WheelAxisKind::Horizontal, AxisDirection::Negative)
                .with_modifiers(Modifiers::ALT),
        ];
        for binding in bindings {
            assert_eq!(WheelAxisBinding::parse(&binding.to_string()), binding);
        }
        assert_eq!(
            WheelAxisBinding::new(WheelAxisKind::Horizontal, AxisDirection::Negative).to_string(),
            "-MWhH"
        );
        assert!(!WheelAxisBinding::parse("MWhX").is_enabled());
        assert!(!WheelAxisBinding::parse("MWh0").is_enabled());
    }
}
