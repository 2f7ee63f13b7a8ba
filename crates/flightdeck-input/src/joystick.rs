//! Joystick identity and state tracking.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use hashbrown::HashMap;
use tracing::{debug, info};

/// Host-assigned identifier of a connected joystick.
///
/// Stable for as long as the device stays connected; a reconnect may yield a
/// different id. Persisted bindings therefore store the [`JoystickGuid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JoystickId(pub u32);

impl fmt::Display for JoystickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 128-bit device GUID, written as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoystickGuid(pub [u8; 16]);

/// Length of a GUID in its textual form.
pub const GUID_STRING_LEN: usize = 32;

impl fmt::Display for JoystickGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for JoystickGuid {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != GUID_STRING_LEN || !s.is_ascii() {
            return Err(());
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| ())?;
        }
        Ok(Self(bytes))
    }
}

/// A resolved device reference held by bindings.
///
/// The id is used for matching and polling, the GUID for serialization, so a
/// binding can still be written back after its device disconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JoystickRef {
    pub id: JoystickId,
    pub guid: JoystickGuid,
}

bitflags! {
    /// Hat switch position. Diagonals set two bits; centered is empty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HatDirection: u8 {
        const UP    = 0x01;
        const RIGHT = 0x02;
        const DOWN  = 0x04;
        const LEFT  = 0x08;
    }
}

impl HatDirection {
    /// Display name for options screens.
    #[must_use]
    pub fn describe(self) -> String {
        if self.is_empty() {
            return "Centered".to_string();
        }
        let mut parts = Vec::new();
        if self.contains(Self::UP) {
            parts.push("Up");
        }
        if self.contains(Self::DOWN) {
            parts.push("Down");
        }
        if self.contains(Self::LEFT) {
            parts.push("Left");
        }
        if self.contains(Self::RIGHT) {
            parts.push("Right");
        }
        parts.join("-")
    }
}

/// Convert a raw signed 16-bit axis reading into [-1, 1].
#[must_use]
pub fn normalize_axis(raw: i16) -> f32 {
    (f32::from(raw) / 32767.0).clamp(-1.0, 1.0)
}

/// One connected device and its most recent state.
#[derive(Debug, Clone)]
pub struct JoystickInfo {
    pub guid: JoystickGuid,
    pub name: String,
    buttons: Vec<bool>,
    hats: Vec<HatDirection>,
    axes: Vec<f32>,
}

impl JoystickInfo {
    /// Create a device record with the given control counts, all at rest.
    #[must_use]
    pub fn new(guid: JoystickGuid, name: impl Into<String>, axes: usize, buttons: usize, hats: usize) -> Self {
        Self {
            guid,
            name: name.into(),
            buttons: vec![false; buttons],
            hats: vec![HatDirection::empty(); hats],
            axes: vec![0.0; axes],
        }
    }

    /// Number of axes seen so far.
    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Number of buttons seen so far.
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Number of hats seen so far.
    #[must_use]
    pub fn hat_count(&self) -> usize {
        self.hats.len()
    }
}

fn slot<T: Copy + Default>(values: &mut Vec<T>, index: u8) -> &mut T {
    let index = usize::from(index);
    if values.len() <= index {
        values.resize(index + 1, T::default());
    }
    &mut values[index]
}

/// Table of connected joysticks.
///
/// This is the engine's view of the device enumeration layer: the host reports
/// connects, disconnects and control changes, bindings resolve GUIDs through it
/// and poll it for current state. Reads of unknown devices or controls return
/// the resting value.
#[derive(Debug, Default)]
pub struct Joysticks {
    devices: HashMap<JoystickId, JoystickInfo>,
}

impl Joysticks {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly connected device.
    pub fn connect(&mut self, id: JoystickId, info: JoystickInfo) {
        info!("Joystick {} connected: {} ({})", id, info.name, info.guid);
        self.devices.insert(id, info);
    }

    /// Forget a disconnected device.
    pub fn disconnect(&mut self, id: JoystickId) {
        if let Some(info) = self.devices.remove(&id) {
            info!("Joystick {} disconnected: {}", id, info.name);
        }
    }

    /// Find the connected device with this GUID.
    ///
    /// When several identical devices are attached the lowest id wins, so the
    /// answer does not depend on map iteration order.
    #[must_use]
    pub fn resolve(&self, guid: &JoystickGuid) -> Option<JoystickId> {
        self.devices
            .iter()
            .filter(|(_, info)| info.guid == *guid)
            .map(|(id, _)| *id)
            .min()
    }

    /// Returns `true` if the device is connected.
    #[must_use]
    pub fn is_connected(&self, id: JoystickId) -> bool {
        self.devices.contains_key(&id)
    }

    /// Device record for `id`.
    #[must_use]
    pub fn get(&self, id: JoystickId) -> Option<&JoystickInfo> {
        self.devices.get(&id)
    }

    /// GUID of a connected device.
    #[must_use]
    pub fn guid(&self, id: JoystickId) -> Option<JoystickGuid> {
        self.devices.get(&id).map(|info| info.guid)
    }

    /// Binding reference for a connected device.
    #[must_use]
    pub fn reference(&self, id: JoystickId) -> Option<JoystickRef> {
        self.guid(id).map(|guid| JoystickRef { id, guid })
    }

    /// Short display label: the device name if connected, else its id.
    #[must_use]
    pub fn label(&self, id: JoystickId) -> String {
        self.devices
            .get(&id)
            .map_or_else(|| format!("Joy {id}"), |info| info.name.clone())
    }

    /// Number of connected devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if no device is connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Connected devices sorted by id.
    #[must_use]
    pub fn iter_sorted(&self) -> Vec<(JoystickId, &JoystickInfo)> {
        let mut out: Vec<_> = self.devices.iter().map(|(id, info)| (*id, info)).collect();
        out.sort_by_key(|(id, _)| *id);
        out
    }

    /// Returns `true` if the button is held.
    #[must_use]
    pub fn button(&self, id: JoystickId, button: u8) -> bool {
        self.devices
            .get(&id)
            .and_then(|info| info.buttons.get(usize::from(button)))
            .copied()
            .unwrap_or(false)
    }

    /// Current hat position.
    #[must_use]
    pub fn hat(&self, id: JoystickId, hat: u8) -> HatDirection {
        self.devices
            .get(&id)
            .and_then(|info| info.hats.get(usize::from(hat)))
            .copied()
            .unwrap_or_default()
    }

    /// Current axis value in [-1, 1].
    #[must_use]
    pub fn axis(&self, id: JoystickId, axis: u8) -> f32 {
        self.devices
            .get(&id)
            .and_then(|info| info.axes.get(usize::from(axis)))
            .copied()
            .unwrap_or(0.0)
    }

    /// Record a button transition.
    pub fn set_button(&mut self, id: JoystickId, button: u8, pressed: bool) {
        if let Some(info) = self.devices.get_mut(&id) {
            *slot(&mut info.buttons, button) = pressed;
        } else {
            debug!("Button event for unknown joystick {}", id);
        }
    }

    /// Record a hat position.
    pub fn set_hat(&mut self, id: JoystickId, hat: u8, direction: HatDirection) {
        if let Some(info) = self.devices.get_mut(&id) {
            *slot(&mut info.hats, hat) = direction;
        } else {
            debug!("Hat event for unknown joystick {}", id);
        }
    }

    /// Record an axis value (already normalized to [-1, 1]).
    pub fn set_axis(&mut self, id: JoystickId, axis: u8, value: f32) {
        if let Some(info) = self.devices.get_mut(&id) {
            *slot(&mut info.axes, axis) = value.clamp(-1.0, 1.0);
        } else {
            debug!("Axis event for unknown joystick {}", id);
        }
    }

    /// Return every connected device to its resting state.
    pub fn release_all(&mut self) {
        for info in self.devices.values_mut() {
            info.buttons.fill(false);
            info.hats.fill(HatDirection::empty());
            info.axes.fill(0.0);
        }
    }
}
