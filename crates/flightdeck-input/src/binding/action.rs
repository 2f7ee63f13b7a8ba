//! Boolean actions backed by two digital bindings.

use std::fmt;
use std::rc::Rc;

use crate::binding::key::KeyBinding;
use crate::binding::{split_slots, ActionCallback, Dispatch, PendingCall, Response};
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::joystick::Joysticks;

/// A named boolean input with a primary and a secondary binding.
#[derive(Clone, Default)]
pub struct ActionBinding {
    pub bindings: [KeyBinding; 2],
    pub enabled: bool,
    callback: Option<ActionCallback>,
}

impl ActionBinding {
    /// Create an enabled action from two bindings.
    #[must_use]
    pub const fn new(primary: KeyBinding, secondary: KeyBinding) -> Self {
        Self {
            bindings: [primary, secondary],
            enabled: true,
            callback: None,
        }
    }

    /// Create an enabled action with only a primary binding.
    #[must_use]
    pub const fn single(primary: KeyBinding) -> Self {
        Self::new(primary, KeyBinding::disabled())
    }

    /// Install the callback run when the action is pressed or released.
    pub fn set_callback(&mut self, callback: impl Fn(bool) + 'static) {
        self.callback = Some(Rc::new(callback));
    }

    /// Remove the callback.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Returns `true` if either binding is held.
    #[must_use]
    pub fn is_active(&self, devices: &DeviceState) -> bool {
        self.enabled && self.bindings.iter().any(|b| b.is_active(devices))
    }

    /// Match `event` without running the callback.
    ///
    /// A matching press or release is consumed and carries the pressed state
    /// to the callback. Auto-repeat presses count as presses.
    #[must_use]
    pub fn check_event(&self, event: &InputEvent, devices: &DeviceState) -> Dispatch {
        if !self.enabled || !self.bindings.iter().any(|b| b.matches(event, devices)) {
            return Dispatch::NO_MATCH;
        }

        let pressed = event.pressed().unwrap_or(true);
        let call = self
            .callback
            .as_ref()
            .map(|callback| PendingCall::Action(Rc::clone(callback), pressed));
        Dispatch::new(Response::Matched, call)
    }

    /// Match `event` and run the callback immediately.
    pub fn check_event_and_dispatch(&self, event: &InputEvent, devices: &DeviceState) -> Response {
        self.check_event(event, devices).fire()
    }

    /// Replace both bindings from a `"<primary>,<secondary>"` string.
    ///
    /// Behavior flags of each slot are kept; unparseable slots become disabled.
    pub fn set_from_str(&mut self, text: &str, joysticks: &Joysticks) {
        let slots = split_slots::<2>(text);
        for (binding, slot) in self.bindings.iter_mut().zip(slots) {
            *binding = KeyBinding::parse(slot, binding.traits, joysticks);
        }
    }

    /// Human readable form, e.g. `"W, Up"`.
    #[must_use]
    pub fn describe(&self, joysticks: &Joysticks) -> String {
        let described: Vec<_> = self
            .bindings
            .iter()
            .filter(|b| b.is_enabled())
            .map(|b| b.describe(joysticks))
            .collect();
        if described.is_empty() {
            "None".to_string()
        } else {
            described.join(", ")
        }
    }
}

impl PartialEq for ActionBinding {
    fn eq(&self, other: &Self) -> bool {
        self.bindings == other.bindings && self.enabled == other.enabled
    }
}

impl fmt::Debug for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionBinding")
            .field("bindings", &self.bindings)
            .field("enabled", &self.enabled)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl fmt::Display for ActionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.bindings[0], self.bindings[1])
    }
}
