//! Named, shared sets of actions and axes.

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use indexmap::IndexMap;
use tracing::debug;

use crate::binding::{ActionBinding, AxisBinding, Dispatch, Response};
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::input::InputShared;

/// The bindings backing every [`crate::InputFrame`] of one name.
///
/// Frames asking for the same name share a single container. It lives until
/// the last of those frames is dropped, at which point its names leave the
/// global registry and the options-screen pages.
pub struct BindingContainer {
    name: String,
    actions: RefCell<IndexMap<String, ActionBinding>>,
    axes: RefCell<IndexMap<String, AxisBinding>>,
    enabled: Cell<bool>,
    input: Weak<InputShared>,
}

impl BindingContainer {
    pub(crate) fn new(name: &str, input: Weak<InputShared>) -> Self {
        Self {
            name: name.to_string(),
            actions: RefCell::default(),
            axes: RefCell::default(),
            enabled: Cell::new(true),
            input,
        }
    }

    /// Container name, shared by all its frames.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether any binding in this container can match.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Suppress or restore every binding at once, e.g. while a text field has focus.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// Action names in registration order.
    #[must_use]
    pub fn action_names(&self) -> Vec<String> {
        self.actions.borrow().keys().cloned().collect()
    }

    /// Axis names in registration order.
    #[must_use]
    pub fn axis_names(&self) -> Vec<String> {
        self.axes.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.borrow().contains_key(name)
    }

    #[must_use]
    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.borrow().contains_key(name)
    }

    pub(crate) fn insert_action(&self, name: String, binding: ActionBinding) {
        self.actions.borrow_mut().insert(name, binding);
    }

    pub(crate) fn insert_axis(&self, name: String, binding: AxisBinding) {
        self.axes.borrow_mut().insert(name, binding);
    }

    pub(crate) fn with_action<R>(&self, name: &str, f: impl FnOnce(&ActionBinding) -> R) -> Option<R> {
        self.actions.borrow().get(name).map(f)
    }

    pub(crate) fn with_action_mut<R>(&self, name: &str, f: impl FnOnce(&mut ActionBinding) -> R) -> Option<R> {
        self.actions.borrow_mut().get_mut(name).map(f)
    }

    pub(crate) fn with_axis<R>(&self, name: &str, f: impl FnOnce(&AxisBinding) -> R) -> Option<R> {
        self.axes.borrow().get(name).map(f)
    }

    pub(crate) fn with_axis_mut<R>(&self, name: &str, f: impl FnOnce(&mut AxisBinding) -> R) -> Option<R> {
        self.axes.borrow_mut().get_mut(name).map(f)
    }

    /// Match `event` against actions then axes, in registration order.
    ///
    /// Stops at the first binding that consumes the event. The callback is
    /// returned, not run.
    pub(crate) fn match_event(&self, event: &InputEvent, devices: &DeviceState) -> Dispatch {
        if !self.enabled.get() || !event.is_bindable() {
            return Dispatch::NO_MATCH;
        }

        let actions = self.actions.borrow();
        let axes = self.axes.borrow();
        let first = actions
            .values()
            .map(|action| action.check_event(event, devices))
            .chain(axes.values().map(|axis| axis.check_event(event, devices)))
            .find(|dispatch| dispatch.response != Response::NoMatch);
        first.unwrap_or(Dispatch::NO_MATCH)
    }

    /// Match `event` and run the callback of the binding that consumed it.
    pub fn process_event(&self, event: &InputEvent, devices: &DeviceState) -> Response {
        self.match_event(event, devices).fire()
    }

    /// Whether the named action is held, reading the owning input's devices.
    #[must_use]
    pub fn is_action_active(&self, name: &str) -> bool {
        let Some(input) = self.input.upgrade() else {
            return false;
        };
        let devices = input.devices.borrow();
        self.with_action(name, |action| action.is_active(&devices))
            .unwrap_or(false)
    }

    /// Current value of the named axis, reading the owning input's devices.
    #[must_use]
    pub fn axis_value(&self, name: &str) -> f32 {
        let Some(input) = self.input.upgrade() else {
            return 0.0;
        };
        let devices = input.devices.borrow();
        self.with_axis(name, |axis| axis.value(&devices)).unwrap_or(0.0)
    }
}

impl std::fmt::Debug for BindingContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingContainer")
            .field("name", &self.name)
            .field("actions", &self.actions.borrow().len())
            .field("axes", &self.axes.borrow().len())
            .field("enabled", &self.enabled.get())
            .finish()
    }
}

impl Drop for BindingContainer {
    fn drop(&mut self) {
        let Some(input) = self.input.upgrade() else {
            return;
        };
        let names: Vec<String> = self
            .actions
            .get_mut()
            .keys()
            .chain(self.axes.get_mut().keys())
            .cloned()
            .collect();
        debug!("Dropping binding container {:?} ({} bindings)", self.name, names.len());
        input.unregister(&self.name, &names);
    }
}
