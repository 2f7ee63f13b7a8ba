//! Binding types, from single physical inputs up to composite actions and axes.

mod action;
mod analog;
mod axis;
mod key;
pub(crate) mod parse;

use std::fmt;
use std::rc::Rc;

pub use action::ActionBinding;
pub use analog::{AxisDirection, JoyAxisBinding, WheelAxisBinding, WheelAxisKind};
pub use axis::AxisBinding;
pub use key::{BehaviorFlags, KeyBinding, KeyBindingKind};

/// Callback fired when an action's press state changes.
pub type ActionCallback = Rc<dyn Fn(bool)>;

/// Callback fired with an axis' new value.
pub type AxisCallback = Rc<dyn Fn(f32)>;

/// Outcome of offering an event to a binding, container, or the whole stack.
///
/// Ordered so that combining several outcomes is a `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Response {
    /// Nothing was bound to this input.
    #[default]
    NoMatch,
    /// A binding saw the event but did not consume it; the walk continues.
    Passthrough,
    /// A binding consumed the event; the walk stops.
    Matched,
}

/// A callback invocation decided during matching and run once borrows are released.
#[derive(Clone)]
pub enum PendingCall {
    Action(ActionCallback, bool),
    Axis(AxisCallback, f32),
}

impl PendingCall {
    /// Invoke the callback.
    pub fn fire(self) {
        match self {
            Self::Action(callback, pressed) => callback(pressed),
            Self::Axis(callback, value) => callback(value),
        }
    }
}

impl fmt::Debug for PendingCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action(_, pressed) => f.debug_tuple("Action").field(pressed).finish(),
            Self::Axis(_, value) => f.debug_tuple("Axis").field(value).finish(),
        }
    }
}

/// Result of matching an event against one binding.
#[derive(Debug, Clone, Default)]
pub struct Dispatch {
    pub response: Response,
    pub call: Option<PendingCall>,
}

impl Dispatch {
    pub(crate) const NO_MATCH: Self = Self {
        response: Response::NoMatch,
        call: None,
    };

    pub(crate) const fn new(response: Response, call: Option<PendingCall>) -> Self {
        Self { response, call }
    }

    /// Run the pending callback, if any, and return the response.
    pub fn fire(self) -> Response {
        if let Some(call) = self.call {
            call.fire();
        }
        self.response
    }
}

/// Split a comma separated binding string into exactly `N` slots.
///
/// Missing trailing slots read as `"disabled"`; surplus slots are ignored.
pub(crate) fn split_slots<const N: usize>(text: &str) -> [&str; N] {
    let mut slots = ["disabled"; N];
    for (slot, part) in slots.iter_mut().zip(text.split(',')) {
        *slot = part.trim();
    }
    slots
}
