//! Input binding and dispatch for the Flightdeck engine.
//!
//! Physical input (keys with modifiers, joystick buttons, hats and axes, the
//! mouse wheel) is mapped onto named **actions** (on/off) and **axes**
//! (continuous values in [-1, 1]). Bindings live in named containers that
//! frames share; frames form a stack that every event walks from the top
//! until a binding consumes it.
//!
//! # Core Types
//!
//! - [`Input`]: device state, global binding registry and the frame stack
//! - [`InputFrame`]: an activatable scope over a [`BindingContainer`]
//! - [`ActionBinding`] / [`AxisBinding`]: composite bindings with callbacks
//! - [`KeyBinding`], [`JoyAxisBinding`], [`WheelAxisBinding`]: single sources
//! - [`InputFrameStatusTicket`]: temporary exclusive focus for one frame
//!
//! # Usage
//!
//! ```ignore
//! use flightdeck_core::MemoryConfig;
//! use flightdeck_input::{ActionBinding, AxisBinding, Input, InputFrame, KeyBinding, Keycode};
//!
//! let input = Input::new(MemoryConfig::new());
//! let ship = InputFrame::new(&input, "ShipControls", |r| {
//!     r.page("Ship").group("Flight");
//!     r.add_axis("Pitch", AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::key(Keycode::W)));
//!     r.group("Weapons");
//!     r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::SPACE)));
//! });
//! ship.set_active(true);
//! ship.set_action_callback("Fire", |pressed| println!("fire: {pressed}"));
//!
//! // In the event handler
//! let mut translator = flightdeck_input::WinitTranslator::new();
//! if let Some(event) = translator.translate(&window_event) {
//!     input.handle_event(&event);
//! }
//!
//! // In the update loop
//! let pitch = ship.axis_value("Pitch");
//! input.new_frame();
//! ```
//!
//! # Binding strings
//!
//! Every binding round-trips through a compact string, stored in the
//! [`flightdeck_core::ConfigStore`] under the binding's name:
//!
//! | Source | Form |
//! |---|---|
//! | Key | `Key<code>[Mod<mask>]` |
//! | Joystick button | `Joy<guid>/Button<n>[Mod<mask>]` |
//! | Joystick hat | `Joy<guid>/Hat<n>Dir<bits>[Mod<mask>]` |
//! | Wheel tick | `MWh<0-3>[Mod<mask>]` |
//! | Joystick axis | `[-]Joy<guid>/Axis<n>[/DZ<f>][/E<f>][Mod<mask>]` |
//! | Wheel axis | `[-]MWhV[Mod<mask>]`, `[-]MWhH[Mod<mask>]` |
//!
//! Actions join two key bindings with a comma; axes join joystick axis,
//! wheel axis, positive key and negative key.

pub mod binding;
mod container;
mod device;
mod event;
mod frame;
mod input;
mod joystick;
mod keyboard;
mod keycode;
mod modifiers;
mod mouse;
mod page;
mod ticket;
mod translate;

pub use binding::{
    ActionBinding, ActionCallback, AxisBinding, AxisCallback, AxisDirection, BehaviorFlags, Dispatch,
    JoyAxisBinding, KeyBinding, KeyBindingKind, PendingCall, Response, WheelAxisBinding, WheelAxisKind,
};
pub use container::BindingContainer;
pub use device::DeviceState;
pub use event::{EventKind, InputEvent};
pub use frame::{BindingRegistrar, InputFrame};
pub use input::Input;
pub use joystick::{
    normalize_axis, HatDirection, JoystickGuid, JoystickId, JoystickInfo, JoystickRef, Joysticks, GUID_STRING_LEN,
};
pub use keyboard::KeyboardState;
pub use keycode::Keycode;
pub use modifiers::{Modifiers, RawModifiers};
pub use mouse::{MouseButton, MouseState, WheelDirection};
pub use page::{BindingGroup, BindingPage, EntryKind};
pub use ticket::InputFrameStatusTicket;
pub use translate::{keycode_from_winit, wheel_delta, WinitTranslator};

// Re-export winit types commonly used with input
pub use winit::event::{DeviceEvent, WindowEvent};
