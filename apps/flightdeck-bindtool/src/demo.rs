//! The demo binding set: ship controls under a console overlay.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flightdeck_input::{
    ActionBinding, AxisBinding, AxisDirection, BehaviorFlags, Input, InputFrame, KeyBinding, Keycode, Modifiers,
    WheelAxisBinding, WheelAxisKind, WheelDirection,
};

/// Callback output collected during dispatch, drained after each event.
pub type Log = Rc<RefCell<Vec<String>>>;

/// Frames registered by the tool.
pub struct Demo {
    pub ship: InputFrame,
    pub console: InputFrame,
    /// Set by the console toggle; the caller opens or closes the console
    /// once the current event has been dispatched.
    pub toggle_requested: Rc<Cell<bool>>,
    pub log: Log,
}

impl Demo {
    /// Register both frames and activate them.
    pub fn register(input: &Input) -> Self {
        let log: Log = Rc::default();
        let toggle_requested = Rc::new(Cell::new(false));

        let ship = InputFrame::new(input, "ShipControls", |r| {
            r.page("Ship").group("Flight");
            r.add_axis(
                "BindAxisPitch",
                AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::key(Keycode::W)),
            );
            r.add_axis(
                "BindAxisYaw",
                AxisBinding::digital(KeyBinding::key(Keycode::A), KeyBinding::key(Keycode::D)),
            );
            r.add_axis(
                "BindAxisRoll",
                AxisBinding::digital(KeyBinding::key(Keycode::Q), KeyBinding::key(Keycode::E)),
            );
            r.add_axis(
                "BindSpeedControl",
                AxisBinding::digital(
                    KeyBinding::key(Keycode::RETURN).with_modifiers(Modifiers::SHIFT),
                    KeyBinding::key(Keycode::BACKSPACE).with_modifiers(Modifiers::SHIFT),
                )
                .with_wheel(WheelAxisBinding::new(WheelAxisKind::Vertical, AxisDirection::Positive)),
            );

            r.group("Weapons");
            r.add_action(
                "BindPrimaryFire",
                ActionBinding::new(KeyBinding::key(Keycode::SPACE), KeyBinding::wheel(WheelDirection::Down)),
            );
            r.add_action("BindTargetObject", ActionBinding::single(KeyBinding::key(Keycode::T)));
            r.add_action(
                "BindToggleHyperspace",
                ActionBinding::single(KeyBinding::key(Keycode::H).with_modifiers(Modifiers::CTRL)),
            );
        });
        for axis in ["BindAxisPitch", "BindAxisYaw", "BindAxisRoll", "BindSpeedControl"] {
            let sink = Rc::clone(&log);
            ship.set_axis_callback(axis, move |value| {
                sink.borrow_mut().push(format!("{axis} = {value:.2}"));
            });
        }
        for action in ["BindPrimaryFire", "BindTargetObject", "BindToggleHyperspace"] {
            let sink = Rc::clone(&log);
            ship.set_action_callback(action, move |pressed| {
                let state = if pressed { "pressed" } else { "released" };
                sink.borrow_mut().push(format!("{action} {state}"));
            });
        }

        let console = InputFrame::new(input, "Console", |r| {
            r.page("General").group("Console");
            r.add_action(
                "BindToggleConsole",
                ActionBinding::single(
                    KeyBinding::key(Keycode::BACKQUOTE).with_traits(BehaviorFlags::DISALLOW_MODIFIER),
                ),
            );
            r.add_action(
                "BindConsoleHistory",
                ActionBinding::single(KeyBinding::key(Keycode::UP).with_traits(BehaviorFlags::ALLOW_KEYBOARD_ONLY)),
            );
        });
        {
            let requested = Rc::clone(&toggle_requested);
            let sink = Rc::clone(&log);
            console.set_action_callback("BindToggleConsole", move |pressed| {
                if pressed {
                    requested.set(true);
                    sink.borrow_mut().push("BindToggleConsole pressed".to_string());
                }
            });
        }
        {
            let sink = Rc::clone(&log);
            console.set_action_callback("BindConsoleHistory", move |pressed| {
                if pressed {
                    sink.borrow_mut().push("BindConsoleHistory pressed".to_string());
                }
            });
        }

        ship.set_active(true);
        console.set_active(true);
        Self {
            ship,
            console,
            toggle_requested,
            log,
        }
    }

    /// Take the callback output gathered since the last call.
    pub fn drain_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdeck_core::MemoryConfig;
    use flightdeck_input::{InputEvent, RawModifiers, Response};

    #[test]
    fn demo_registers_pages() {
        let input = Input::new(MemoryConfig::new());
        let _demo = Demo::register(&input);
        let pages: Vec<_> = input.pages().into_iter().map(|(name, _)| name).collect();
        assert_eq!(pages, ["Ship", "General"]);
        assert_eq!(input.frames().len(), 2);
    }

    #[test]
    fn console_sits_above_ship() {
        let input = Input::new(MemoryConfig::new());
        let demo = Demo::register(&input);

        // Up arrow belongs only to the console; W reaches the ship.
        let up = InputEvent::key_down(Keycode::UP, RawModifiers::empty());
        assert_eq!(input.handle_event(&up), Response::Matched);
        let w = InputEvent::key_down(Keycode::W, RawModifiers::empty());
        assert_eq!(input.handle_event(&w), Response::Matched);

        assert_eq!(
            demo.drain_log(),
            ["BindConsoleHistory pressed", "BindAxisPitch = -1.00"]
        );
        assert!(demo.drain_log().is_empty());
    }
}
