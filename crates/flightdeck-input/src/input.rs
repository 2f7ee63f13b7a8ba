//! The input context: device state, binding registry and the frame stack.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use flightdeck_core::{keys, ConfigStore, Error, Result};
use glam::Vec2;
use hashbrown::HashMap;
use indexmap::IndexMap;
use tracing::{debug, info, trace, trace_span, warn};

use crate::binding::Response;
use crate::container::BindingContainer;
use crate::device::DeviceState;
use crate::event::InputEvent;
use crate::frame::{FrameState, InputFrame};
use crate::page::{BindingPage, Pages};
use crate::ticket::InputFrameStatusTicket;

/// Global name tables. Names are unique across actions and axes.
#[derive(Default)]
pub(crate) struct Registry {
    pub(crate) actions: IndexMap<String, Weak<BindingContainer>>,
    pub(crate) axes: IndexMap<String, Weak<BindingContainer>>,
    pub(crate) containers: HashMap<String, Weak<BindingContainer>>,
    pub(crate) pages: Pages,
}

impl Registry {
    fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name) || self.axes.contains_key(name)
    }

    /// `requested`, or the first free `requested_<n>`.
    pub(crate) fn unique_name(&self, requested: &str) -> String {
        if !self.contains(requested) {
            return requested.to_string();
        }
        let mut suffix = 1_u32;
        loop {
            let candidate = format!("{requested}_{suffix}");
            if !self.contains(&candidate) {
                info!("Binding {:?} already exists, registering it as {:?}", requested, candidate);
                return candidate;
            }
            suffix += 1;
        }
    }

    fn action_owner(&self, name: &str) -> Option<Rc<BindingContainer>> {
        self.actions.get(name).and_then(Weak::upgrade)
    }

    fn axis_owner(&self, name: &str) -> Option<Rc<BindingContainer>> {
        self.axes.get(name).and_then(Weak::upgrade)
    }
}

/// State shared between [`Input`], its containers and its frames.
pub(crate) struct InputShared {
    pub(crate) devices: RefCell<DeviceState>,
    pub(crate) registry: RefCell<Registry>,
    pub(crate) config: RefCell<Box<dyn ConfigStore>>,
    /// Bottom to top.
    frames: RefCell<Vec<Weak<FrameState>>>,
    invert_mouse_y: Cell<bool>,
}

impl InputShared {
    /// Existing live container named `name`, or a fresh one.
    ///
    /// The flag is `true` when the container was just created.
    pub(crate) fn acquire_container(self: &Rc<Self>, name: &str) -> (Rc<BindingContainer>, bool) {
        let mut registry = self.registry.borrow_mut();
        if let Some(existing) = registry.containers.get(name).and_then(Weak::upgrade) {
            return (existing, false);
        }
        let container = Rc::new(BindingContainer::new(name, Rc::downgrade(self)));
        registry
            .containers
            .insert(name.to_string(), Rc::downgrade(&container));
        (container, true)
    }

    pub(crate) fn push_frame(&self, frame: &Rc<FrameState>) {
        let mut frames = self.frames.borrow_mut();
        frames.retain(|f| f.strong_count() > 0);
        frames.push(Rc::downgrade(frame));
    }

    /// Live frames, top of the stack first.
    fn frames_top_down(&self) -> Vec<Rc<FrameState>> {
        self.frames
            .borrow()
            .iter()
            .rev()
            .filter_map(Weak::upgrade)
            .collect()
    }

    /// Forget a dropped container's names and prune the pages they were on.
    pub(crate) fn unregister(&self, container: &str, names: &[String]) {
        let Ok(mut registry) = self.registry.try_borrow_mut() else {
            warn!("Registry busy while dropping container {:?}, names kept", container);
            return;
        };
        for name in names {
            registry.actions.shift_remove(name);
            registry.axes.shift_remove(name);
        }
        if registry
            .containers
            .get(container)
            .is_some_and(|weak| weak.strong_count() == 0)
        {
            registry.containers.remove(container);
        }
        registry.pages.prune(names.iter().map(String::as_str));
    }
}

/// The input context handed to every [`InputFrame`].
///
/// Owns the device state and the configuration store, keeps the global
/// name registry, and routes events through the frame stack. Cloning yields
/// another handle to the same context.
#[derive(Clone)]
pub struct Input {
    pub(crate) shared: Rc<InputShared>,
}

impl Input {
    /// Create a context backed by `config`.
    ///
    /// Reads `EnableJoystick` (default on) and `InvertMouseY` (default off).
    pub fn new(config: impl ConfigStore + 'static) -> Self {
        let joystick_enabled = config.get_bool(keys::ENABLE_JOYSTICK, true);
        let invert_mouse_y = config.get_bool(keys::INVERT_MOUSE_Y, false);

        let mut devices = DeviceState::new();
        devices.set_joystick_enabled(joystick_enabled);
        info!(
            "Input initialized (joystick: {}, invert mouse Y: {})",
            joystick_enabled, invert_mouse_y
        );

        Self {
            shared: Rc::new(InputShared {
                devices: RefCell::new(devices),
                registry: RefCell::default(),
                config: RefCell::new(Box::new(config)),
                frames: RefCell::default(),
                invert_mouse_y: Cell::new(invert_mouse_y),
            }),
        }
    }

    /// Current device state.
    ///
    /// The guard must be released before the next call to
    /// [`Self::handle_event`] or [`Self::new_frame`].
    #[must_use]
    pub fn devices(&self) -> Ref<'_, DeviceState> {
        self.shared.devices.borrow()
    }

    /// Feed one event through device state and then the frame stack.
    ///
    /// Frames are asked top-down; inactive frames are skipped and a container
    /// shared by several frames is asked once. The walk ends at the first
    /// frame that consumes the event. Activation changes made by callbacks
    /// apply from the next event on.
    pub fn handle_event(&self, event: &InputEvent) -> Response {
        let _span = trace_span!("handle_event", kind = ?event.kind()).entered();

        let applied = self.shared.devices.borrow_mut().apply(event);
        if !applied || !event.is_bindable() {
            return Response::NoMatch;
        }

        let frames: Vec<_> = self
            .shared
            .frames_top_down()
            .into_iter()
            .filter(|frame| frame.active.get())
            .collect();

        let mut visited: Vec<&Rc<BindingContainer>> = Vec::with_capacity(frames.len());
        let mut response = Response::NoMatch;
        for frame in &frames {
            if visited.iter().any(|c| Rc::ptr_eq(c, &frame.container)) {
                continue;
            }
            visited.push(&frame.container);

            let dispatch = {
                let devices = self.shared.devices.borrow();
                frame.container.match_event(event, &devices)
            };
            let result = dispatch.fire();
            response = response.max(result);
            if result == Response::Matched {
                trace!("Event consumed by frame {:?}", frame.name);
                break;
            }
        }
        response
    }

    /// Reset per-frame state (wheel and motion deltas). Call once per host frame.
    pub fn new_frame(&self) {
        self.shared.devices.borrow_mut().end_frame();
        self.shared
            .frames
            .borrow_mut()
            .retain(|f| f.strong_count() > 0);
    }

    /// Deactivate every frame but `target` until the ticket is dropped.
    ///
    /// `target` is activated. Frames created or dropped while the ticket is
    /// alive are left alone on restore.
    pub fn disable_all_input_frame_except(&self, target: &InputFrame) -> InputFrameStatusTicket {
        let frames = self.shared.frames_top_down();
        let ticket = InputFrameStatusTicket::new(&frames);
        for frame in &frames {
            frame.active.set(Rc::ptr_eq(frame, &target.state));
        }
        debug!("Input exclusive to frame {:?}", target.name());
        ticket
    }

    /// Names and activation of live frames, top of the stack first.
    #[must_use]
    pub fn frames(&self) -> Vec<(String, bool)> {
        self.shared
            .frames_top_down()
            .iter()
            .map(|frame| (frame.name.clone(), frame.active.get()))
            .collect()
    }

    /// Every registered action name.
    #[must_use]
    pub fn action_names(&self) -> Vec<String> {
        self.shared.registry.borrow().actions.keys().cloned().collect()
    }

    /// Every registered axis name.
    #[must_use]
    pub fn axis_names(&self) -> Vec<String> {
        self.shared.registry.borrow().axes.keys().cloned().collect()
    }

    /// Whether the named action is held. Unknown names are inactive.
    #[must_use]
    pub fn is_action_active(&self, name: &str) -> bool {
        let owner = self.shared.registry.borrow().action_owner(name);
        owner.is_some_and(|container| container.is_action_active(name))
    }

    /// Current value of the named axis. Unknown names read 0.
    #[must_use]
    pub fn axis_value(&self, name: &str) -> f32 {
        let owner = self.shared.registry.borrow().axis_owner(name);
        owner.map_or(0.0, |container| container.axis_value(name))
    }

    /// Serialized form of the named action or axis.
    #[must_use]
    pub fn binding_string(&self, name: &str) -> Option<String> {
        let (action, axis) = self.owners(name);
        action
            .and_then(|c| c.with_action(name, ToString::to_string))
            .or_else(|| axis.and_then(|c| c.with_axis(name, ToString::to_string)))
    }

    /// Human readable form of the named action or axis.
    #[must_use]
    pub fn describe_binding(&self, name: &str) -> Option<String> {
        let (action, axis) = self.owners(name);
        let devices = self.shared.devices.borrow();
        let joysticks = &devices.joysticks;
        action
            .and_then(|c| c.with_action(name, |a| a.describe(joysticks)))
            .or_else(|| axis.and_then(|c| c.with_axis(name, |a| a.describe(joysticks))))
    }

    /// Rebind the named action or axis and persist the result.
    ///
    /// Slots that do not parse become disabled. The stored string is the
    /// binding's canonical form.
    pub fn set_binding_from_string(&self, name: &str, text: &str) -> Result<()> {
        let (action, axis) = self.owners(name);
        let serialized = {
            let devices = self.shared.devices.borrow();
            let joysticks = &devices.joysticks;
            action
                .and_then(|c| {
                    c.with_action_mut(name, |a| {
                        a.set_from_str(text, joysticks);
                        a.to_string()
                    })
                })
                .or_else(|| {
                    axis.and_then(|c| {
                        c.with_axis_mut(name, |a| {
                            a.set_from_str(text, joysticks);
                            a.to_string()
                        })
                    })
                })
        }
        .ok_or_else(|| Error::NotFound(format!("binding {name:?}")))?;

        info!("Rebound {:?} to {:?}", name, serialized);
        let mut config = self.shared.config.borrow_mut();
        config.set_string(name, &serialized);
        config.save()
    }

    fn owners(&self, name: &str) -> (Option<Rc<BindingContainer>>, Option<Rc<BindingContainer>>) {
        let registry = self.shared.registry.borrow();
        (registry.action_owner(name), registry.axis_owner(name))
    }

    /// Options-screen pages in registration order.
    #[must_use]
    pub fn pages(&self) -> Vec<(String, BindingPage)> {
        self.shared
            .registry
            .borrow()
            .pages
            .iter()
            .map(|(name, page)| (name.to_string(), page.clone()))
            .collect()
    }

    /// A single options-screen page.
    #[must_use]
    pub fn page(&self, name: &str) -> Option<BindingPage> {
        self.shared.registry.borrow().pages.get(name).cloned()
    }

    /// Mouse motion accumulated this frame, with `InvertMouseY` applied.
    #[must_use]
    pub fn mouse_motion(&self) -> Vec2 {
        let motion = self.shared.devices.borrow().mouse.motion();
        if self.shared.invert_mouse_y.get() {
            Vec2::new(motion.x, -motion.y)
        } else {
            motion
        }
    }

    #[must_use]
    pub fn joystick_enabled(&self) -> bool {
        self.shared.devices.borrow().joystick_enabled()
    }

    /// Enable or disable joystick input and persist the setting.
    pub fn set_joystick_enabled(&self, enabled: bool) -> Result<()> {
        self.shared
            .devices
            .borrow_mut()
            .set_joystick_enabled(enabled);
        self.store_flag(keys::ENABLE_JOYSTICK, enabled)
    }

    #[must_use]
    pub fn invert_mouse_y(&self) -> bool {
        self.shared.invert_mouse_y.get()
    }

    /// Invert reported mouse Y motion and persist the setting.
    pub fn set_invert_mouse_y(&self, invert: bool) -> Result<()> {
        self.shared.invert_mouse_y.set(invert);
        self.store_flag(keys::INVERT_MOUSE_Y, invert)
    }

    fn store_flag(&self, key: &str, value: bool) -> Result<()> {
        let mut config = self.shared.config.borrow_mut();
        config.set_string(key, if value { "1" } else { "0" });
        config.save()
    }

    /// Read a raw value from the configuration store.
    #[must_use]
    pub fn config_string(&self, key: &str) -> Option<String> {
        self.shared.config.borrow().get_string(key)
    }
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Input")
            .field("frames", &self.frames())
            .field("actions", &self.shared.registry.borrow().actions.len())
            .field("axes", &self.shared.registry.borrow().axes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{ActionBinding, AxisBinding, KeyBinding};
    use crate::frame::InputFrame;
    use crate::joystick::{JoystickGuid, JoystickId, JoystickInfo};
    use crate::keycode::Keycode;
    use crate::modifiers::RawModifiers;
    use crate::page::EntryKind;
    use approx::assert_relative_eq;
    use flightdeck_core::MemoryConfig;

    fn down(key: Keycode) -> InputEvent {
        InputEvent::key_down(key, RawModifiers::empty())
    }

    fn up(key: Keycode) -> InputEvent {
        InputEvent::key_up(key, RawModifiers::empty())
    }

    /// A frame with one action on `key` that appends `tag` to `log` when pressed.
    fn logging_frame(input: &Input, name: &str, key: Keycode, log: &Rc<RefCell<Vec<String>>>) -> InputFrame {
        let sink = Rc::clone(log);
        let tag = name.to_string();
        let frame = InputFrame::new(input, name, |r| {
            let mut action = ActionBinding::single(KeyBinding::key(key));
            action.set_callback(move |pressed| {
                if pressed {
                    sink.borrow_mut().push(tag.clone());
                }
            });
            r.add_action("Use", action);
        });
        frame.set_active(true);
        frame
    }

    #[test]
    fn top_frame_consumes_first() {
        let input = Input::new(MemoryConfig::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = logging_frame(&input, "A", Keycode::E, &log);
        let _b = logging_frame(&input, "B", Keycode::Q, &log);
        let c = logging_frame(&input, "C", Keycode::E, &log);

        assert_eq!(input.handle_event(&down(Keycode::E)), Response::Matched);
        assert_eq!(*log.borrow(), ["C"]);

        c.set_active(false);
        input.handle_event(&down(Keycode::E));
        assert_eq!(*log.borrow(), ["C", "A"]);

        a.set_active(false);
        assert_eq!(input.handle_event(&down(Keycode::E)), Response::NoMatch);
    }

    #[test]
    fn release_stops_at_top_frame() {
        let input = Input::new(MemoryConfig::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let frames: Vec<_> = [("A", Keycode::E), ("B", Keycode::Q), ("C", Keycode::E)]
            .into_iter()
            .map(|(name, key)| {
                let sink = Rc::clone(&log);
                let frame = InputFrame::new(&input, name, |r| {
                    let mut action = ActionBinding::single(KeyBinding::key(key));
                    action.set_callback(move |pressed| sink.borrow_mut().push(format!("{name}:{pressed}")));
                    r.add_action("Use", action);
                });
                frame.set_active(true);
                frame
            })
            .collect();

        assert_eq!(input.handle_event(&down(Keycode::E)), Response::Matched);
        assert_eq!(input.handle_event(&up(Keycode::E)), Response::Matched);
        assert_eq!(*log.borrow(), ["C:true", "C:false"]);
        drop(frames);
    }

    #[test]
    fn exclusivity_ticket_restores_flags() {
        let input = Input::new(MemoryConfig::new());
        let a = InputFrame::new(&input, "A", |_| {});
        let b = InputFrame::new(&input, "B", |_| {});
        let c = InputFrame::new(&input, "C", |_| {});
        a.set_active(true);
        b.set_active(false);
        c.set_active(true);

        let ticket = input.disable_all_input_frame_except(&b);
        assert_eq!((a.is_active(), b.is_active(), c.is_active()), (false, true, false));

        // A frame created under the ticket keeps whatever state it is given.
        let late = InputFrame::new(&input, "Late", |_| {});
        late.set_active(true);

        drop(ticket);
        assert_eq!((a.is_active(), b.is_active(), c.is_active()), (true, false, true));
        assert!(late.is_active());
    }

    #[test]
    fn ticket_ignores_dropped_frames() {
        let input = Input::new(MemoryConfig::new());
        let a = InputFrame::new(&input, "A", |_| {});
        let b = InputFrame::new(&input, "B", |_| {});
        a.set_active(true);

        let ticket = input.disable_all_input_frame_except(&b);
        drop(b);
        drop(ticket);
        assert!(a.is_active());
        assert_eq!(input.frames(), [("A".to_string(), true)]);
    }

    #[test]
    fn duplicate_names_are_suffixed() {
        let input = Input::new(MemoryConfig::new());
        let first = InputFrame::new(&input, "Ship", |r| {
            assert_eq!(r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::SPACE))), "Fire");
        });
        let second = InputFrame::new(&input, "Turret", |r| {
            assert_eq!(r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::F))), "Fire_1");
            assert_eq!(r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::G))), "Fire_2");
        });
        first.set_active(true);
        second.set_active(true);

        input.handle_event(&down(Keycode::F));
        assert!(input.is_action_active("Fire_1"));
        assert!(!input.is_action_active("Fire"));
        assert_eq!(input.binding_string("Fire_1").as_deref(), Some("Key102,disabled"));
        assert_eq!(input.action_names(), ["Fire", "Fire_1", "Fire_2"]);
    }

    #[test]
    #[should_panic(expected = "registered as both")]
    fn action_and_axis_in_one_group_is_fatal() {
        let input = Input::new(MemoryConfig::new());
        let _frame = InputFrame::new(&input, "Ship", |r| {
            r.group("Flight");
            r.add_axis("Pitch", AxisBinding::digital(KeyBinding::key(Keycode::S), KeyBinding::key(Keycode::W)));
            r.add_action("Pitch", ActionBinding::default());
        });
    }

    #[test]
    fn persisted_strings_override_defaults() {
        let config = MemoryConfig::new()
            .with("Fire", "Key102Mod192,Key32")
            .with("Roll", "disabled,disabled,Key101,garbage");
        let input = Input::new(config);
        let frame = InputFrame::new(&input, "Ship", |r| {
            r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::SPACE)));
            r.add_axis("Roll", AxisBinding::digital(KeyBinding::key(Keycode::D), KeyBinding::key(Keycode::A)));
        });
        frame.set_active(true);

        assert_eq!(input.binding_string("Fire").as_deref(), Some("Key102Mod192,Key32"));
        assert_eq!(input.binding_string("Roll").as_deref(), Some("disabled,disabled,Key101,disabled"));
    }

    #[test]
    fn rebinding_persists() {
        let input = Input::new(MemoryConfig::new());
        let frame = InputFrame::new(&input, "Ship", |r| {
            r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::SPACE)));
        });
        frame.set_active(true);

        input.set_binding_from_string("Fire", "Key113").unwrap();
        assert_eq!(input.config_string("Fire").as_deref(), Some("Key113,disabled"));

        input.handle_event(&down(Keycode::Q));
        assert!(input.is_action_active("Fire"));
        assert_eq!(input.describe_binding("Fire").as_deref(), Some("Q"));

        let missing = input.set_binding_from_string("Nope", "Key1");
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[test]
    fn dropping_last_frame_unregisters() {
        let input = Input::new(MemoryConfig::new());
        let build = |r: &mut crate::frame::BindingRegistrar<'_>| {
            r.page("Ship").group("Weapons");
            r.add_action("Fire", ActionBinding::single(KeyBinding::key(Keycode::SPACE)));
        };
        let first = InputFrame::new(&input, "Ship", build);
        let second = InputFrame::new(&input, "Ship", |_| panic!("shared container is not re-seeded"));
        assert!(Rc::ptr_eq(first.container(), second.container()));

        let pages = input.pages();
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0].1.group("Weapons").and_then(|g| g.get("Fire")),
            Some(EntryKind::Action)
        );

        drop(first);
        assert_eq!(input.action_names(), ["Fire"]);
        drop(second);
        assert!(input.action_names().is_empty());
        assert!(input.pages().is_empty());

        // The name is free again.
        let again = InputFrame::new(&input, "Ship", build);
        assert_eq!(again.container().action_names(), ["Fire"]);
    }

    #[test]
    fn shared_container_dispatches_once() {
        let input = Input::new(MemoryConfig::new());
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let lower = InputFrame::new(&input, "Console", |r| {
            let mut action = ActionBinding::single(KeyBinding::key(Keycode::F));
            action.set_callback(move |_| sink.set(sink.get() + 1));
            r.add_action("Toggle", action);
        });
        let upper = InputFrame::new(&input, "Console", |_| {});
        lower.set_active(true);
        upper.set_active(true);

        assert_eq!(input.handle_event(&down(Keycode::F)), Response::Matched);
        assert_eq!(hits.get(), 1);
        assert_eq!(input.handle_event(&down(Keycode::G)), Response::NoMatch);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn activation_applies_from_next_event() {
        let input = Input::new(MemoryConfig::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let ship = InputFrame::new(&input, "Ship", |r| {
            r.add_action("Open", ActionBinding::single(KeyBinding::key(Keycode::ESCAPE)));
        });
        let menu = InputFrame::new(&input, "Menu", |r| {
            r.add_action("Close", ActionBinding::single(KeyBinding::key(Keycode::ESCAPE)));
        });
        ship.set_active(true);

        let menu_state = Rc::clone(&menu.state);
        let sink = Rc::clone(&log);
        ship.set_action_callback("Open", move |pressed| {
            sink.borrow_mut().push(format!("open:{pressed}"));
            if pressed {
                menu_state.active.set(true);
            }
        });
        let sink = Rc::clone(&log);
        menu.set_action_callback("Close", move |pressed| {
            sink.borrow_mut().push(format!("close:{pressed}"));
        });

        // The press opens the menu above the ship; the release already goes
        // to the menu and never reaches the ship.
        input.handle_event(&down(Keycode::ESCAPE));
        assert!(menu.is_active());
        input.handle_event(&up(Keycode::ESCAPE));
        assert_eq!(*log.borrow(), ["open:true", "close:false"]);
    }

    #[test]
    fn axis_queries_and_settings() {
        let config = MemoryConfig::new().with(keys::INVERT_MOUSE_Y, "1");
        let input = Input::new(config);
        let frame = InputFrame::new(&input, "Ship", |r| {
            r.add_axis("Yaw", AxisBinding::digital(KeyBinding::key(Keycode::D), KeyBinding::key(Keycode::A)));
        });
        frame.set_active(true);

        input.handle_event(&down(Keycode::A));
        assert_relative_eq!(input.axis_value("Yaw"), -1.0);
        assert_relative_eq!(frame.axis_value("Yaw"), -1.0);
        assert_relative_eq!(input.axis_value("Missing"), 0.0);

        input.handle_event(&InputEvent::MouseMotion { dx: 2.0, dy: 3.0 });
        assert_relative_eq!(input.mouse_motion().y, -3.0);
        input.new_frame();
        assert_relative_eq!(input.mouse_motion().y, 0.0);
    }

    #[test]
    fn disabled_joysticks_do_not_dispatch() {
        let config = MemoryConfig::new().with(keys::ENABLE_JOYSTICK, "0");
        let input = Input::new(config);
        input.handle_event(&InputEvent::JoyDeviceAdded {
            joystick: JoystickId(0),
            info: JoystickInfo::new(JoystickGuid([3; 16]), "Pad", 2, 4, 0),
        });
        let pad = input.devices().joysticks.reference(JoystickId(0)).unwrap();
        let frame = InputFrame::new(&input, "Ship", |r| {
            r.add_action("Fire", ActionBinding::single(KeyBinding::joy_button(pad, 0)));
        });
        frame.set_active(true);

        let press = InputEvent::JoyButtonDown {
            joystick: JoystickId(0),
            button: 0,
        };
        assert!(!input.joystick_enabled());
        assert_eq!(input.handle_event(&press), Response::NoMatch);
        assert!(!input.is_action_active("Fire"));

        input.set_joystick_enabled(true).unwrap();
        assert_eq!(input.config_string(keys::ENABLE_JOYSTICK).as_deref(), Some("1"));
        assert_eq!(input.handle_event(&press), Response::Matched);
        assert!(input.is_action_active("Fire"));
    }
}
