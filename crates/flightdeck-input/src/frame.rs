//! Input frames and binding registration.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::binding::{ActionBinding, AxisBinding};
use crate::container::BindingContainer;
use crate::input::{Input, InputShared};
use crate::page::EntryKind;

pub(crate) struct FrameState {
    pub(crate) name: String,
    pub(crate) active: Cell<bool>,
    pub(crate) container: Rc<BindingContainer>,
}

/// An activatable scope over a shared [`BindingContainer`].
///
/// Frames join the top of the dispatch stack when created and leave it when
/// dropped. They start inactive.
pub struct InputFrame {
    pub(crate) state: Rc<FrameState>,
}

impl InputFrame {
    /// Create a frame over the container called `name`.
    ///
    /// If no live container has that name, a new one is made and `register`
    /// fills it. Otherwise the existing container is shared and `register` is
    /// not called.
    pub fn new(input: &Input, name: &str, register: impl FnOnce(&mut BindingRegistrar<'_>)) -> Self {
        let (container, fresh) = input.shared.acquire_container(name);
        if fresh {
            let mut registrar = BindingRegistrar::new(&input.shared, &container);
            register(&mut registrar);
            debug!(
                "Registered binding container {:?} ({} actions, {} axes)",
                name,
                container.action_names().len(),
                container.axis_names().len()
            );
        }

        let state = Rc::new(FrameState {
            name: name.to_string(),
            active: Cell::new(false),
            container,
        });
        input.shared.push_frame(&state);
        Self { state }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.active.get()
    }

    /// Takes effect from the next dispatched event.
    pub fn set_active(&self, active: bool) {
        self.state.active.set(active);
    }

    /// The container backing this frame.
    #[must_use]
    pub fn container(&self) -> &Rc<BindingContainer> {
        &self.state.container
    }

    #[must_use]
    pub fn is_action_active(&self, name: &str) -> bool {
        self.state.container.is_action_active(name)
    }

    #[must_use]
    pub fn axis_value(&self, name: &str) -> f32 {
        self.state.container.axis_value(name)
    }

    /// Attach a callback to one of this frame's actions.
    ///
    /// Returns `false` if the container has no such action.
    pub fn set_action_callback(&self, name: &str, callback: impl Fn(bool) + 'static) -> bool {
        self.state
            .container
            .with_action_mut(name, |action| action.set_callback(callback))
            .is_some()
    }

    /// Attach a callback to one of this frame's axes.
    ///
    /// Returns `false` if the container has no such axis.
    pub fn set_axis_callback(&self, name: &str, callback: impl Fn(f32) + 'static) -> bool {
        self.state
            .container
            .with_axis_mut(name, |axis| axis.set_callback(callback))
            .is_some()
    }
}

impl std::fmt::Debug for InputFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputFrame")
            .field("name", &self.state.name)
            .field("active", &self.state.active.get())
            .finish_non_exhaustive()
    }
}

/// Adds bindings to a freshly created container.
///
/// Each binding is filed under the current page and group, which both start
/// out as the container name.
pub struct BindingRegistrar<'a> {
    input: &'a InputShared,
    container: &'a Rc<BindingContainer>,
    page: String,
    group: String,
}

impl<'a> BindingRegistrar<'a> {
    fn new(input: &'a InputShared, container: &'a Rc<BindingContainer>) -> Self {
        Self {
            input,
            container,
            page: container.name().to_string(),
            group: container.name().to_string(),
        }
    }

    /// File following bindings under `page`.
    pub fn page(&mut self, page: &str) -> &mut Self {
        self.page = page.to_string();
        self
    }

    /// File following bindings under `group` of the current page.
    pub fn group(&mut self, group: &str) -> &mut Self {
        self.group = group.to_string();
        self
    }

    /// Register an action, returning the name it was stored under.
    ///
    /// A persisted string for that name replaces the default bindings; the
    /// default's callback and behavior flags are kept.
    ///
    /// # Panics
    ///
    /// If the current group already holds `name` as an axis.
    pub fn add_action(&mut self, name: &str, mut binding: ActionBinding) -> String {
        let name = self.claim(name, EntryKind::Action);
        if let Some(text) = self.persisted(&name) {
            let devices = self.input.devices.borrow();
            binding.set_from_str(&text, &devices.joysticks);
        }
        self.container.insert_action(name.clone(), binding);
        name
    }

    /// Register an axis, returning the name it was stored under.
    ///
    /// # Panics
    ///
    /// If the current group already holds `name` as an action.
    pub fn add_axis(&mut self, name: &str, mut binding: AxisBinding) -> String {
        let name = self.claim(name, EntryKind::Axis);
        if let Some(text) = self.persisted(&name) {
            let devices = self.input.devices.borrow();
            binding.set_from_str(&text, &devices.joysticks);
        }
        self.container.insert_axis(name.clone(), binding);
        name
    }

    /// Check the group, pick a unique name and record it everywhere.
    fn claim(&self, requested: &str, kind: EntryKind) -> String {
        let mut registry = self.input.registry.borrow_mut();
        registry
            .pages
            .group_mut(&self.page, &self.group)
            .check_kind(&self.group, requested, kind);

        let name = registry.unique_name(requested);
        let owner = Rc::downgrade(self.container);
        match kind {
            EntryKind::Action => registry.actions.insert(name.clone(), owner),
            EntryKind::Axis => registry.axes.insert(name.clone(), owner),
        };
        registry
            .pages
            .group_mut(&self.page, &self.group)
            .insert(&name, kind);
        name
    }

    fn persisted(&self, name: &str) -> Option<String> {
        self.input
            .config
            .borrow()
            .get_string(name)
            .filter(|text| !text.is_empty())
    }
}
