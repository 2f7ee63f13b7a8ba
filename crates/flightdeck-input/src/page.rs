//! Options-screen grouping of bindings.
//!
//! Pages and groups carry no dispatch logic; they only record which names
//! belong together so a configuration UI can lay them out.

use indexmap::IndexMap;
use tracing::error;

/// Whether a registered name is an action or an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Action,
    Axis,
}

impl EntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Axis => "axis",
        }
    }
}

/// A named set of bindings shown together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingGroup {
    entries: IndexMap<String, EntryKind>,
}

impl BindingGroup {
    /// Registered names in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, EntryKind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Kind registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<EntryKind> {
        self.entries.get(name).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Panics if `requested` is already registered here with the other kind.
    pub(crate) fn check_kind(&self, group: &str, requested: &str, kind: EntryKind) {
        if let Some(existing) = self.get(requested) {
            if existing != kind {
                error!(
                    "Binding {:?} in group {:?} is already registered as an {}, cannot add it as an {}",
                    requested,
                    group,
                    existing.as_str(),
                    kind.as_str()
                );
                panic!(
                    "binding {requested:?} in group {group:?} registered as both {} and {}",
                    existing.as_str(),
                    kind.as_str()
                );
            }
        }
    }

    pub(crate) fn insert(&mut self, name: &str, kind: EntryKind) {
        self.entries.insert(name.to_string(), kind);
    }

    fn remove(&mut self, name: &str) -> bool {
        self.entries.shift_remove(name).is_some()
    }
}

/// A named set of groups, typically one tab of an options screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingPage {
    groups: IndexMap<String, BindingGroup>,
}

impl BindingPage {
    /// Groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &BindingGroup)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&BindingGroup> {
        self.groups.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Every page, keyed by name.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pages {
    pages: IndexMap<String, BindingPage>,
}

impl Pages {
    pub(crate) fn group_mut(&mut self, page: &str, group: &str) -> &mut BindingGroup {
        self.pages
            .entry(page.to_string())
            .or_default()
            .groups
            .entry(group.to_string())
            .or_default()
    }

    pub(crate) fn get(&self, page: &str) -> Option<&BindingPage> {
        self.pages.get(page)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &BindingPage)> {
        self.pages.iter().map(|(name, page)| (name.as_str(), page))
    }

    /// Remove `names` from every group, dropping groups and pages left empty.
    pub(crate) fn prune<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let names: Vec<&str> = names.into_iter().collect();
        if names.is_empty() {
            return;
        }
        for page in self.pages.values_mut() {
            for group in page.groups.values_mut() {
                for name in &names {
                    group.remove(name);
                }
            }
            page.groups.retain(|_, group| !group.is_empty());
        }
        self.pages.retain(|_, page| !page.is_empty());
    }
}
