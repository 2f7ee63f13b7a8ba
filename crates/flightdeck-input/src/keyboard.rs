//! Keyboard input state tracking.

use hashbrown::HashSet;

use crate::keycode::Keycode;
use crate::modifiers::{Modifiers, RawModifiers};

/// Keyboard input state.
///
/// Tracks which keys are held and the most recently reported modifier state.
#[derive(Debug, Default)]
pub struct KeyboardState {
    /// Keys currently held.
    held: HashSet<Keycode>,
    /// Current physical modifier state.
    modifiers: RawModifiers,
}

impl KeyboardState {
    /// Create a new keyboard state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition together with the modifiers reported with it.
    pub fn set_key(&mut self, key: Keycode, pressed: bool, modifiers: RawModifiers) {
        if pressed {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
        self.modifiers = modifiers;
    }

    /// Update modifier key state.
    pub fn set_modifiers(&mut self, modifiers: RawModifiers) {
        self.modifiers = modifiers;
    }

    /// Returns `true` if the key is currently held.
    #[must_use]
    pub fn is_pressed(&self, key: Keycode) -> bool {
        self.held.contains(&key)
    }

    /// Current physical modifier state.
    #[must_use]
    pub const fn raw_modifiers(&self) -> RawModifiers {
        self.modifiers
    }

    /// Current logical modifier state.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        Modifiers::unify(self.modifiers)
    }

    /// Clear all key states.
    pub fn clear(&mut self) {
        self.held.clear();
        self.modifiers = RawModifiers::empty();
    }
}
