//! Modifier key flags.
//!
//! Two flag sets live here. [`RawModifiers`] is what the host reports: one bit
//! per physical key, left and right kept apart. [`Modifiers`] is the logical
//! set bindings store and compare, where left and right are folded together.
//! Bit values follow SDL's `KMOD_*` layout so persisted `Mod<int>` values stay
//! interchangeable with configs written by SDL-based tools.

use bitflags::bitflags;

bitflags! {
    /// Physical modifier key state as reported by the host backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RawModifiers: u16 {
        const LSHIFT = 0x0001;
        const RSHIFT = 0x0002;
        const LCTRL  = 0x0040;
        const RCTRL  = 0x0080;
        const LALT   = 0x0100;
        const RALT   = 0x0200;
        const LMETA  = 0x0400;
        const RMETA  = 0x0800;
        /// Num lock. Never part of a binding.
        const NUM    = 0x1000;
        /// Caps lock. Never part of a binding.
        const CAPS   = 0x2000;
    }
}

bitflags! {
    /// Logical modifier flags.
    ///
    /// Each flag covers both physical sides, so `SHIFT` is set whether the
    /// left, the right, or both shift keys are held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u16 {
        /// Either Shift key is pressed.
        const SHIFT = 0x0003;
        /// Either Control key is pressed.
        const CTRL  = 0x00C0;
        /// Either Alt key is pressed.
        const ALT   = 0x0300;
        /// Either Meta/Super/Command key is pressed.
        const META  = 0x0C00;
    }
}

impl Modifiers {
    /// Fold raw left/right modifier state into logical flags.
    ///
    /// Lock keys and any unknown bits are dropped.
    #[must_use]
    pub const fn unify(raw: RawModifiers) -> Self {
        let bits = raw.bits();
        let mut out = 0u16;
        if bits & Self::SHIFT.bits() != 0 {
            out |= Self::SHIFT.bits();
        }
        if bits & Self::CTRL.bits() != 0 {
            out |= Self::CTRL.bits();
        }
        if bits & Self::ALT.bits() != 0 {
            out |= Self::ALT.bits();
        }
        if bits & Self::META.bits() != 0 {
            out |= Self::META.bits();
        }
        Self::from_bits_retain(out)
    }

    /// Unify an arbitrary integer mask, as read from a `Mod<int>` suffix.
    #[must_use]
    pub const fn from_mask(mask: u16) -> Self {
        Self::unify(RawModifiers::from_bits_retain(mask))
    }

    /// Returns `true` if `current` (already unified) is exactly this combination.
    ///
    /// Equality, not containment: a `CTRL` binding does not fire while
    /// `CTRL | SHIFT` is held.
    #[inline]
    #[must_use]
    pub fn matches(self, current: Self) -> bool {
        self == current
    }

    /// Returns `true` if the Shift key is pressed.
    #[inline]
    #[must_use]
    pub const fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns `true` if the Control key is pressed.
    #[inline]
    #[must_use]
    pub const fn ctrl(self) -> bool {
        self.contains(Self::CTRL)
    }

    /// Returns `true` if the Alt key is pressed.
    #[inline]
    #[must_use]
    pub const fn alt(self) -> bool {
        self.contains(Self::ALT)
    }

    /// Returns `true` if the Meta key is pressed.
    #[inline]
    #[must_use]
    pub const fn meta(self) -> bool {
        self.contains(Self::META)
    }

    /// Human readable prefix such as `"Ctrl+Shift+"`, empty when no flags are set.
    #[must_use]
    pub fn describe_prefix(self) -> String {
        let mut out = String::new();
        if self.ctrl() {
            out.push_str("Ctrl+");
        }
        if self.alt() {
            out.push_str("Alt+");
        }
        if self.shift() {
            out.push_str("Shift+");
        }
        if self.meta() {
            out.push_str("Meta+");
        }
        out
    }
}

impl From<RawModifiers> for Modifiers {
    fn from(raw: RawModifiers) -> Self {
        Self::unify(raw)
    }
}

impl From<&winit::event::Modifiers> for RawModifiers {
    fn from(modifiers: &winit::event::Modifiers) -> Self {
        use winit::keyboard::ModifiersKeyState::Pressed;

        let state = modifiers.state();
        let mut raw = Self::empty();

        // Backends that cannot tell sides apart report `Unknown` for both;
        // fall back to the aggregate state and attribute it to the left key.
        let sided = [
            (modifiers.lshift_state(), modifiers.rshift_state(), state.shift_key(), Self::LSHIFT, Self::RSHIFT),
            (modifiers.lcontrol_state(), modifiers.rcontrol_state(), state.control_key(), Self::LCTRL, Self::RCTRL),
            (modifiers.lalt_state(), modifiers.ralt_state(), state.alt_key(), Self::LALT, Self::RALT),
            (modifiers.lsuper_state(), modifiers.rsuper_state(), state.super_key(), Self::LMETA, Self::RMETA),
        ];
        for (left, right, any, left_bit, right_bit) in sided {
            if left == Pressed {
                raw |= left_bit;
            }
            if right == Pressed {
                raw |= right_bit;
            }
            if any && left != Pressed && right != Pressed {
                raw |= left_bit;
            }
        }
        raw
    }
}
