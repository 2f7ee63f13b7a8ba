//! Integer key codes.
//!
//! Persisted keyboard bindings store a bare integer (`Key<int>`). The numbering
//! is SDL's virtual key code space: printable keys use their lowercase ASCII
//! value, everything else is its scancode with bit 30 set.

use std::fmt;

const SCANCODE_MASK: u32 = 1 << 30;

const fn from_scancode(scancode: u32) -> Keycode {
    Keycode(scancode | SCANCODE_MASK)
}

/// A virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keycode(pub u32);

impl Keycode {
    pub const RETURN: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const SPACE: Self = Self(32);
    pub const QUOTE: Self = Self(39);
    pub const COMMA: Self = Self(44);
    pub const MINUS: Self = Self(45);
    pub const PERIOD: Self = Self(46);
    pub const SLASH: Self = Self(47);
    pub const NUM_0: Self = Self(48);
    pub const NUM_1: Self = Self(49);
    pub const NUM_2: Self = Self(50);
    pub const NUM_3: Self = Self(51);
    pub const NUM_4: Self = Self(52);
    pub const NUM_5: Self = Self(53);
    pub const NUM_6: Self = Self(54);
    pub const NUM_7: Self = Self(55);
    pub const NUM_8: Self = Self(56);
    pub const NUM_9: Self = Self(57);
    pub const SEMICOLON: Self = Self(59);
    pub const EQUALS: Self = Self(61);
    pub const LEFT_BRACKET: Self = Self(91);
    pub const BACKSLASH: Self = Self(92);
    pub const RIGHT_BRACKET: Self = Self(93);
    pub const BACKQUOTE: Self = Self(96);
    pub const A: Self = Self(97);
    pub const B: Self = Self(98);
    pub const C: Self = Self(99);
    pub const D: Self = Self(100);
    pub const E: Self = Self(101);
    pub const F: Self = Self(102);
    pub const G: Self = Self(103);
    pub const H: Self = Self(104);
    pub const I: Self = Self(105);
    pub const J: Self = Self(106);
    pub const K: Self = Self(107);
    pub const L: Self = Self(108);
    pub const M: Self = Self(109);
    pub const N: Self = Self(110);
    pub const O: Self = Self(111);
    pub const P: Self = Self(112);
    pub const Q: Self = Self(113);
    pub const R: Self = Self(114);
    pub const S: Self = Self(115);
    pub const T: Self = Self(116);
    pub const U: Self = Self(117);
    pub const V: Self = Self(118);
    pub const W: Self = Self(119);
    pub const X: Self = Self(120);
    pub const Y: Self = Self(121);
    pub const Z: Self = Self(122);
    pub const DELETE: Self = Self(127);

    pub const CAPS_LOCK: Self = from_scancode(57);
    pub const F1: Self = from_scancode(58);
    pub const F2: Self = from_scancode(59);
    pub const F3: Self = from_scancode(60);
    pub const F4: Self = from_scancode(61);
    pub const F5: Self = from_scancode(62);
    pub const F6: Self = from_scancode(63);
    pub const F7: Self = from_scancode(64);
    pub const F8: Self = from_scancode(65);
    pub const F9: Self = from_scancode(66);
    pub const F10: Self = from_scancode(67);
    pub const F11: Self = from_scancode(68);
    pub const F12: Self = from_scancode(69);
    pub const PRINT_SCREEN: Self = from_scancode(70);
    pub const SCROLL_LOCK: Self = from_scancode(71);
    pub const PAUSE: Self = from_scancode(72);
    pub const INSERT: Self = from_scancode(73);
    pub const HOME: Self = from_scancode(74);
    pub const PAGE_UP: Self = from_scancode(75);
    pub const END: Self = from_scancode(77);
    pub const PAGE_DOWN: Self = from_scancode(78);
    pub const RIGHT: Self = from_scancode(79);
    pub const LEFT: Self = from_scancode(80);
    pub const DOWN: Self = from_scancode(81);
    pub const UP: Self = from_scancode(82);
    pub const NUM_LOCK: Self = from_scancode(83);
    pub const KP_DIVIDE: Self = from_scancode(84);
    pub const KP_MULTIPLY: Self = from_scancode(85);
    pub const KP_MINUS: Self = from_scancode(86);
    pub const KP_PLUS: Self = from_scancode(87);
    pub const KP_ENTER: Self = from_scancode(88);
    pub const KP_1: Self = from_scancode(89);
    pub const KP_2: Self = from_scancode(90);
    pub const KP_3: Self = from_scancode(91);
    pub const KP_4: Self = from_scancode(92);
    pub const KP_5: Self = from_scancode(93);
    pub const KP_6: Self = from_scancode(94);
    pub const KP_7: Self = from_scancode(95);
    pub const KP_8: Self = from_scancode(96);
    pub const KP_9: Self = from_scancode(97);
    pub const KP_0: Self = from_scancode(98);
    pub const KP_PERIOD: Self = from_scancode(99);
    pub const LCTRL: Self = from_scancode(224);
    pub const LSHIFT: Self = from_scancode(225);
    pub const LALT: Self = from_scancode(226);
    pub const LMETA: Self = from_scancode(227);
    pub const RCTRL: Self = from_scancode(228);
    pub const RSHIFT: Self = from_scancode(229);
    pub const RALT: Self = from_scancode(230);
    pub const RMETA: Self = from_scancode(231);

    /// Raw integer value, as written after `Key` in a binding string.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Display name used in options screens, if the key has one.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::RETURN => "Return",
            Self::ESCAPE => "Escape",
            Self::BACKSPACE => "Backspace",
            Self::TAB => "Tab",
            Self::SPACE => "Space",
            Self::DELETE => "Delete",
            Self::CAPS_LOCK => "CapsLock",
            Self::PRINT_SCREEN => "PrintScreen",
            Self::SCROLL_LOCK => "ScrollLock",
            Self::PAUSE => "Pause",
            Self::INSERT => "Insert",
            Self::HOME => "Home",
            Self::PAGE_UP => "PageUp",
            Self::END => "End",
            Self::PAGE_DOWN => "PageDown",
            Self::RIGHT => "Right",
            Self::LEFT => "Left",
            Self::DOWN => "Down",
            Self::UP => "Up",
            Self::NUM_LOCK => "Numlock",
            Self::KP_DIVIDE => "Keypad /",
            Self::KP_MULTIPLY => "Keypad *",
            Self::KP_MINUS => "Keypad -",
            Self::KP_PLUS => "Keypad +",
            Self::KP_ENTER => "Keypad Enter",
            Self::KP_PERIOD => "Keypad .",
            Self::LCTRL => "Left Ctrl",
            Self::LSHIFT => "Left Shift",
            Self::LALT => "Left Alt",
            Self::LMETA => "Left Meta",
            Self::RCTRL => "Right Ctrl",
            Self::RSHIFT => "Right Shift",
            Self::RALT => "Right Alt",
            Self::RMETA => "Right Meta",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        let code = self.0;
        if (Self::F1.0..=Self::F12.0).contains(&code) {
            return write!(f, "F{}", code - Self::F1.0 + 1);
        }
        if (Self::KP_1.0..=Self::KP_9.0).contains(&code) {
            return write!(f, "Keypad {}", code - Self::KP_1.0 + 1);
        }
        if code == Self::KP_0.0 {
            return f.write_str("Keypad 0");
        }
        match char::from_u32(code) {
            Some(c) if c.is_ascii_graphic() => write!(f, "{}", c.to_ascii_uppercase()),
            _ => write!(f, "Key {code:#x}"),
        }
    }
}
