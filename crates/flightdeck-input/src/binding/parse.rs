//! Cursor over a binding string.
//!
//! Every reader returns `None` on mismatch and leaves the cursor untouched, so
//! callers can chain optional sections with `?` and plain `if`.

use std::str::FromStr;

use crate::joystick::{JoystickGuid, Joysticks, JoystickRef, GUID_STRING_LEN};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Consume `tag` if the input starts with it.
    pub(crate) fn eat(&mut self, tag: &str) -> bool {
        match self.rest.strip_prefix(tag) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !accept(*c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    /// Read an unsigned decimal integer.
    pub(crate) fn uint<T: FromStr>(&mut self) -> Option<T> {
        let saved = *self;
        let digits = self.take_while(|c| c.is_ascii_digit());
        let value = digits.parse().ok();
        if value.is_none() {
            *self = saved;
        }
        value
    }

    /// Read a plain decimal float (no exponent, as Rust's `Display` writes them).
    pub(crate) fn float(&mut self) -> Option<f32> {
        let saved = *self;
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.' || c == '-');
        let value = text.parse::<f32>().ok().filter(|v| v.is_finite());
        if value.is_none() {
            *self = saved;
        }
        value
    }

    /// Read a 32 character GUID.
    pub(crate) fn guid(&mut self) -> Option<JoystickGuid> {
        let head = self.rest.get(..GUID_STRING_LEN)?;
        let guid = head.parse().ok()?;
        self.rest = &self.rest[GUID_STRING_LEN..];
        Some(guid)
    }

    /// Read `<guid>/` and resolve it against the connected devices.
    ///
    /// `None` covers a malformed GUID, a missing `/`, and a device that is not
    /// currently connected; all of them leave the binding disabled.
    pub(crate) fn device(&mut self, joysticks: &Joysticks) -> Option<JoystickRef> {
        let saved = *self;
        let resolved = self.guid().and_then(|guid| {
            let id = joysticks.resolve(&guid)?;
            self.eat("/").then_some(JoystickRef { id, guid })
        });
        if resolved.is_none() {
            *self = saved;
        }
        resolved
    }
}
