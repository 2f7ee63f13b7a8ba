//! Translation of winit window and device events.

use winit::dpi::PhysicalPosition;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::event::InputEvent;
use crate::keycode::Keycode;
use crate::modifiers::RawModifiers;
use crate::mouse::MouseButton;

/// Stateful converter from winit events to [`InputEvent`]s.
///
/// Key events in winit do not carry modifier state, so the translator keeps
/// the last reported modifiers and stamps them onto every key event.
#[derive(Debug, Default)]
pub struct WinitTranslator {
    modifiers: RawModifiers,
    cursor: Option<PhysicalPosition<f64>>,
}

impl WinitTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Modifiers most recently reported by the window.
    #[must_use]
    pub const fn modifiers(&self) -> RawModifiers {
        self.modifiers
    }

    /// Translate a window event. Events with no counterpart yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = keycode_from_winit(code)?;
                Some(match event.state {
                    ElementState::Pressed => InputEvent::KeyDown {
                        key,
                        modifiers: self.modifiers,
                        repeat: event.repeat,
                    },
                    ElementState::Released => InputEvent::KeyUp {
                        key,
                        modifiers: self.modifiers,
                    },
                })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = RawModifiers::from(modifiers);
                Some(InputEvent::ModifiersChanged(self.modifiers))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::try_from(*button).ok()?;
                Some(match state {
                    ElementState::Pressed => InputEvent::MouseButtonDown(button),
                    ElementState::Released => InputEvent::MouseButtonUp(button),
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = wheel_delta(*delta);
                Some(InputEvent::MouseWheel { x, y })
            }
            WindowEvent::CursorMoved { position, .. } => {
                let previous = self.cursor.replace(*position)?;
                Some(InputEvent::MouseMotion {
                    dx: (position.x - previous.x) as f32,
                    dy: (position.y - previous.y) as f32,
                })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::Focused(false) => {
                self.modifiers = RawModifiers::empty();
                self.cursor = None;
                Some(InputEvent::FocusLost)
            }
            _ => None,
        }
    }

    /// Translate raw device motion, used while the cursor is captured.
    #[must_use]
    pub fn translate_device(&self, event: &DeviceEvent) -> Option<InputEvent> {
        match event {
            DeviceEvent::MouseMotion { delta } => Some(InputEvent::MouseMotion {
                dx: delta.0 as f32,
                dy: delta.1 as f32,
            }),
            _ => None,
        }
    }
}

/// Wheel movement in lines; pixel deltas are scaled down to roughly match.
#[must_use]
pub fn wheel_delta(delta: MouseScrollDelta) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => (x, y),
        MouseScrollDelta::PixelDelta(pos) => (pos.x as f32 / 100.0, pos.y as f32 / 100.0),
    }
}

/// Map a winit physical key to its integer key code.
#[must_use]
pub const fn keycode_from_winit(code: KeyCode) -> Option<Keycode> {
    let key = match code {
        KeyCode::KeyA => Keycode::A,
        KeyCode::KeyB => Keycode::B,
        KeyCode::KeyC => Keycode::C,
        KeyCode::KeyD => Keycode::D,
        KeyCode::KeyE => Keycode::E,
        KeyCode::KeyF => Keycode::F,
        KeyCode::KeyG => Keycode::G,
        KeyCode::KeyH => Keycode::H,
        KeyCode::KeyI => Keycode::I,
        KeyCode::KeyJ => Keycode::J,
        KeyCode::KeyK => Keycode::K,
        KeyCode::KeyL => Keycode::L,
        KeyCode::KeyM => Keycode::M,
        KeyCode::KeyN => Keycode::N,
        KeyCode::KeyO => Keycode::O,
        KeyCode::KeyP => Keycode::P,
        KeyCode::KeyQ => Keycode::Q,
        KeyCode::KeyR => Keycode::R,
        KeyCode::KeyS => Keycode::S,
        KeyCode::KeyT => Keycode::T,
        KeyCode::KeyU => Keycode::U,
        KeyCode::KeyV => Keycode::V,
        KeyCode::KeyW => Keycode::W,
        KeyCode::KeyX => Keycode::X,
        KeyCode::KeyY => Keycode::Y,
        KeyCode::KeyZ => Keycode::Z,
        KeyCode::Digit0 => Keycode::NUM_0,
        KeyCode::Digit1 => Keycode::NUM_1,
        KeyCode::Digit2 => Keycode::NUM_2,
        KeyCode::Digit3 => Keycode::NUM_3,
        KeyCode::Digit4 => Keycode::NUM_4,
        KeyCode::Digit5 => Keycode::NUM_5,
        KeyCode::Digit6 => Keycode::NUM_6,
        KeyCode::Digit7 => Keycode::NUM_7,
        KeyCode::Digit8 => Keycode::NUM_8,
        KeyCode::Digit9 => Keycode::NUM_9,
        KeyCode::Enter => Keycode::RETURN,
        KeyCode::Escape => Keycode::ESCAPE,
        KeyCode::Backspace => Keycode::BACKSPACE,
        KeyCode::Tab => Keycode::TAB,
        KeyCode::Space => Keycode::SPACE,
        KeyCode::Quote => Keycode::QUOTE,
        KeyCode::Comma => Keycode::COMMA,
        KeyCode::Minus => Keycode::MINUS,
        KeyCode::Period => Keycode::PERIOD,
        KeyCode::Slash => Keycode::SLASH,
        KeyCode::Semicolon => Keycode::SEMICOLON,
        KeyCode::Equal => Keycode::EQUALS,
        KeyCode::BracketLeft => Keycode::LEFT_BRACKET,
        KeyCode::Backslash => Keycode::BACKSLASH,
        KeyCode::BracketRight => Keycode::RIGHT_BRACKET,
        KeyCode::Backquote => Keycode::BACKQUOTE,
        KeyCode::Delete => Keycode::DELETE,
        KeyCode::CapsLock => Keycode::CAPS_LOCK,
        KeyCode::F1 => Keycode::F1,
        KeyCode::F2 => Keycode::F2,
        KeyCode::F3 => Keycode::F3,
        KeyCode::F4 => Keycode::F4,
        KeyCode::F5 => Keycode::F5,
        KeyCode::F6 => Keycode::F6,
        KeyCode::F7 => Keycode::F7,
        KeyCode::F8 => Keycode::F8,
        KeyCode::F9 => Keycode::F9,
        KeyCode::F10 => Keycode::F10,
        KeyCode::F11 => Keycode::F11,
        KeyCode::F12 => Keycode::F12,
        KeyCode::PrintScreen => Keycode::PRINT_SCREEN,
        KeyCode::ScrollLock => Keycode::SCROLL_LOCK,
        KeyCode::Pause => Keycode::PAUSE,
        KeyCode::Insert => Keycode::INSERT,
        KeyCode::Home => Keycode::HOME,
        KeyCode::PageUp => Keycode::PAGE_UP,
        KeyCode::End => Keycode::END,
        KeyCode::PageDown => Keycode::PAGE_DOWN,
        KeyCode::ArrowRight => Keycode::RIGHT,
        KeyCode::ArrowLeft => Keycode::LEFT,
        KeyCode::ArrowDown => Keycode::DOWN,
        KeyCode::ArrowUp => Keycode::UP,
        KeyCode::NumLock => Keycode::NUM_LOCK,
        KeyCode::NumpadDivide => Keycode::KP_DIVIDE,
        KeyCode::NumpadMultiply => Keycode::KP_MULTIPLY,
        KeyCode::NumpadSubtract => Keycode::KP_MINUS,
        KeyCode::NumpadAdd => Keycode::KP_PLUS,
        KeyCode::NumpadEnter => Keycode::KP_ENTER,
        KeyCode::Numpad1 => Keycode::KP_1,
        KeyCode::Numpad2 => Keycode::KP_2,
        KeyCode::Numpad3 => Keycode::KP_3,
        KeyCode::Numpad4 => Keycode::KP_4,
        KeyCode::Numpad5 => Keycode::KP_5,
        KeyCode::Numpad6 => Keycode::KP_6,
        KeyCode::Numpad7 => Keycode::KP_7,
        KeyCode::Numpad8 => Keycode::KP_8,
        KeyCode::Numpad9 => Keycode::KP_9,
        KeyCode::Numpad0 => Keycode::KP_0,
        KeyCode::NumpadDecimal => Keycode::KP_PERIOD,
        KeyCode::ControlLeft => Keycode::LCTRL,
        KeyCode::ShiftLeft => Keycode::LSHIFT,
        KeyCode::AltLeft => Keycode::LALT,
        KeyCode::SuperLeft => Keycode::LMETA,
        KeyCode::ControlRight => Keycode::RCTRL,
        KeyCode::ShiftRight => Keycode::RSHIFT,
        KeyCode::AltRight => Keycode::RALT,
        KeyCode::SuperRight => Keycode::RMETA,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn letters_and_arrows_map() {
        assert_eq!(keycode_from_winit(KeyCode::KeyW), Some(Keycode::W));
        assert_eq!(keycode_from_winit(KeyCode::ArrowUp), Some(Keycode::UP));
        assert_eq!(keycode_from_winit(KeyCode::F10), Some(Keycode::F10));
        assert_eq!(keycode_from_winit(KeyCode::Numpad5), Some(Keycode::KP_5));
        assert_eq!(keycode_from_winit(KeyCode::Fn), None);
    }

    #[test]
    fn pixel_wheel_is_scaled() {
        let (x, y) = wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(50.0, -200.0)));
        assert_relative_eq!(x, 0.5);
        assert_relative_eq!(y, -2.0);
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), (0.0, 1.0));
    }

    #[test]
    fn focus_loss_clears_modifiers() {
        let mut translator = WinitTranslator::new();
        translator.modifiers = RawModifiers::LCTRL;
        let event = translator.translate(&WindowEvent::Focused(false));
        assert!(matches!(event, Some(InputEvent::FocusLost)));
        assert!(translator.modifiers().is_empty());
        assert!(translator.translate(&WindowEvent::Focused(true)).is_none());
    }

    #[test]
    fn raw_motion_passes_through() {
        let translator = WinitTranslator::new();
        let event = translator.translate_device(&DeviceEvent::MouseMotion { delta: (3.0, -1.5) });
        match event {
            Some(InputEvent::MouseMotion { dx, dy }) => {
                assert_relative_eq!(dx, 3.0);
                assert_relative_eq!(dy, -1.5);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
