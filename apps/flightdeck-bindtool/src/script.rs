//! Line-based event scripts for `replay`.
//!
//! ```text
//! # comment
//! down w            key press (letter, digit, code, or name such as `space`)
//! up w
//! repeat w          auto-repeat press
//! mods 64           raw modifier mask (64 = left ctrl)
//! wheel 0 -1
//! motion 4 -2
//! joy-add 0 030000005e0400008e02000010010000 6 11 1 Xbox Controller
//! joy-remove 0
//! button 0 3 down
//! hat 0 0 1
//! axis 0 1 -0.5
//! focus-lost
//! frame             end of a host frame
//! query BindAxisPitch
//! ```

use anyhow::{anyhow, bail, Context, Result};
use flightdeck_input::{
    HatDirection, InputEvent, JoystickGuid, JoystickId, JoystickInfo, Keycode, RawModifiers,
};

/// One line of a script.
#[derive(Debug, Clone)]
pub enum Step {
    Event(InputEvent),
    NewFrame,
    Query(String),
}

/// Parse a whole script. Errors name the offending line.
pub fn parse_script(text: &str) -> Result<Vec<Step>> {
    let mut modifiers = RawModifiers::empty();
    let mut steps = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step =
            parse_line(line, &mut modifiers).with_context(|| format!("line {}: {line:?}", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str, modifiers: &mut RawModifiers) -> Result<Step> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let mut next = |what: &str| words.next().ok_or_else(|| anyhow!("missing {what}"));

    let event = match command {
        "down" => InputEvent::KeyDown {
            key: parse_key(next("key")?)?,
            modifiers: *modifiers,
            repeat: false,
        },
        "repeat" => InputEvent::KeyDown {
            key: parse_key(next("key")?)?,
            modifiers: *modifiers,
            repeat: true,
        },
        "up" => InputEvent::KeyUp {
            key: parse_key(next("key")?)?,
            modifiers: *modifiers,
        },
        "mods" => {
            *modifiers = RawModifiers::from_bits_truncate(next("mask")?.parse()?);
            InputEvent::ModifiersChanged(*modifiers)
        }
        "wheel" => InputEvent::MouseWheel {
            x: next("x")?.parse()?,
            y: next("y")?.parse()?,
        },
        "motion" => InputEvent::MouseMotion {
            dx: next("dx")?.parse()?,
            dy: next("dy")?.parse()?,
        },
        "joy-add" => {
            let joystick = JoystickId(next("id")?.parse()?);
            let guid: JoystickGuid = next("guid")?
                .parse()
                .map_err(|()| anyhow!("malformed guid"))?;
            let axes = next("axis count")?.parse()?;
            let buttons = next("button count")?.parse()?;
            let hats = next("hat count")?.parse()?;
            let name = line.split_whitespace().skip(6).collect::<Vec<_>>().join(" ");
            InputEvent::JoyDeviceAdded {
                joystick,
                info: JoystickInfo::new(guid, name, axes, buttons, hats),
            }
        }
        "joy-remove" => InputEvent::JoyDeviceRemoved {
            joystick: JoystickId(next("id")?.parse()?),
        },
        "button" => {
            let joystick = JoystickId(next("id")?.parse()?);
            let button = next("button")?.parse()?;
            match next("state")? {
                "down" => InputEvent::JoyButtonDown { joystick, button },
                "up" => InputEvent::JoyButtonUp { joystick, button },
                other => bail!("button state must be down or up, got {other:?}"),
            }
        }
        "hat" => InputEvent::JoyHatMotion {
            joystick: JoystickId(next("id")?.parse()?),
            hat: next("hat")?.parse()?,
            direction: HatDirection::from_bits_truncate(next("direction")?.parse()?),
        },
        "axis" => InputEvent::JoyAxisMotion {
            joystick: JoystickId(next("id")?.parse()?),
            axis: next("axis")?.parse()?,
            value: next("value")?.parse::<f32>()?.clamp(-1.0, 1.0),
        },
        "focus-lost" => InputEvent::FocusLost,
        "frame" => return Ok(Step::NewFrame),
        "query" => return Ok(Step::Query(next("name")?.to_string())),
        other => bail!("unknown command {other:?}"),
    };
    Ok(Step::Event(event))
}

/// A key as a single character, a decimal code, or a name.
pub fn parse_key(token: &str) -> Result<Keycode> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_graphic() {
            return Ok(Keycode(u32::from(c.to_ascii_lowercase())));
        }
    }
    if let Ok(code) = token.parse::<u32>() {
        return Ok(Keycode(code));
    }
    let key = match token.to_ascii_lowercase().as_str() {
        "space" => Keycode::SPACE,
        "return" | "enter" => Keycode::RETURN,
        "escape" | "esc" => Keycode::ESCAPE,
        "tab" => Keycode::TAB,
        "backspace" => Keycode::BACKSPACE,
        "backquote" | "grave" => Keycode::BACKQUOTE,
        "up" => Keycode::UP,
        "down" => Keycode::DOWN,
        "left" => Keycode::LEFT,
        "right" => Keycode::RIGHT,
        "lshift" => Keycode::LSHIFT,
        "lctrl" => Keycode::LCTRL,
        "f1" => Keycode::F1,
        "f2" => Keycode::F2,
        "f3" => Keycode::F3,
        "f4" => Keycode::F4,
        _ => bail!("unknown key {token:?}"),
    };
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_by_char_code_and_name() {
        assert_eq!(parse_key("W").unwrap(), Keycode::W);
        assert_eq!(parse_key("`").unwrap(), Keycode::BACKQUOTE);
        assert_eq!(parse_key("119").unwrap(), Keycode::W);
        assert_eq!(parse_key("Space").unwrap(), Keycode::SPACE);
        assert!(parse_key("hyper").is_err());
    }

    #[test]
    fn modifiers_carry_onto_key_events() {
        let steps = parse_script("mods 64\ndown s\n").unwrap();
        assert_eq!(steps.len(), 2);
        match &steps[1] {
            Step::Event(InputEvent::KeyDown { key, modifiers, repeat }) => {
                assert_eq!(*key, Keycode::S);
                assert_eq!(*modifiers, RawModifiers::LCTRL);
                assert!(!repeat);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn joystick_lines() {
        let script = "\
            # pad
            joy-add 2 030000005e0400008e02000010010000 6 11 1 Xbox Controller
            button 2 3 down
            hat 2 0 9
            axis 2 1 -1.5
            frame
            query BindAxisPitch
        ";
        let steps = parse_script(script).unwrap();
        assert_eq!(steps.len(), 6);
        match &steps[0] {
            Step::Event(InputEvent::JoyDeviceAdded { joystick, info }) => {
                assert_eq!(*joystick, JoystickId(2));
                assert_eq!(info.name, "Xbox Controller");
                assert_eq!(info.button_count(), 11);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            steps[2],
            Step::Event(InputEvent::JoyHatMotion { direction, .. })
                if direction == HatDirection::UP | HatDirection::LEFT
        ));
        assert!(matches!(
            steps[3],
            Step::Event(InputEvent::JoyAxisMotion { value, .. }) if (value + 1.0).abs() < f32::EPSILON
        ));
        assert!(matches!(steps[4], Step::NewFrame));
        assert!(matches!(&steps[5], Step::Query(name) if name == "BindAxisPitch"));
    }

    #[test]
    fn errors_name_the_line() {
        let err = parse_script("down w\nbutton 0 1 sideways\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
        assert!(parse_script("teleport").is_err());
        assert!(parse_script("wheel 1").is_err());
    }
}
