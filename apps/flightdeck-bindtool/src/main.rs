//! Flightdeck binding tool
//!
//! Inspects and edits the binding file used by the Flightdeck input layer, and
//! replays scripted input through the demo ship/console frames.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p flightdeck-bindtool -- [--config <PATH>] <COMMAND>
//! ```
//!
//! ## Commands
//!
//! - `list`: Print every page, group and binding with its current description
//! - `get <NAME>`: Print the stored string for one binding
//! - `set <NAME> <BINDING>`: Rebind and save, e.g. `set BindPrimaryFire Key102,MWh1`
//! - `replay <SCRIPT>`: Feed a script of input events through the frames
//! - `settings [--joystick <BOOL>] [--invert-mouse-y <BOOL>]`: Show or change settings
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod demo;
mod script;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flightdeck_core::IniConfig;
use flightdeck_input::{EntryKind, Input, InputFrameStatusTicket};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::demo::Demo;
use crate::script::Step;

#[derive(Parser, Debug)]
#[command(name = "flightdeck-bindtool", version, about = "Inspect, edit and replay input bindings")]
struct Cli {
    /// Binding file to read and write.
    #[arg(short, long, default_value = "bindings.ini")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all pages, groups and bindings.
    List,
    /// Print the stored binding string for one action or axis.
    Get { name: String },
    /// Rebind an action or axis and save the file.
    Set { name: String, binding: String },
    /// Replay a script of input events.
    Replay { script: PathBuf },
    /// Show or change input settings.
    Settings {
        #[arg(long)]
        joystick: Option<bool>,
        #[arg(long)]
        invert_mouse_y: Option<bool>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = IniConfig::load(&cli.config)
        .with_context(|| format!("failed to load bindings from {}", cli.config.display()))?;
    let input = Input::new(config);
    let demo = Demo::register(&input);

    match cli.command {
        Command::List => list(&input, out),
        Command::Get { name } => {
            let binding = input
                .binding_string(&name)
                .with_context(|| format!("no binding named {name:?}"))?;
            writeln!(out, "{binding}")?;
            Ok(())
        }
        Command::Set { name, binding } => {
            input
                .set_binding_from_string(&name, &binding)
                .with_context(|| format!("failed to rebind {name:?}"))?;
            let stored = input.binding_string(&name).unwrap_or_default();
            let described = input.describe_binding(&name).unwrap_or_default();
            writeln!(out, "{name} = {stored} ({described})")?;
            Ok(())
        }
        Command::Replay { script } => {
            let text = fs::read_to_string(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let steps = script::parse_script(&text)?;
            info!("Replaying {} steps from {}", steps.len(), script.display());
            replay(&input, &demo, steps, out)
        }
        Command::Settings {
            joystick,
            invert_mouse_y,
        } => {
            if let Some(enabled) = joystick {
                input.set_joystick_enabled(enabled)?;
            }
            if let Some(invert) = invert_mouse_y {
                input.set_invert_mouse_y(invert)?;
            }
            writeln!(out, "joystick enabled: {}", input.joystick_enabled())?;
            writeln!(out, "invert mouse y: {}", input.invert_mouse_y())?;
            Ok(())
        }
    }
}

fn list(input: &Input, out: &mut impl Write) -> Result<()> {
    for (page_name, page) in input.pages() {
        writeln!(out, "[{page_name}]")?;
        for (group_name, group) in page.groups() {
            writeln!(out, "  {group_name}")?;
            for (name, kind) in group.entries() {
                let tag = match kind {
                    EntryKind::Action => "action",
                    EntryKind::Axis => "axis",
                };
                let described = input.describe_binding(name).unwrap_or_default();
                writeln!(out, "    {name:<24} {tag:<6} {described}")?;
            }
        }
    }
    Ok(())
}

fn replay(input: &Input, demo: &Demo, steps: Vec<Step>, out: &mut impl Write) -> Result<()> {
    let mut console_focus: Option<InputFrameStatusTicket> = None;
    for step in steps {
        match step {
            Step::Event(event) => {
                let response = input.handle_event(&event);
                writeln!(out, "{event:?} -> {response:?}")?;
                for line in demo.drain_log() {
                    writeln!(out, "  {line}")?;
                }
                if demo.toggle_requested.take() {
                    if let Some(ticket) = console_focus.take() {
                        drop(ticket);
                        writeln!(out, "  console closed")?;
                    } else {
                        console_focus = Some(input.disable_all_input_frame_except(&demo.console));
                        writeln!(out, "  console opened")?;
                    }
                }
            }
            Step::NewFrame => {
                input.new_frame();
                writeln!(out, "-- frame --")?;
            }
            Step::Query(name) => {
                if input.axis_names().contains(&name) {
                    writeln!(out, "{name} = {:.2}", input.axis_value(&name))?;
                } else if input.action_names().contains(&name) {
                    writeln!(out, "{name} = {}", input.is_action_active(&name))?;
                } else {
                    writeln!(out, "{name}: no such binding")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("flightdeck-bindtool").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn list_shows_pages_and_descriptions() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bindings.ini");
        let output = run_capture(&["--config", config.to_str().unwrap(), "list"]).unwrap();
        assert!(output.contains("[Ship]"));
        assert!(output.contains("[General]"));
        assert!(output.contains("BindAxisPitch"));
        assert!(output.contains("Weapons"));
    }

    #[test]
    fn set_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bindings.ini");
        let path = config.to_str().unwrap();

        run_capture(&["--config", path, "set", "BindTargetObject", "Key102"]).unwrap();
        assert!(fs::read_to_string(&config).unwrap().contains("BindTargetObject"));

        let output = run_capture(&["--config", path, "get", "BindTargetObject"]).unwrap();
        assert!(output.starts_with("Key102"));
    }

    #[test]
    fn unknown_binding_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bindings.ini");
        let path = config.to_str().unwrap();
        assert!(run_capture(&["--config", path, "get", "BindWarpDrive"]).is_err());
        assert!(run_capture(&["--config", path, "set", "BindWarpDrive", "Key102"]).is_err());
    }

    #[test]
    fn settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bindings.ini");
        let path = config.to_str().unwrap();

        let output = run_capture(&["--config", path, "settings", "--invert-mouse-y", "true"]).unwrap();
        assert!(output.contains("invert mouse y: true"));
        let output = run_capture(&["--config", path, "settings"]).unwrap();
        assert!(output.contains("invert mouse y: true"));
    }

    #[test]
    fn replay_toggles_console_focus() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("bindings.ini");
        let script = dir.path().join("script.txt");
        fs::write(
            &script,
            "down w\nquery BindAxisPitch\nup w\ndown `\nup `\ndown w\nquery BindAxisPitch\ndown `\n",
        )
        .unwrap();

        let output = run_capture(&[
            "--config",
            config.to_str().unwrap(),
            "replay",
            script.to_str().unwrap(),
        ])
        .unwrap();

        assert!(output.contains("console opened"));
        assert!(output.contains("console closed"));
        // With the console focused the ship callback no longer fires for W.
        let fired = output.lines().filter(|l| *l == "  BindAxisPitch = -1.00").count();
        assert_eq!(fired, 1);
    }
}
