//! blanks: load a code template, optionally replay a key script, and print the
//! filled-in result along with the tag notifications it produced.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use blanks::cli::{parse_script, CliArgs, ScriptAction};
use blanks::config::EngineConfig;
use blanks::editable::TextEditMsg;
use blanks::keymap::{load_default_keymap, KeyAction, Keymap};
use blanks::template::{Notification, Session, TagSettings};

fn main() -> Result<()> {
    blanks::tracing::init();
    let args = CliArgs::parse();

    let mut config = EngineConfig::load();
    if let Some(path) = &args.tags {
        config.merge_tags(load_tag_file(path)?);
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = delimiter.clone();
    }
    let settings = config
        .into_settings()
        .context("Invalid engine configuration")?;

    let template = fs::read_to_string(&args.template)
        .with_context(|| format!("Failed to read template {}", args.template.display()))?;

    let keymap = Keymap::with_bindings(load_default_keymap());
    let mut session = Session::new(settings).with_keymap(keymap);

    if let Err(err) = session.load(&template) {
        report(&session.take_notifications(), args.json)?;
        return Err(err)
            .with_context(|| format!("Template {} is not valid", args.template.display()));
    }

    if let Some(path) = &args.keys {
        let script = fs::read_to_string(path)
            .with_context(|| format!("Failed to read key script {}", path.display()))?;
        let actions = parse_script(&script).map_err(|(line, e)| {
            anyhow!("{}:{}: {}", path.display(), line, e)
        })?;
        run_script(&mut session, actions);
    }

    report(&session.take_notifications(), args.json)?;
    println!("{}", session.render());
    Ok(())
}

fn load_tag_file(path: &Path) -> Result<HashMap<String, TagSettings>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tag settings {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse tag settings {}", path.display()))
}

fn run_script(session: &mut Session, actions: Vec<ScriptAction>) {
    for action in actions {
        match action {
            ScriptAction::Keys(strokes) => {
                for stroke in strokes {
                    if session.press(stroke) == KeyAction::NoMatch {
                        tracing::warn!("no binding for {}", stroke);
                    }
                }
            }
            ScriptAction::Type(text) => {
                // Typed newlines go through the Enter path
                for (i, line) in text.split('\n').enumerate() {
                    if i > 0 {
                        session.handle(TextEditMsg::InsertNewline);
                    }
                    for ch in line.chars() {
                        session.handle(TextEditMsg::InsertChar(ch));
                    }
                }
            }
            ScriptAction::Paste(text) => {
                session.handle(TextEditMsg::Paste(text));
            }
        }
    }
}

fn report(notifications: &[Notification], json: bool) -> Result<()> {
    for notification in notifications {
        if json {
            println!("{}", serde_json::to_string(notification)?);
        } else {
            eprintln!("{}", notification);
        }
    }
    Ok(())
}
