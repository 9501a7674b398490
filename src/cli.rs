//! Command-line arguments and key scripts
//!
//! A key script drives a session without a keyboard, one action per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! alt+tab
//! type test1
//! paste line one\nline two
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::keymap::{parse_key_sequence, KeymapError, Keystroke};

/// Fill in the blanks of a code template
#[derive(Parser, Debug)]
#[command(name = "blanks", version, about = "Fill in the blanks of a code template")]
pub struct CliArgs {
    /// Template file to load
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// YAML file of per-tag settings (`name: {multiline: true}`)
    #[arg(long, value_name = "FILE")]
    pub tags: Option<PathBuf>,

    /// Key script to replay after loading
    #[arg(long, value_name = "SCRIPT")]
    pub keys: Option<PathBuf>,

    /// Override the tag delimiter regex
    #[arg(long, value_name = "REGEX")]
    pub delimiter: Option<String>,

    /// Print notifications as JSON lines
    #[arg(long)]
    pub json: bool,
}

/// One line of a key script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Keys(Vec<Keystroke>),
    Type(String),
    Paste(String),
}

/// Parse a key script. Errors carry the 1-based line number.
pub fn parse_script(script: &str) -> Result<Vec<ScriptAction>, (usize, KeymapError)> {
    let mut actions = Vec::new();
    for (i, line) in script.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action = if let Some(text) = line.trim_start().strip_prefix("type ") {
            ScriptAction::Type(unescape(text))
        } else if let Some(text) = line.trim_start().strip_prefix("paste ") {
            ScriptAction::Paste(unescape(text))
        } else {
            ScriptAction::Keys(parse_key_sequence(trimmed).map_err(|e| (i + 1, e))?)
        };
        actions.push(action);
    }
    Ok(actions)
}

/// Expand `\n`, `\t` and `\\`
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{KeyCode, Modifiers};

    #[test]
    fn test_parse_script_actions() {
        let script = "# fill the condition\nalt+tab\ntype test1\n\npaste a\\nb\n";
        let actions = parse_script(script).unwrap();
        assert_eq!(
            actions,
            vec![
                ScriptAction::Keys(vec![Keystroke::new(KeyCode::Tab, Modifiers::ALT)]),
                ScriptAction::Type("test1".into()),
                ScriptAction::Paste("a\nb".into()),
            ]
        );
    }

    #[test]
    fn test_type_keeps_inner_spaces() {
        let actions = parse_script("type  x  y").unwrap();
        assert_eq!(actions, vec![ScriptAction::Type(" x  y".into())]);
    }

    #[test]
    fn test_bad_key_reports_line() {
        let (line, _) = parse_script("alt+tab\nhyper+q").unwrap_err();
        assert_eq!(line, 2);
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\tb\\n\q"), "a\tb\\n\\q");
    }

    #[test]
    fn test_cli_parses() {
        let args = CliArgs::parse_from(["blanks", "loop.tpl", "--json", "--delimiter", "x(y)"]);
        assert_eq!(args.template, PathBuf::from("loop.tpl"));
        assert!(args.json);
        assert_eq!(args.delimiter.as_deref(), Some("x(y)"));
        assert!(args.keys.is_none());
    }
}
