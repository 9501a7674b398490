//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use blanks::editable::{Position, TextEditMsg, PLACEHOLDER_GLYPH};
use blanks::template::{Session, TemplateSettings};

/// Three tags on two lines, all single-line
pub const LOOP: &str = "while @T@cond@T@ @T@another@T@:\n    print(\"hello @T@world@T@\")";

/// A single-line header tag and a multiline body tag
pub const BLOCK: &str = "if @T@cond@T@:\n    @T@body@T@\nend";

pub const DOTS: &str = PLACEHOLDER_GLYPH;

/// Load `template` with the named tags marked multiline
pub fn session_with(template: &str, multiline: &[&str]) -> Session {
    let settings = multiline
        .iter()
        .fold(TemplateSettings::default(), |s, name| s.with_tag(name, true));
    let mut session = Session::new(settings);
    session.load(template).expect("template should load");
    session
}

pub fn session(template: &str) -> Session {
    session_with(template, &[])
}

/// Put the cursor at `(line, column)` and type `text` in one edit
pub fn type_at(session: &mut Session, line: usize, column: usize, text: &str) {
    session.set_cursor(Position::new(line, column));
    session.handle(TextEditMsg::InsertText(text.to_string()));
}

/// Type `text` one key at a time
pub fn type_keys(session: &mut Session, text: &str) {
    for ch in text.chars() {
        session.handle(TextEditMsg::InsertChar(ch));
    }
}

pub fn content(session: &Session, name: &str) -> String {
    session
        .tag(name)
        .unwrap_or_else(|| panic!("no tag named {name}"))
        .content()
        .to_string()
}

/// Empty tags show exactly one widget, a caret only in the tag holding the
/// cursor. Tags with content show none. The caret style is present exactly
/// while some caret is shown.
pub fn assert_widgets_consistent(session: &Session) {
    let has_selection = session.document().has_selection();
    let any_caret = session.tags().iter().any(|t| t.has_caret());
    assert_eq!(
        session.document().caret_style().is_some(),
        any_caret,
        "caret style out of step with caret widgets"
    );
    for tag in session.tags() {
        if tag.is_empty() {
            assert!(
                tag.has_placeholder() != tag.has_caret(),
                "tag '{}' should show exactly one widget",
                tag.name()
            );
            if tag.has_caret() && !has_selection {
                assert!(tag.cursor_in(), "stray caret in '{}'", tag.name());
            }
        } else {
            assert!(
                !tag.has_placeholder() && !tag.has_caret(),
                "tag '{}' has content and a widget",
                tag.name()
            );
        }
    }
}
