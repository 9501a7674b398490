//! Editing inside and around tags: content tracking, widgets, guards

mod common;

use blanks::editable::{Position, TextEditMsg};
use blanks::template::{Notification, WRAP_CLASS};
use common::{content, session, session_with, type_at, type_keys, BLOCK, DOTS, LOOP};

#[test]
fn test_typing_fills_tag_and_clears_widgets() {
    let mut session = session(LOOP);
    session.set_cursor(Position::new(0, 6));
    type_keys(&mut session, "i < 10");

    assert_eq!(content(&session, "cond"), "i < 10");
    let cond = session.tag("cond").unwrap();
    assert!(!cond.has_placeholder());
    assert!(!cond.has_caret());
    assert_eq!(session.document().caret_style(), None);
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_each_keystroke_notifies_content() {
    let mut session = session(LOOP);
    session.set_cursor(Position::new(0, 6));
    session.take_notifications();

    type_keys(&mut session, "ab");
    let changes: Vec<String> = session
        .take_notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::TagContentChanged { name, content, .. } if name == "cond" => Some(content),
            _ => None,
        })
        .collect();
    assert_eq!(changes, vec!["a".to_string(), "ab".to_string()]);
}

#[test]
fn test_typing_in_read_only_text_is_rejected() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 2, "x");
    type_at(&mut session, 1, 2, "x");
    assert_eq!(session.text(), "while  :\n    print(\"hello \")");
    assert!(session.take_notifications().is_empty());
}

#[test]
fn test_paste_into_single_line_tag_keeps_first_line() {
    let mut session = session(LOOP);
    session.set_cursor(Position::new(0, 6));
    session.handle(TextEditMsg::Paste("line1\nline2".into()));

    assert_eq!(content(&session, "cond"), "line1");
    assert_eq!(session.document().line_count(), 2);
}

#[test]
fn test_enter_in_single_line_tag_does_nothing() {
    let mut session = session(LOOP);
    session.set_cursor(Position::new(0, 6));
    type_keys(&mut session, "x");

    assert!(!session.handle(TextEditMsg::InsertNewline));
    assert_eq!(content(&session, "cond"), "x");
    assert_eq!(session.document().line_count(), 2);
}

#[test]
fn test_multiline_tag_accepts_newlines() {
    let mut session = session_with(BLOCK, &["body"]);
    session.set_cursor(Position::new(1, 4));
    assert_eq!(session.document().lines_with_class(WRAP_CLASS), vec![1]);

    session.handle(TextEditMsg::Paste("a = 1\nb = 2".into()));

    assert_eq!(content(&session, "body"), "a = 1\nb = 2");
    assert_eq!(session.text(), "if :\n    a = 1\nb = 2\nend");
    assert_eq!(session.document().lines_with_class(WRAP_CLASS), vec![1, 2]);
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_enter_in_multiline_tag_reports_multiline_content() {
    let mut session = session_with(BLOCK, &["body"]);
    session.set_cursor(Position::new(1, 4));
    type_keys(&mut session, "x");
    session.handle(TextEditMsg::InsertNewline);
    session.take_notifications();
    type_keys(&mut session, "y");

    assert_eq!(
        session.take_notifications(),
        vec![Notification::TagContentChanged {
            name: "body".into(),
            content: "x\ny".into(),
            multiline: true,
        }]
    );
}

#[test]
fn test_wrap_class_dropped_when_multiline_tag_left_empty() {
    let mut session = session_with(BLOCK, &["body"]);
    session.set_cursor(Position::new(1, 4));
    assert_eq!(session.document().lines_with_class(WRAP_CLASS), vec![1]);

    session.set_cursor(Position::new(0, 3));
    assert!(session.document().lines_with_class(WRAP_CLASS).is_empty());
}

#[test]
fn test_deleting_all_content_brings_caret_back() {
    let mut session = session(LOOP);
    session.set_cursor(Position::new(0, 6));
    type_keys(&mut session, "ab");
    session.handle(TextEditMsg::DeleteBackward);
    session.handle(TextEditMsg::DeleteBackward);

    let cond = session.tag("cond").unwrap();
    assert!(cond.is_empty());
    assert!(cond.has_caret());
    assert!(session.document().caret_style().is_some());
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_selection_delete_across_tags_keeps_base_text() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 6, "a");
    type_at(&mut session, 0, 8, "b");
    assert_eq!(session.text(), "while a b:\n    print(\"hello \")");

    session.set_selection(Position::new(0, 6), Position::new(0, 9));
    session.handle(TextEditMsg::DeleteBackward);

    assert_eq!(session.text(), "while  :\n    print(\"hello \")");
    assert_eq!(content(&session, "cond"), "");
    assert_eq!(content(&session, "another"), "");
    assert_eq!(session.cursor(), Position::new(0, 6));
    assert!(session.render().starts_with(&format!("while   {DOTS}:")));
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_undo_restores_empty_tag_with_caret() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 6, "x");
    assert_eq!(content(&session, "cond"), "x");

    session.handle(TextEditMsg::Undo);
    assert_eq!(content(&session, "cond"), "");
    assert!(session.tag("cond").unwrap().has_caret());
    common::assert_widgets_consistent(&session);

    session.handle(TextEditMsg::Redo);
    assert_eq!(content(&session, "cond"), "x");
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_word_delete_stays_inside_tag() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 6, "foo bar");
    session.handle(TextEditMsg::DeleteWordBackward);
    assert_eq!(content(&session, "cond"), "foo ");
    session.handle(TextEditMsg::DeleteWordBackward);
    session.handle(TextEditMsg::DeleteWordBackward);
    assert_eq!(content(&session, "cond"), "");
    assert!(session.text().starts_with("while  :"));
}

#[test]
fn test_activate_placeholder_moves_cursor_into_tag() {
    let mut session = session(LOOP);
    assert!(session.activate_placeholder("another"));

    assert_eq!(session.cursor(), Position::new(0, 7));
    let another = session.tag("another").unwrap();
    assert!(another.cursor_in());
    assert!(another.has_caret());
    assert!(!another.has_placeholder());
    assert!(!session.activate_placeholder("another"));
    assert!(!session.activate_placeholder("missing"));
}

#[test]
fn test_undo_into_other_tag_keeps_caret_style() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 6, "x");
    session.set_cursor(Position::new(0, 8));
    assert!(session.tag("another").unwrap().has_caret());

    session.handle(TextEditMsg::Undo);

    let cond = session.tag("cond").unwrap();
    assert!(cond.is_empty());
    assert!(cond.has_caret());
    assert!(!session.tag("another").unwrap().has_caret());
    assert!(session.document().caret_style().is_some());
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_emptying_other_tag_moves_caret_with_style() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 7, "b");
    session.set_cursor(Position::new(0, 6));
    assert!(session.tag("cond").unwrap().has_caret());

    session.set_selection(Position::new(0, 8), Position::new(0, 7));
    session.handle(TextEditMsg::DeleteBackward);

    assert_eq!(content(&session, "another"), "");
    assert!(session.tag("another").unwrap().has_caret());
    assert!(session.tag("cond").unwrap().has_placeholder());
    assert!(session.document().caret_style().is_some());
    common::assert_widgets_consistent(&session);
}
