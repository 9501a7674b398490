//! Whole workflows: load, navigate, type, observe notifications

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use blanks::editable::{Position, TextEditMsg};
use blanks::keymap::{merge_bindings, parse_keymap_yaml, KeyAction, Keymap, Keystroke};
use blanks::template::{Direction, Notification, Session, TemplateSettings};
use common::{content, DOTS, LOOP};

fn keys(session: &mut Session, strokes: &[&str]) {
    for stroke in strokes {
        let keystroke: Keystroke = stroke.parse().unwrap();
        session.press(keystroke);
    }
}

#[test]
fn test_fill_first_tag() {
    let mut session = common::session(LOOP);
    session.navigate(Direction::Forward);
    assert_eq!(
        session.render(),
        format!("while   {DOTS}:\n    print(\"hello {DOTS}\")")
    );
    session.take_notifications();

    session.handle(TextEditMsg::InsertText("test1".into()));

    assert!(session
        .render()
        .starts_with(&format!("while test1 {DOTS}:")));
    assert_eq!(
        session.take_notifications(),
        vec![Notification::TagContentChanged {
            name: "cond".into(),
            content: "test1".into(),
            multiline: false,
        }]
    );
}

#[test]
fn test_fill_every_tag_with_keys() {
    let mut session = common::session(LOOP);

    keys(&mut session, &["alt+tab"]);
    common::type_keys(&mut session, "i < 3");
    keys(&mut session, &["alt+tab"]);
    common::type_keys(&mut session, "and ok");
    keys(&mut session, &["alt+tab"]);
    common::type_keys(&mut session, "world");

    assert_eq!(
        session.render(),
        "while i < 3 and ok:\n    print(\"hello world\")"
    );
    assert_eq!(content(&session, "another"), "and ok");
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_notifications_reach_subscribers_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);

    let mut session = Session::new(TemplateSettings::default());
    session.subscribe(move |n| sink.borrow_mut().push(n.to_string()));
    session.load(LOOP).unwrap();

    session.navigate(Direction::Forward);
    common::type_keys(&mut session, "x");
    session.navigate(Direction::Forward);

    assert_eq!(
        *log.borrow(),
        vec![
            "entered cond".to_string(),
            "changed cond: \"x\"".to_string(),
            "left cond".to_string(),
            "entered another".to_string(),
        ]
    );
    // Listeners and the queue see the same events
    assert_eq!(session.take_notifications().len(), 4);
}

#[test]
fn test_backspace_key_empties_tag() {
    let mut session = common::session(LOOP);
    keys(&mut session, &["shift+tab"]);
    common::type_keys(&mut session, "ab");
    keys(&mut session, &["backspace", "backspace", "backspace"]);

    assert_eq!(content(&session, "world"), "");
    assert_eq!(session.cursor(), Position::new(1, 17));
    assert!(session.render().ends_with("hello  \")"));
    assert!(session.tag("world").unwrap().has_caret());
}

#[test]
fn test_user_keymap_override() {
    let user = parse_keymap_yaml(
        "bindings:\n  - key: tab\n    command: NextTag\n  - key: alt+tab\n    command: Unbound\n",
    )
    .unwrap();
    let keymap = Keymap::with_bindings(merge_bindings(
        blanks::keymap::embedded_bindings(),
        user,
    ));
    let mut session = Session::default().with_keymap(keymap);
    session.load(LOOP).unwrap();

    assert_eq!(session.press("alt+tab".parse().unwrap()), KeyAction::NoMatch);
    assert_eq!(session.cursor(), Position::zero());

    keys(&mut session, &["tab"]);
    assert_eq!(session.tag_at_cursor().map(|t| t.name()), Some("cond"));
}

#[test]
fn test_select_all_then_type_only_touches_tags() {
    let mut session = common::session(LOOP);
    common::type_at(&mut session, 0, 6, "a");
    keys(&mut session, &["cmd+a"]);
    assert!(session.document().has_selection());

    session.handle(TextEditMsg::InsertText("z".into()));

    assert_eq!(content(&session, "cond"), "z");
    assert_eq!(content(&session, "another"), "");
    assert_eq!(content(&session, "world"), "");
    assert!(session.text().starts_with("while z :"));
}

#[test]
fn test_reload_after_editing_starts_fresh() {
    let mut session = common::session(LOOP);
    common::type_at(&mut session, 0, 6, "foo");
    session.load(LOOP).unwrap();

    assert!(session.tags().iter().all(|t| t.is_empty() && !t.cursor_in()));
    assert!(!session.document().can_undo());
    assert_eq!(session.document().caret_style(), None);
}
