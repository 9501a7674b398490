//! Template loading: tags, base segments, placeholders and configuration errors

mod common;

use blanks::editable::Position;
use blanks::template::{ConfigurationError, Notification, Session, TemplateSettings};
use common::{session, session_with, DOTS, LOOP};

#[test]
fn test_tags_follow_source_order() {
    let session = session(LOOP);
    let names: Vec<&str> = session.tags().iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["cond", "another", "world"]);
    assert!(session.tags().iter().all(|t| t.content().is_empty()));
}

#[test]
fn test_delimiters_are_stripped() {
    let session = session(LOOP);
    assert_eq!(session.text(), "while  :\n    print(\"hello \")");
}

#[test]
fn test_render_shows_placeholder_at_each_tag() {
    let session = session(LOOP);
    assert_eq!(
        session.render(),
        format!("while {DOTS} {DOTS}:\n    print(\"hello {DOTS}\")")
    );
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_base_segments_cover_text_between_tags() {
    let session = session(LOOP);
    assert_eq!(
        session.base_segments(),
        vec![
            (Position::new(0, 0), Position::new(0, 6)),
            (Position::new(0, 6), Position::new(0, 7)),
            (Position::new(0, 7), Position::new(1, 17)),
            (Position::new(1, 17), Position::new(1, 19)),
        ]
    );
}

#[test]
fn test_loading_twice_is_identical() {
    let mut session = session(LOOP);
    let tags_before: Vec<String> = session.tags().iter().map(|t| t.name().to_string()).collect();
    let segments_before = session.base_segments();
    let render_before = session.render();

    common::type_at(&mut session, 0, 6, "x");
    session.load(LOOP).unwrap();

    let tags_after: Vec<String> = session.tags().iter().map(|t| t.name().to_string()).collect();
    assert_eq!(tags_after, tags_before);
    assert_eq!(session.base_segments(), segments_before);
    assert_eq!(session.render(), render_before);
}

#[test]
fn test_load_is_not_undoable() {
    let mut session = session(LOOP);
    assert!(!session.document().can_undo());
    session.handle(blanks::editable::TextEditMsg::Undo);
    assert_eq!(session.text(), "while  :\n    print(\"hello \")");
}

#[test]
fn test_load_emits_no_tag_notifications() {
    let mut session = session(LOOP);
    assert!(session.take_notifications().is_empty());
}

#[test]
fn test_template_without_tags_is_read_only() {
    let mut session = session("print(1)");
    assert!(session.tags().is_empty());
    common::type_at(&mut session, 0, 0, "x");
    common::type_at(&mut session, 0, 8, "x");
    assert_eq!(session.text(), "print(1)");
}

#[test]
fn test_duplicate_tag_clears_buffer() {
    let mut session = Session::new(TemplateSettings::default());
    let err = session.load("@T@a@T@ + @T@a@T@").unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::DuplicateTag {
            name: "a".into(),
            position: Position::new(0, 10),
        }
    );
    assert_eq!(session.text(), "");
    assert!(session.tags().is_empty());
    assert_eq!(
        session.take_notifications(),
        vec![Notification::ConfigurationError { error: err }]
    );
}

#[test]
fn test_adjacent_tags_are_rejected() {
    let mut session = Session::default();
    let err = session.load("x = @T@a@T@@T@b@T@;").unwrap_err();
    assert!(matches!(err, ConfigurationError::AdjacentTags { ref name, .. } if name == "b"));
    assert_eq!(session.render(), "");
}

#[test]
fn test_tag_at_document_start_is_allowed() {
    let session = session("@T@name@T@ = 1");
    assert_eq!(session.render(), format!("{DOTS} = 1"));
}

#[test]
fn test_failed_load_replaces_previous_template() {
    let mut session = session(LOOP);
    assert!(session.load("@T@a@T@@T@a@T@").is_err());
    assert!(session.tag("cond").is_none());
    assert!(session.document().bookmarks().is_empty());
    assert!(session.base_segments().is_empty());
}

#[test]
fn test_multiline_setting_reaches_tags() {
    let session = session_with(common::BLOCK, &["body"]);
    assert!(session.tag("body").unwrap().is_multiline());
    assert!(!session.tag("cond").unwrap().is_multiline());
}

#[test]
fn test_subscriber_sees_configuration_error() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut session = Session::default();
    session.subscribe(move |n| sink.borrow_mut().push(n.clone()));

    let _ = session.load("@T@a@T@ @T@a@T@");
    assert!(matches!(
        seen.borrow().as_slice(),
        [Notification::ConfigurationError { .. }]
    ));
}
