//! Jumping between tags

mod common;

use blanks::editable::Position;
use blanks::keymap::{KeyAction, Keystroke};
use blanks::template::{Direction, Notification};
use common::{session, type_at, LOOP};

fn current_tag(session: &blanks::template::Session) -> Option<String> {
    session.tag_at_cursor().map(|t| t.name().to_string())
}

#[test]
fn test_forward_from_outside_goes_to_first_tag() {
    let mut session = session(LOOP);
    assert!(session.navigate(Direction::Forward));
    assert_eq!(current_tag(&session).as_deref(), Some("cond"));
    assert_eq!(session.cursor(), Position::new(0, 6));
}

#[test]
fn test_backward_from_outside_goes_to_last_tag() {
    let mut session = session(LOOP);
    assert!(session.navigate(Direction::Backward));
    assert_eq!(current_tag(&session).as_deref(), Some("world"));
    assert_eq!(session.cursor(), Position::new(1, 17));
}

#[test]
fn test_navigation_wraps_around() {
    let mut session = session(LOOP);
    let mut visited = Vec::new();
    for _ in 0..4 {
        session.navigate(Direction::Forward);
        visited.push(current_tag(&session).unwrap());
    }
    assert_eq!(visited, vec!["cond", "another", "world", "cond"]);

    session.navigate(Direction::Backward);
    assert_eq!(current_tag(&session).as_deref(), Some("world"));
}

#[test]
fn test_forward_and_backward_steps_cancel_modulo_tag_count() {
    let mut stepped = session(LOOP);
    for _ in 0..5 {
        stepped.navigate(Direction::Forward);
    }
    for _ in 0..3 {
        stepped.navigate(Direction::Backward);
    }

    let mut direct = session(LOOP);
    for _ in 0..2 {
        direct.navigate(Direction::Forward);
    }

    assert_eq!(current_tag(&stepped), current_tag(&direct));
    assert_eq!(current_tag(&stepped).as_deref(), Some("another"));
    assert_eq!(stepped.cursor(), direct.cursor());
}

#[test]
fn test_navigation_lands_at_end_of_filled_tag() {
    let mut session = session(LOOP);
    type_at(&mut session, 0, 6, "abc");
    session.set_cursor(Position::new(1, 0));

    session.navigate(Direction::Forward);
    assert_eq!(current_tag(&session).as_deref(), Some("cond"));
    assert_eq!(session.cursor(), Position::new(0, 9));
}

#[test]
fn test_navigation_moves_caret_between_tags() {
    let mut session = session(LOOP);
    session.navigate(Direction::Forward);
    session.take_notifications();

    session.navigate(Direction::Forward);
    assert_eq!(
        session.take_notifications(),
        vec![
            Notification::TagLeft { name: "cond".into() },
            Notification::TagEntered {
                name: "another".into()
            },
        ]
    );
    assert!(session.tag("cond").unwrap().has_placeholder());
    assert!(session.tag("another").unwrap().has_caret());
    common::assert_widgets_consistent(&session);
}

#[test]
fn test_navigation_without_tags() {
    let mut session = session("plain text");
    assert!(!session.navigate(Direction::Forward));
    assert!(!session.navigate(Direction::Backward));
    assert_eq!(session.cursor(), Position::zero());
}

#[test]
fn test_tab_keys_navigate() {
    let mut session = session(LOOP);
    let next: Keystroke = "alt+tab".parse().unwrap();
    let prev: Keystroke = "shift+tab".parse().unwrap();

    assert!(matches!(session.press(next), KeyAction::Execute(_)));
    assert!(matches!(session.press(next), KeyAction::Execute(_)));
    assert_eq!(current_tag(&session).as_deref(), Some("another"));
    session.press(prev);
    assert_eq!(current_tag(&session).as_deref(), Some("cond"));
}
