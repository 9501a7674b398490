//! A loaded template and the editor it lives in.
//!
//! Every input goes through the same pipeline: the mutation guard and the
//! document's read-only handling, the buffer edit, content recomputation and
//! the placeholder/style controllers, then cursor tracking with its own
//! enter/leave handlers. Notifications are emitted as events are handled.

use crate::editable::{ChangeOrigin, Document, Position, TextEditMsg};
use crate::keymap::{embedded_bindings, Command, KeyAction, Keymap, Keystroke};
use crate::tracing::SessionSnapshot;

use super::error::ConfigurationError;
use super::events::{Notification, Notifier};
use super::guard::MutationGuard;
use super::navigation::{self, Direction};
use super::parser::{self, ParsedTemplate};
use super::placeholder;
use super::registry::{Registry, TagEvent, TagEventKind, TagState};
use super::settings::TemplateSettings;
use super::style;

#[derive(Debug)]
pub struct Session {
    doc: Document,
    registry: Registry,
    settings: TemplateSettings,
    keymap: Keymap,
    notifier: Notifier,
    /// Set while the engine edits the buffer itself
    suppress: bool,
    /// Document revision the registry last saw
    synced_revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TemplateSettings::default())
    }
}

impl Session {
    pub fn new(settings: TemplateSettings) -> Self {
        let mut doc = Document::default();
        doc.set_char_width(settings.char_width);
        doc.add_filter(Box::new(MutationGuard));
        let synced_revision = doc.revision();

        Self {
            doc,
            registry: Registry::default(),
            settings,
            keymap: Keymap::with_bindings(embedded_bindings()),
            notifier: Notifier::default(),
            suppress: false,
            synced_revision,
        }
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn settings(&self) -> &TemplateSettings {
        &self.settings
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// Replace the document with `template`, rebuilding every tag.
    ///
    /// On a configuration error the buffer is left empty with no tags, and
    /// the error is both notified and returned.
    pub fn load(&mut self, template: &str) -> Result<(), ConfigurationError> {
        let parsed = parser::parse(template, &self.settings);

        self.suppress = true;
        self.doc.clear_marks();
        self.doc.clear_caret_style();
        self.registry = Registry::default();
        let result = match parsed {
            Ok(parsed) => {
                self.install(template, &parsed);
                Ok(())
            }
            Err(err) => {
                self.doc.set_value("");
                Err(err)
            }
        };
        self.doc.clear_history();
        self.synced_revision = self.doc.revision();
        self.suppress = false;

        match &result {
            Ok(()) => tracing::info!(
                "loaded template: {} tag(s), {} line(s)",
                self.registry.len(),
                self.doc.line_count()
            ),
            Err(err) => {
                tracing::warn!("template rejected: {}", err);
                self.notifier.emit(Notification::ConfigurationError { error: err.clone() });
            }
        }
        result
    }

    fn install(&mut self, template: &str, parsed: &ParsedTemplate) {
        self.doc.set_value(template);
        // Back to front so earlier source offsets stay valid
        for tag in parsed.tags.iter().rev() {
            let from = self.doc.position_of(tag.source.start);
            let to = self.doc.position_of(tag.source.end);
            self.doc.replace_range(from, to, "", ChangeOrigin::Internal);
        }
        debug_assert_eq!(self.doc.text(), parsed.text);

        self.registry = Registry::build(&mut self.doc, parsed);
        for tag in self.registry.tags_mut() {
            placeholder::show_placeholder(&mut self.doc, tag);
        }
        self.doc.set_cursor(Position::zero());
    }

    /// Apply an editing or movement message
    pub fn handle(&mut self, msg: TextEditMsg) -> bool {
        let before = SessionSnapshot::capture(self);
        let changed = self.doc.apply(&msg);
        self.sync();

        if let Some(diff) = before.diff(&SessionSnapshot::capture(self)) {
            tracing::debug!(target: "session", msg = ?msg, %diff, "state changed");
        }
        changed
    }

    /// Jump to the next or previous tag. Returns false when there are no tags.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let jumped = navigation::jump(&mut self.doc, &self.registry, direction).is_some();
        self.sync();
        jumped
    }

    pub fn execute(&mut self, command: Command) -> bool {
        tracing::trace!("execute {}", command);
        match command {
            Command::NextTag => self.navigate(Direction::Forward),
            Command::PreviousTag => self.navigate(Direction::Backward),
            _ => command.to_msg().is_some_and(|msg| self.handle(msg)),
        }
    }

    /// Feed a keystroke through the keymap, running whatever it is bound to
    pub fn press(&mut self, keystroke: Keystroke) -> KeyAction {
        let action = self.keymap.handle_keystroke(keystroke);
        match action {
            KeyAction::Execute(command) => {
                self.execute(command);
            }
            KeyAction::AwaitMore => tracing::trace!("{} starts a chord", keystroke),
            KeyAction::NoMatch => tracing::trace!("{} is not bound", keystroke),
        }
        action
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.doc.set_cursor(pos);
        self.sync();
    }

    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        self.doc.set_selection(anchor, head);
        self.sync();
    }

    /// Click on a tag's placeholder: it disappears and the cursor takes its place
    pub fn activate_placeholder(&mut self, name: &str) -> bool {
        let Some(index) = self.registry.index_of(name) else {
            return false;
        };
        let tag = &mut self.registry.tags_mut()[index];
        let Some(pos) = placeholder::activate(&mut self.doc, tag) else {
            return false;
        };
        self.doc.set_cursor(pos);
        self.sync();

        // Already counted as inside, so no enter transition fired
        let tag = &mut self.registry.tags_mut()[index];
        if tag.is_empty() && !tag.has_caret() {
            placeholder::on_entered(&mut self.doc, tag);
            self.sync_caret_style();
        }
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Notification) + 'static) {
        self.notifier.subscribe(Box::new(listener));
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifier.take()
    }

    pub fn tag(&self, name: &str) -> Option<&TagState> {
        self.registry.tag(name)
    }

    /// Tags in document order
    pub fn tags(&self) -> Vec<&TagState> {
        let tags = self.registry.tags();
        self.registry
            .ordered(&self.doc)
            .into_iter()
            .map(|i| &tags[i])
            .collect()
    }

    pub fn tag_at_cursor(&self) -> Option<&TagState> {
        self.registry
            .tag_at(&self.doc, self.doc.cursor())
            .map(|i| &self.registry.tags()[i])
    }

    pub fn base_segments(&self) -> Vec<(Position, Position)> {
        self.registry.base_segments(&self.doc)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn cursor(&self) -> Position {
        self.doc.cursor()
    }

    pub fn text(&self) -> String {
        self.doc.text()
    }

    /// Buffer text with placeholders and insertion carets drawn in
    pub fn render(&self) -> String {
        self.doc.render()
    }

    /// Bring tags up to date with the document: content first, then cursor
    fn sync(&mut self) {
        if self.suppress {
            return;
        }

        if self.doc.revision() != self.synced_revision {
            self.synced_revision = self.doc.revision();
            for event in self.registry.on_buffer_changed(&self.doc) {
                self.dispatch(event);
            }
        }

        for event in self.registry.on_cursor_activity(&self.doc) {
            self.dispatch(event);
        }
        self.sync_caret_style();
    }

    /// The document holds one caret style, present while any tag shows a caret
    fn sync_caret_style(&mut self) {
        let shown = self.registry.tags().iter().any(TagState::has_caret);
        match (shown, self.doc.caret_style().is_some()) {
            (true, false) => self.doc.set_caret_style(),
            (false, true) => self.doc.clear_caret_style(),
            _ => {}
        }
    }

    fn dispatch(&mut self, event: TagEvent) {
        let tag = &mut self.registry.tags_mut()[event.index];
        let notification = match event.kind {
            TagEventKind::ContentChanged => {
                placeholder::on_content_changed(&mut self.doc, tag);
                style::on_content_changed(&mut self.doc, tag);
                Notification::TagContentChanged {
                    name: tag.name().to_string(),
                    content: tag.content().to_string(),
                    multiline: tag.is_multiline(),
                }
            }
            TagEventKind::Entered => {
                placeholder::on_entered(&mut self.doc, tag);
                style::on_entered(&mut self.doc, tag);
                Notification::TagEntered {
                    name: tag.name().to_string(),
                }
            }
            TagEventKind::Left => {
                placeholder::on_left(&mut self.doc, tag);
                style::on_left(&mut self.doc, tag);
                Notification::TagLeft {
                    name: tag.name().to_string(),
                }
            }
        };
        self.notifier.emit(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editable::{Widget, PLACEHOLDER_GLYPH};

    const LOOP: &str = "while @T@cond@T@ @T@another@T@:\n    print(\"hello @T@world@T@\")";

    fn loaded(template: &str) -> Session {
        let mut session = Session::default();
        session.load(template).unwrap();
        session
    }

    #[test]
    fn test_load_shows_placeholder_per_tag() {
        let session = loaded(LOOP);
        let dots = PLACEHOLDER_GLYPH;
        assert_eq!(
            session.render(),
            format!("while {dots} {dots}:\n    print(\"hello {dots}\")")
        );
        assert!(session.tags().iter().all(|t| t.is_empty() && t.has_placeholder()));
        assert!(!session.document().can_undo());
    }

    #[test]
    fn test_entering_tag_swaps_placeholder_for_caret() {
        let mut session = loaded(LOOP);
        session.set_cursor(Position::new(0, 6));

        let cond = session.tag("cond").unwrap();
        assert!(cond.cursor_in());
        assert!(cond.has_caret());
        assert!(!cond.has_placeholder());
        assert!(session.document().caret_style().is_some());
        assert_eq!(
            session.take_notifications(),
            vec![Notification::TagEntered {
                name: "cond".into()
            }]
        );
    }

    #[test]
    fn test_leaving_tag_restores_placeholder() {
        let mut session = loaded(LOOP);
        session.set_cursor(Position::new(0, 6));
        session.set_cursor(Position::new(0, 0));

        let cond = session.tag("cond").unwrap();
        assert!(cond.has_placeholder());
        assert!(!cond.has_caret());
        assert!(session.document().caret_style().is_none());
    }

    #[test]
    fn test_typing_clears_widgets() {
        let mut session = loaded(LOOP);
        session.set_cursor(Position::new(0, 6));
        session.take_notifications();

        session.handle(TextEditMsg::InsertText("x".into()));
        let cond = session.tag("cond").unwrap();
        assert_eq!(cond.content(), "x");
        assert!(!cond.has_caret() && !cond.has_placeholder());
        assert_eq!(
            session.take_notifications(),
            vec![Notification::TagContentChanged {
                name: "cond".into(),
                content: "x".into(),
                multiline: false,
            }]
        );
    }

    #[test]
    fn test_deleting_content_brings_caret_back() {
        let mut session = loaded(LOOP);
        session.set_cursor(Position::new(0, 6));
        session.handle(TextEditMsg::InsertText("x".into()));
        session.handle(TextEditMsg::DeleteBackward);

        let cond = session.tag("cond").unwrap();
        assert!(cond.is_empty());
        assert!(cond.has_caret());
        assert!(!cond.has_placeholder());
    }

    #[test]
    fn test_configuration_error_empties_session() {
        let mut session = loaded(LOOP);
        let err = session.load("@T@a@T@ = @T@a@T@").unwrap_err();
        assert_eq!(err.tag_name(), "a");
        assert_eq!(session.text(), "");
        assert!(session.tags().is_empty());
        assert!(session.document().bookmarks().is_empty());
        assert!(matches!(
            session.take_notifications().as_slice(),
            [Notification::ConfigurationError { .. }]
        ));
    }

    #[test]
    fn test_activate_placeholder_moves_cursor_inside() {
        let mut session = loaded(LOOP);
        assert!(session.activate_placeholder("world"));
        assert_eq!(session.cursor(), Position::new(1, 17));

        let world = session.tag("world").unwrap();
        assert!(world.cursor_in());
        assert!(world.has_caret());
        assert!(!session.activate_placeholder("world"));
        assert!(!session.activate_placeholder("missing"));
    }

    #[test]
    fn test_press_runs_bound_command() {
        let mut session = loaded(LOOP);
        let action = session.press("alt+tab".parse().unwrap());
        assert_eq!(action, KeyAction::Execute(Command::NextTag));
        assert_eq!(session.tag_at_cursor().map(TagState::name), Some("cond"));
    }

    #[test]
    fn test_caret_widget_sits_at_tag_end() {
        let mut session = loaded("x = @T@v@T@;");
        session.set_cursor(Position::new(0, 4));
        let doc = session.document();
        let widgets: Vec<Widget> = doc
            .bookmarks_at(Position::new(0, 4))
            .map(|(_, b)| b.widget)
            .collect();
        assert_eq!(widgets, vec![Widget::InsertCaret]);
        assert_eq!(session.render(), "x =  ;");
    }
}
