//! Interaction controller: turns user intents into store mutations.
//!
//! # Design
//! `Session` holds the whole widget state explicitly (store, draft, editing
//! target, errors) and every intent is a `&mut self` method that runs to
//! completion. A host drives it either through the typed handlers or through
//! `dispatch` with a deserialized `Intent`, then calls `snapshot` to redraw.
//!
//! Submit is the only gated path: the draft is validated before the store is
//! touched, and a rejected submit leaves everything but the error set as it
//! was.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::ValidationError;
use crate::ids::IdGenerator;
use crate::snapshot::{Mode, Snapshot, EMPTY_MESSAGE};
use crate::store::ItemStore;
use crate::types::{Draft, ErrorSet, Field, TodoId, TodoItem};

/// A discrete user intent forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Toggle { id: TodoId },
    BeginEdit { id: TodoId },
    Delete { id: TodoId },
    FieldChange { field: Field, value: String },
    Submit,
}

/// What a successful submit did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Added(TodoId),
    Updated(TodoId),
    /// The editing target was gone by the time of submit; nothing changed.
    Missing(TodoId),
}

/// Result of `Session::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Toggled(bool),
    EditStarted,
    Deleted(Option<TodoItem>),
    FieldChanged,
    Submitted(Result<SubmitOutcome, ValidationError>),
}

#[derive(Debug)]
pub struct Session {
    store: ItemStore,
    draft: Draft,
    editing: Option<TodoId>,
    errors: ErrorSet,
    prefill_on_edit: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_generator(config.id_strategy.generator(), config.prefill_on_edit)
    }

    pub fn with_generator(ids: Box<dyn IdGenerator>, prefill_on_edit: bool) -> Self {
        Self {
            store: ItemStore::with_generator(ids),
            draft: Draft::default(),
            editing: None,
            errors: ErrorSet::new(),
            prefill_on_edit,
        }
    }

    pub fn items(&self) -> &[TodoItem] {
        self.store.items()
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing_target(&self) -> Option<TodoId> {
        self.editing
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn mode(&self) -> Mode {
        Mode::from_target(self.editing)
    }

    pub fn field_change(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn toggle(&mut self, id: TodoId) -> bool {
        self.store.toggle(id)
    }

    /// Point the editing target at `id`.
    ///
    /// The draft is left untouched unless `prefill_on_edit` is set, in which
    /// case it is overwritten with the item's current values.
    pub fn begin_edit(&mut self, id: TodoId) {
        match self.store.get(id) {
            Some(item) if self.prefill_on_edit => {
                self.draft = Draft::from(item);
            }
            Some(_) => {}
            None => warn!(%id, "editing an id that is not in the collection"),
        }
        debug!(%id, "editing started");
        self.editing = Some(id);
    }

    /// Remove `id`. Deleting the editing target also drops the edit and its draft.
    pub fn delete(&mut self, id: TodoId) -> Option<TodoItem> {
        let removed = self.store.remove(id);
        if self.editing == Some(id) {
            debug!(%id, "deleted the editing target, edit cancelled");
            self.editing = None;
            self.draft = Draft::default();
        }
        removed
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome, ValidationError> {
        if let Err(err) = self.draft.validate() {
            warn!(fields = ?err.fields().collect::<Vec<_>>(), "submit rejected");
            self.errors = err.errors().clone();
            return Err(err);
        }

        let outcome = match self.editing {
            None => SubmitOutcome::Added(self.store.add(&self.draft)?),
            Some(id) => {
                if self.store.update(id, &self.draft)? {
                    SubmitOutcome::Updated(id)
                } else {
                    SubmitOutcome::Missing(id)
                }
            }
        };

        debug!(?outcome, "submit applied");
        self.editing = None;
        self.draft = Draft::default();
        self.errors.clear();
        Ok(outcome)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Dispatched {
        match intent {
            Intent::Toggle { id } => Dispatched::Toggled(self.toggle(id)),
            Intent::BeginEdit { id } => {
                self.begin_edit(id);
                Dispatched::EditStarted
            }
            Intent::Delete { id } => Dispatched::Deleted(self.delete(id)),
            Intent::FieldChange { field, value } => {
                self.field_change(field, value);
                Dispatched::FieldChanged
            }
            Intent::Submit => Dispatched::Submitted(self.submit()),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let mode = self.mode();
        Snapshot {
            items: self.store.items().to_vec(),
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            mode,
            submit_label: mode.submit_label(),
            empty_message: self.store.is_empty().then_some(EMPTY_MESSAGE),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DESCRIPTION_REQUIRED, TITLE_REQUIRED};

    fn id(n: u128) -> TodoId {
        TodoId::from_u128(n)
    }

    fn fill(session: &mut Session, title: &str, description: &str) {
        session.field_change(Field::Title, title);
        session.field_change(Field::Description, description);
    }

    fn add(session: &mut Session, title: &str, description: &str) -> TodoId {
        fill(session, title, description);
        match session.submit().unwrap() {
            SubmitOutcome::Added(id) => id,
            other => panic!("expected Added, got {other:?}"),
        }
    }

    #[test]
    fn starts_empty_in_add_mode() {
        let session = Session::default();
        assert!(session.items().is_empty());
        assert!(session.draft().is_blank());
        assert!(session.errors().is_empty());
        assert_eq!(session.editing_target(), None);
        assert_eq!(session.mode(), Mode::Add);
    }

    #[test]
    fn field_change_only_touches_draft() {
        let mut session = Session::default();
        session.submit().unwrap_err();
        let errors = session.errors().clone();

        session.field_change(Field::Title, "Milk");
        assert_eq!(session.draft().title, "Milk");
        assert_eq!(session.errors(), &errors);
        assert!(session.items().is_empty());
    }

    #[test]
    fn submit_adds_and_resets_form() {
        let mut session = Session::default();
        fill(&mut session, "Milk", "2%");
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Added(id(1)));

        assert_eq!(
            session.items(),
            &[TodoItem {
                id: id(1),
                title: "Milk".into(),
                description: "2%".into(),
                completed: false,
            }]
        );
        assert!(session.draft().is_blank());
        assert!(session.errors().is_empty());
    }

    #[test]
    fn invalid_submit_keeps_draft_and_records_errors() {
        let mut session = Session::default();
        add(&mut session, "A", "a");
        session.field_change(Field::Title, "only title");

        let err = session.submit().unwrap_err();
        assert_eq!(err.fields().collect::<Vec<_>>(), vec![Field::Description]);
        assert_eq!(session.errors().len(), 1);
        assert_eq!(
            session.errors().get(&Field::Description).map(String::as_str),
            Some(DESCRIPTION_REQUIRED)
        );
        assert_eq!(session.draft().title, "only title");
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn invalid_submit_while_editing_stays_in_update_mode() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        session.begin_edit(a);
        session.field_change(Field::Title, "  ");

        session.submit().unwrap_err();
        assert_eq!(session.mode(), Mode::Update(a));
        assert_eq!(
            session.errors().get(&Field::Title).map(String::as_str),
            Some(TITLE_REQUIRED)
        );
    }

    #[test]
    fn successful_submit_clears_previous_errors() {
        let mut session = Session::default();
        session.submit().unwrap_err();
        assert_eq!(session.errors().len(), 2);

        add(&mut session, "x", "y");
        assert!(session.errors().is_empty());
    }

    #[test]
    fn edit_then_submit_updates_in_place() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        let b = add(&mut session, "Z", "z");

        session.begin_edit(a);
        assert_eq!(session.snapshot().submit_label, "Update Todo");
        fill(&mut session, "B", "b");
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Updated(a));

        assert_eq!(session.items()[0].id, a);
        assert_eq!(session.items()[0].title, "B");
        assert_eq!(session.items()[0].description, "b");
        assert!(!session.items()[0].completed);
        assert_eq!(session.items()[1].id, b);
        assert_eq!(session.editing_target(), None);
        assert!(session.draft().is_blank());
    }

    #[test]
    fn begin_edit_leaves_draft_alone_by_default() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        session.field_change(Field::Title, "typed");

        session.begin_edit(a);
        assert_eq!(session.draft().title, "typed");
        assert_eq!(session.draft().description, "");
    }

    #[test]
    fn begin_edit_prefills_when_configured() {
        let mut session = Session::new(SessionConfig {
            prefill_on_edit: true,
            ..SessionConfig::default()
        });
        let a = add(&mut session, "A", "a");
        session.field_change(Field::Title, "typed");

        session.begin_edit(a);
        assert_eq!(session.draft(), &Draft::new("A", "a"));
    }

    #[test]
    fn editing_a_completed_item_resets_it_by_default() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        session.toggle(a);

        session.begin_edit(a);
        fill(&mut session, "B", "b");
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Updated(a));
        assert_eq!(session.items()[0].title, "B");
        assert!(!session.items()[0].completed);
    }

    #[test]
    fn editing_a_completed_item_keeps_it_with_prefill() {
        let mut session = Session::new(SessionConfig {
            prefill_on_edit: true,
            ..SessionConfig::default()
        });
        let a = add(&mut session, "A", "a");
        session.toggle(a);

        session.begin_edit(a);
        fill(&mut session, "B", "b");
        assert_eq!(session.submit().unwrap(), SubmitOutcome::Updated(a));
        assert_eq!(session.items()[0].title, "B");
        assert!(session.items()[0].completed);
    }

    #[test]
    fn begin_edit_switches_target() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        let b = add(&mut session, "B", "b");

        session.begin_edit(a);
        session.begin_edit(b);
        assert_eq!(session.editing_target(), Some(b));
    }

    #[test]
    fn deleting_edit_target_cancels_edit() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        session.begin_edit(a);
        session.field_change(Field::Title, "half typed");

        let removed = session.delete(a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(session.editing_target(), None);
        assert!(session.draft().is_blank());
        assert_eq!(session.mode(), Mode::Add);
    }

    #[test]
    fn deleting_other_item_keeps_edit() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        let b = add(&mut session, "B", "b");
        session.begin_edit(a);
        session.field_change(Field::Title, "kept");

        session.delete(b);
        assert_eq!(session.editing_target(), Some(a));
        assert_eq!(session.draft().title, "kept");
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn submit_against_unknown_target_is_noop_update() {
        let mut session = Session::default();
        add(&mut session, "A", "a");
        session.begin_edit(id(77));
        fill(&mut session, "B", "b");

        assert_eq!(session.submit().unwrap(), SubmitOutcome::Missing(id(77)));
        assert_eq!(session.items().len(), 1);
        assert_eq!(session.items()[0].title, "A");
        assert_eq!(session.editing_target(), None);
        assert!(session.draft().is_blank());
    }

    #[test]
    fn toggle_does_not_change_mode() {
        let mut session = Session::default();
        let a = add(&mut session, "A", "a");
        session.begin_edit(a);
        assert!(session.toggle(a));
        assert!(session.items()[0].completed);
        assert_eq!(session.mode(), Mode::Update(a));
    }

    #[test]
    fn dispatch_routes_intents() {
        let mut session = Session::default();
        session.dispatch(Intent::FieldChange {
            field: Field::Title,
            value: "Milk".into(),
        });
        session.dispatch(Intent::FieldChange {
            field: Field::Description,
            value: "2%".into(),
        });
        assert_eq!(
            session.dispatch(Intent::Submit),
            Dispatched::Submitted(Ok(SubmitOutcome::Added(id(1))))
        );
        assert_eq!(
            session.dispatch(Intent::Toggle { id: id(1) }),
            Dispatched::Toggled(true)
        );
        assert_eq!(
            session.dispatch(Intent::Toggle { id: id(9) }),
            Dispatched::Toggled(false)
        );
        assert!(matches!(
            session.dispatch(Intent::Delete { id: id(1) }),
            Dispatched::Deleted(Some(_))
        ));
        assert!(session.items().is_empty());
    }

    #[test]
    fn intent_deserializes_from_tagged_json() {
        let intent: Intent = serde_json::from_str(
            r#"{"type":"field_change","field":"title","value":"Milk"}"#,
        )
        .unwrap();
        assert_eq!(
            intent,
            Intent::FieldChange {
                field: Field::Title,
                value: "Milk".into()
            }
        );
        let intent: Intent = serde_json::from_str(r#"{"type":"submit"}"#).unwrap();
        assert_eq!(intent, Intent::Submit);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut session = Session::default();
        let snap = session.snapshot();
        assert_eq!(snap.empty_message, Some("No todos yet. Add some!"));
        assert_eq!(snap.submit_label, "Add Todo");

        add(&mut session, "Milk", "2%");
        session.submit().unwrap_err();
        let snap = session.snapshot();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.empty_message, None);
        assert_eq!(snap.errors.len(), 2);

        let json: serde_json::Value = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(json["items"][0]["title"], "Milk");
        assert_eq!(json["errors"]["title"], "Title is required");
        assert_eq!(json["mode"]["kind"], "add");
        assert!(json.get("empty_message").is_none());
    }
}
