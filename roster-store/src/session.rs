//! List-view state over a shared store.
//!
//! A session owns the search term and sort spec and derives the displayed
//! list from the store's current snapshot on demand. Form submissions are
//! validated here, before anything reaches the store.

use std::sync::Arc;
use tokio::sync::watch;

use roster_core::{
    DraftForm, Query, SortKey, SortSpec, StudentDraft, StudentRecord, ValidationErrors,
};

use crate::store::{CollectionStore, Snapshot};

pub struct RosterSession {
    store: Arc<CollectionStore>,
    query: Query,
    changes: watch::Receiver<Snapshot>,
}

impl RosterSession {
    /// New session sorted by last name, ascending, with no search term.
    pub fn new(store: Arc<CollectionStore>) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            query: Query::default(),
            changes,
        }
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    pub fn search_term(&self) -> &str {
        &self.query.term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.term = term.into();
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.query.sort
    }

    /// Same key flips direction; a different key starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.query.sort.toggle(key);
        log::debug!("Sorting by {} {:?}", self.query.sort.key, self.query.sort.order);
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Filtered and sorted records for display.
    pub fn view(&self) -> Vec<StudentRecord> {
        self.query.apply(&self.store.list())
    }

    /// Wait for the next change to the canonical set, then return the new view.
    ///
    /// If the store has already changed since the last call this returns
    /// immediately.
    pub async fn watch_view(&mut self) -> Vec<StudentRecord> {
        if self.changes.changed().await.is_err() {
            log::warn!("Store change channel closed");
        }
        let snapshot = self.changes.borrow_and_update().clone();
        self.query.apply(&snapshot)
    }

    pub async fn create(&self, draft: StudentDraft) -> StudentRecord {
        self.store.create(draft).await
    }

    pub async fn update(&self, id: &str, draft: StudentDraft) -> bool {
        self.store.update(id, draft).await
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.store.delete(id).await
    }

    /// Validate the form and create a record from it. Invalid forms never
    /// reach the store; the form is reset after a successful create.
    pub async fn submit_new(
        &self,
        form: &mut DraftForm,
    ) -> Result<StudentRecord, ValidationErrors> {
        let draft = form.submit()?;
        let record = self.store.create(draft).await;
        form.reset();
        Ok(record)
    }

    /// Validate the form and apply it to the record with `id`.
    ///
    /// `Ok(false)` means the form was valid but no record had that id.
    pub async fn submit_edit(
        &self,
        id: &str,
        form: &mut DraftForm,
    ) -> Result<bool, ValidationErrors> {
        let draft = form.submit()?;
        Ok(self.store.update(id, draft).await)
    }
}
