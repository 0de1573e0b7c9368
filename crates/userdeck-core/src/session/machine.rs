// ── Session transitions ──
//
// The runtime-free half of the Browser Session: every user or provider
// event is a method that mutates the four components together and
// reports whether presentation should get a new snapshot. The async
// handle in `session::BrowserSession` drives these under a lock.

use std::sync::Arc;

use tracing::debug;

use crate::config::BrowserConfig;
use crate::error::CoreError;
use crate::model::{Record, RecordId};
use crate::paginate::Paginator;
use crate::search::{SearchEngine, SearchTicket};
use crate::selection::SelectionController;
use crate::store::{LoadOutcome, LoadTicket, RecordStore};

use super::state::SessionState;

#[derive(Debug)]
pub struct SessionMachine {
    store: RecordStore,
    search: SearchEngine,
    pager: Paginator,
    selection: SelectionController,
    version: u64,
}

impl SessionMachine {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            store: RecordStore::new(),
            search: SearchEngine::new(config.search_delay),
            pager: Paginator::new(config.page_size),
            selection: SelectionController::new(),
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn pager(&self) -> &Paginator {
        &self.pager
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    // ── Loading ──────────────────────────────────────────────────────

    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.store.begin_load();
        self.bump();
        ticket
    }

    /// Apply a provider answer. A new dataset becomes the search baseline:
    /// query cleared, view = dataset, page 1.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, CoreError>,
    ) -> LoadOutcome {
        let outcome = self.store.complete(ticket, result);
        match outcome {
            LoadOutcome::Applied => {
                let dataset = self.store.dataset();
                self.search.reset(&dataset);
                self.pager.reset();
                self.reconcile_selection();
                self.bump();
            }
            LoadOutcome::Failed => self.bump(),
            LoadOutcome::Superseded => {}
        }
        outcome
    }

    /// Keep the selection only if its id survived the reload, pointing at
    /// the fresh record.
    fn reconcile_selection(&mut self) {
        let Some(id) = self.selection.current().map(|r| r.id.clone()) else {
            return;
        };
        let dataset = self.store.dataset();
        match dataset.iter().find(|r| r.id == id) {
            Some(fresh) => self.selection.select(Arc::clone(fresh)),
            None => {
                debug!(%id, "selected record gone after reload");
                self.selection.clear();
            }
        }
    }

    // ── Searching ────────────────────────────────────────────────────

    pub fn request_search(&mut self, text: &str) -> SearchTicket {
        let ticket = self.search.set_query(text);
        self.bump();
        ticket
    }

    /// Arm the debounce timer for `ticket`. Needs a tokio runtime.
    pub fn schedule_search<F>(&mut self, ticket: SearchTicket, on_elapsed: F)
    where
        F: FnOnce(SearchTicket) + Send + 'static,
    {
        self.search.schedule(ticket, on_elapsed);
    }

    /// Resolve `ticket` over the current dataset and return to page 1.
    /// Stale tickets change nothing.
    pub fn resolve_search(&mut self, ticket: &SearchTicket) -> bool {
        let dataset = self.store.dataset();
        if !self.search.resolve(ticket, &dataset) {
            return false;
        }
        self.pager.reset();
        self.bump();
        true
    }

    // ── Paging ───────────────────────────────────────────────────────

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let len = self.search.filtered().len();
        let before = self.pager.current_page();
        let accepted = self.pager.go_to_page(page, len);
        if accepted && self.pager.current_page() != before {
            self.bump();
        }
        accepted
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.pager.current_page() + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pager.current_page() {
            1 => false,
            n => self.go_to_page(n - 1),
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Open the detail view on a record from the current page.
    pub fn select(&mut self, id: &RecordId) -> Result<Arc<Record>, CoreError> {
        let filtered = self.search.filtered();
        let record = self
            .pager
            .current_slice(&filtered)
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| CoreError::RecordNotFound {
                identifier: id.to_string(),
            })?;
        self.selection.select(Arc::clone(&record));
        self.bump();
        Ok(record)
    }

    pub fn clear_selection(&mut self) -> bool {
        let cleared = self.selection.clear();
        if cleared {
            self.bump();
        }
        cleared
    }

    // ── Snapshot ─────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionState {
        let filtered = self.search.filtered();
        let page_records = self.pager.current_slice(&filtered).to_vec();
        SessionState {
            version: self.version,
            phase: self.store.phase().clone(),
            query: self.search.query().to_owned(),
            resolved_query: self.search.resolved_query().to_owned(),
            searching: self.search.is_searching(),
            dataset: self.store.dataset(),
            page: self.pager.info(filtered.len()),
            page_records,
            filtered,
            selection: self.selection.current().cloned(),
            last_loaded_at: self.store.last_loaded_at(),
            error: self.store.last_error().cloned(),
        }
    }

    /// Cancel the pending search timer for good.
    pub fn shutdown(&mut self) {
        self.search.shutdown();
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::ViewStatus;
    use crate::store::Phase;
    use std::time::Duration;

    fn config() -> BrowserConfig {
        BrowserConfig::from_url("http://localhost:3000")
            .unwrap()
            .with_search_delay(Duration::ZERO)
    }

    fn people(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| Record {
                email: format!("user{i}@example.com"),
                ..Record::new(i, format!("User {i}"))
            })
            .collect()
    }

    fn loaded(n: i64) -> SessionMachine {
        let mut m = SessionMachine::new(&config());
        let ticket = m.begin_load();
        m.finish_load(ticket, Ok(people(n)));
        m
    }

    fn search(m: &mut SessionMachine, q: &str) {
        let ticket = m.request_search(q);
        assert!(m.resolve_search(&ticket));
    }

    #[test]
    fn load_exposes_full_dataset_on_page_one() {
        let m = loaded(20);
        let s = m.snapshot();
        assert_eq!(s.phase, Phase::Ready);
        assert_eq!(s.filtered.len(), 20);
        assert_eq!(s.page.current_page, 1);
        assert_eq!(s.page.total_pages, 3);
        assert_eq!(s.page_records.len(), 9);
        assert_eq!(s.view(), ViewStatus::Results);
    }

    #[test]
    fn search_resolution_resets_page() {
        let mut m = loaded(40);
        assert!(m.go_to_page(3));

        search(&mut m, "example.com");
        assert_eq!(m.snapshot().page.current_page, 1);
    }

    #[test]
    fn stale_resolution_is_void() {
        let mut m = loaded(20);
        let stale = m.request_search("user1");
        let latest = m.request_search("user2");

        assert!(!m.resolve_search(&stale));
        assert!(m.snapshot().searching);

        assert!(m.resolve_search(&latest));
        let s = m.snapshot();
        assert!(!s.searching);
        assert_eq!(s.resolved_query, "user2");
        // user2, user20
        assert_eq!(s.filtered.len(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let mut m = loaded(5);
        search(&mut m, "nadie");
        let s = m.snapshot();
        assert!(s.is_empty_result());
        assert_eq!(s.page.total_pages, 1);
        assert!(s.page_records.is_empty());
        assert!(s.phase.error_message().is_none());
    }

    #[test]
    fn searching_status_shows_before_results() {
        let mut m = loaded(5);
        m.request_search("user");
        assert_eq!(m.snapshot().view(), ViewStatus::Searching);
    }

    #[test]
    fn reload_resets_query_and_page() {
        let mut m = loaded(30);
        search(&mut m, "user1");
        m.go_to_page(2);

        let ticket = m.begin_load();
        m.finish_load(ticket, Ok(people(12)));

        let s = m.snapshot();
        assert_eq!(s.query, "");
        assert_eq!(s.filtered.len(), 12);
        assert_eq!(s.page.current_page, 1);
    }

    #[test]
    fn reload_voids_pending_search() {
        let mut m = loaded(10);
        let pending = m.request_search("user3");

        let ticket = m.begin_load();
        m.finish_load(ticket, Ok(people(10)));

        assert!(!m.resolve_search(&pending));
        assert!(!m.snapshot().searching);
        assert_eq!(m.snapshot().filtered.len(), 10);
    }

    #[test]
    fn failed_load_then_refresh_recovers() {
        let mut m = SessionMachine::new(&config());
        let ticket = m.begin_load();
        m.finish_load(
            ticket,
            Err(CoreError::ConnectionFailed {
                url: "http://localhost:3000/usuarios".into(),
                reason: "connection refused".into(),
            }),
        );
        assert!(matches!(
            m.snapshot().view(),
            ViewStatus::Failed { has_data: false, .. }
        ));
        assert!(matches!(
            m.snapshot().error,
            Some(CoreError::ConnectionFailed { .. })
        ));

        let ticket = m.begin_load();
        assert_eq!(m.snapshot().view(), ViewStatus::Loading);
        assert_eq!(m.finish_load(ticket, Ok(people(3))), LoadOutcome::Applied);
        let s = m.snapshot();
        assert_eq!(s.phase, Phase::Ready);
        assert_eq!(s.dataset.len(), 3);
        assert!(s.error.is_none());
    }

    #[test]
    fn select_requires_record_on_current_page() {
        let mut m = loaded(20);
        assert!(m.select(&RecordId::Numeric(3)).is_ok());

        let err = m.select(&RecordId::Numeric(15)).unwrap_err();
        assert!(matches!(err, CoreError::RecordNotFound { .. }));
        // failed select keeps the previous one
        assert_eq!(
            m.snapshot().selection.map(|r| r.id.clone()),
            Some(RecordId::Numeric(3))
        );

        m.go_to_page(2);
        assert!(m.select(&RecordId::Numeric(15)).is_ok());
    }

    #[test]
    fn select_replaces_and_clear_closes() {
        let mut m = loaded(9);
        m.select(&RecordId::Numeric(1)).unwrap();
        m.select(&RecordId::Numeric(2)).unwrap();
        assert_eq!(
            m.snapshot().selection.map(|r| r.id.clone()),
            Some(RecordId::Numeric(2))
        );

        assert!(m.clear_selection());
        assert!(!m.clear_selection());
        assert!(m.snapshot().selection.is_none());
    }

    #[test]
    fn selection_survives_reload_when_id_remains() {
        let mut m = loaded(9);
        m.select(&RecordId::Numeric(4)).unwrap();

        let ticket = m.begin_load();
        let mut fresh = people(9);
        fresh[3].profile = "Actualizado".into();
        m.finish_load(ticket, Ok(fresh));
        assert_eq!(
            m.snapshot().selection.map(|r| r.profile.clone()),
            Some("Actualizado".to_owned())
        );

        let ticket = m.begin_load();
        m.finish_load(ticket, Ok(people(2)));
        assert!(m.snapshot().selection.is_none());
    }

    #[test]
    fn out_of_range_page_changes_nothing() {
        let mut m = loaded(20);
        let version = m.version();
        assert!(!m.go_to_page(0));
        assert!(!m.go_to_page(4));
        assert_eq!(m.version(), version);

        assert!(m.go_to_page(3));
        let s = m.snapshot();
        let ids: Vec<_> = s.page_records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["19", "20"]);
    }

    #[test]
    fn previous_on_first_page_is_refused() {
        let mut m = loaded(20);
        assert!(!m.previous_page());
        assert!(m.next_page());
        assert!(m.previous_page());
        assert_eq!(m.pager().current_page(), 1);
    }

    #[test]
    fn page_of_locates_records() {
        let m = loaded(20);
        let s = m.snapshot();
        assert_eq!(s.page_of(&RecordId::Numeric(1)), Some(1));
        assert_eq!(s.page_of(&RecordId::Numeric(10)), Some(2));
        assert_eq!(s.page_of(&RecordId::Numeric(99)), None);
    }
}
