// ── Record Store ──
//
// Owns the authoritative dataset and the coarse load phase. The store is
// plain state: `begin_load` hands out a ticket, `complete` applies the
// provider's answer for that ticket. The async request itself is driven
// by the session, which keeps the store free of runtime concerns.

mod provider;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Record, RecordId};

pub use provider::{ApiProvider, RecordProvider};

/// Shared, immutable dataset snapshot.
pub type Dataset = Arc<Vec<Arc<Record>>>;

/// Build a dataset from plain records, in order.
pub fn dataset_of(records: impl IntoIterator<Item = Record>) -> Dataset {
    Arc::new(records.into_iter().map(Arc::new).collect())
}

// ── Phase ───────────────────────────────────────────────────────────

/// Lifecycle of the data-loading process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "message", rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Error(String),
    Ready,
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// ── Tickets & outcomes ──────────────────────────────────────────────

/// Handle for one load request. Only the most recently issued ticket
/// may change the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// What `RecordStore::complete` did with a provider answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Dataset replaced, phase is `Ready`.
    Applied,
    /// Phase is `Error`, dataset untouched.
    Failed,
    /// A newer load was issued; the answer was discarded.
    Superseded,
}

// ── RecordStore ─────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RecordStore {
    phase: Phase,
    dataset: Dataset,
    generation: u64,
    last_loaded_at: Option<DateTime<Utc>>,
    last_error: Option<CoreError>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Empty store. The phase starts at `Loading` because a session
    /// issues its first load immediately.
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            dataset: Arc::new(Vec::new()),
            generation: 0,
            last_loaded_at: None,
            last_error: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Current dataset (cheap `Arc` clone).
    pub fn dataset(&self) -> Dataset {
        Arc::clone(&self.dataset)
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// When the current dataset was applied, if ever.
    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    /// The error behind the current `Error` phase.
    pub fn last_error(&self) -> Option<&CoreError> {
        self.last_error.as_ref()
    }

    /// Enter `Loading` and issue a ticket that supersedes all earlier ones.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.phase = Phase::Loading;
        debug!(generation = self.generation, "load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Whether `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply the provider's answer for `ticket`.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, CoreError>,
    ) -> LoadOutcome {
        if !self.is_current(ticket) {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(records) => {
                self.dataset = Arc::new(dedupe(records));
                self.phase = Phase::Ready;
                self.last_loaded_at = Some(Utc::now());
                self.last_error = None;
                debug!(records = self.dataset.len(), "dataset replaced");
                LoadOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "failed to load users");
                self.phase = Phase::Error(e.user_message());
                self.last_error = Some(e);
                LoadOutcome::Failed
            }
        }
    }
}

/// Keep the first record for each id, in provider order.
fn dedupe(records: Vec<Record>) -> Vec<Arc<Record>> {
    let mut seen: HashSet<RecordId> = HashSet::with_capacity(records.len());
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        if seen.insert(record.id.clone()) {
            out.push(Arc::new(record));
        } else {
            warn!(id = %record.id, "dropping record with duplicate id");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .zip(1_i64..)
            .map(|(name, id)| Record::new(id, *name))
            .collect()
    }

    #[test]
    fn new_store_is_loading_and_empty() {
        let store = RecordStore::new();
        assert!(store.phase().is_loading());
        assert!(store.is_empty());
        assert!(store.last_loaded_at().is_none());
    }

    #[test]
    fn successful_load_replaces_dataset() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load();
        let outcome = store.complete(ticket, Ok(records(&["Ana", "Beto"])));

        assert_eq!(outcome, LoadOutcome::Applied);
        assert!(store.phase().is_ready());
        assert_eq!(store.len(), 2);
        assert!(store.last_loaded_at().is_some());
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut store = RecordStore::new();
        let first = store.begin_load();
        store.complete(first, Ok(records(&["Ana"])));

        let second = store.begin_load();
        let outcome = store.complete(
            second,
            Err(CoreError::Api {
                message: "HTTP 500".into(),
                status: Some(500),
            }),
        );

        assert_eq!(outcome, LoadOutcome::Failed);
        assert!(store.phase().error_message().is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.dataset()[0].name, "Ana");
    }

    #[test]
    fn latest_issued_load_wins_regardless_of_completion_order() {
        let mut store = RecordStore::new();
        let first = store.begin_load();
        let second = store.begin_load();

        assert_eq!(
            store.complete(second, Ok(records(&["Nuevo"]))),
            LoadOutcome::Applied
        );
        assert_eq!(
            store.complete(first, Ok(records(&["Viejo"]))),
            LoadOutcome::Superseded
        );
        assert_eq!(store.dataset()[0].name, "Nuevo");
    }

    #[test]
    fn superseded_failure_does_not_touch_phase() {
        let mut store = RecordStore::new();
        let first = store.begin_load();
        let _second = store.begin_load();

        let outcome = store.complete(
            first,
            Err(CoreError::Timeout { timeout_secs: 30 }),
        );
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(store.phase().is_loading());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut store = RecordStore::new();
        let ticket = store.begin_load();
        store.complete(
            ticket,
            Ok(vec![
                Record::new(1, "Ana"),
                Record::new(2, "Beto"),
                Record::new(1, "Impostora"),
            ]),
        );

        let names: Vec<_> = store.dataset().iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, ["Ana", "Beto"]);
    }
}
