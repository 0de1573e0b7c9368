// ── Session snapshots ──
//
// `SessionState` is the immutable value presentation renders. A new one
// is built after every transition that changes something visible.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CoreError;
use crate::model::{Record, RecordId};
use crate::paginate::PageInfo;
use crate::store::{Dataset, Phase};

/// Everything presentation needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    /// Bumped on every published change.
    pub version: u64,
    #[serde(flatten)]
    pub phase: Phase,
    /// Latest requested query (may still be debouncing).
    pub query: String,
    /// Query the filtered view was computed from.
    pub resolved_query: String,
    pub searching: bool,
    #[serde(skip)]
    pub dataset: Dataset,
    #[serde(skip)]
    pub filtered: Dataset,
    pub page: PageInfo,
    pub page_records: Vec<Arc<Record>>,
    pub selection: Option<Arc<Record>>,
    pub last_loaded_at: Option<DateTime<Utc>>,
    /// Cause of the `Error` phase.
    #[serde(skip)]
    pub error: Option<CoreError>,
}

/// What the main area should show, in the directory UI's precedence:
/// loading, then error, then the search spinner, then results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    /// The latest load failed. `has_data` is set when an earlier load's
    /// view is still available to show under the error.
    Failed { message: String, has_data: bool },
    Searching,
    /// Filtering finished with nothing to show. Not an error.
    NoResults,
    Results,
}

impl SessionState {
    pub fn view(&self) -> ViewStatus {
        match &self.phase {
            Phase::Loading => ViewStatus::Loading,
            Phase::Error(msg) => ViewStatus::Failed {
                message: msg.clone(),
                has_data: !self.filtered.is_empty(),
            },
            Phase::Ready if self.searching => ViewStatus::Searching,
            Phase::Ready if self.filtered.is_empty() => ViewStatus::NoResults,
            Phase::Ready => ViewStatus::Results,
        }
    }

    /// Filtering finished and matched nothing.
    pub fn is_empty_result(&self) -> bool {
        self.view() == ViewStatus::NoResults
    }

    pub fn is_settled(&self) -> bool {
        !self.searching && !self.phase.is_loading()
    }

    pub fn is_detail_open(&self) -> bool {
        self.selection.is_some()
    }

    /// Find a record on the current page by id.
    pub fn page_record(&self, id: &RecordId) -> Option<&Arc<Record>> {
        self.page_records.iter().find(|r| &r.id == id)
    }

    /// 1-based page holding `id` in the filtered view.
    pub fn page_of(&self, id: &RecordId) -> Option<usize> {
        self.filtered
            .iter()
            .position(|r| &r.id == id)
            .map(|idx| idx / self.page.page_size + 1)
    }
}
