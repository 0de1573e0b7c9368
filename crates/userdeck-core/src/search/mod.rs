// ── Search Engine ──
//
// Holds the requested query, the resolved filtered view, and the
// debounce timer. A search is two steps: `set_query` records the text and
// issues a ticket, `resolve` applies that ticket once the debounce
// interval has elapsed. Only the most recent ticket can resolve.

mod debounce;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::store::Dataset;

pub use debounce::Debouncer;

/// Handle for one `set_query` call, captured by its debounce timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Normalize a raw query into the needle used for matching.
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Records of `dataset` matching `query`, in dataset order.
///
/// An empty or whitespace-only query returns the dataset itself without
/// scanning it.
pub fn filter_records(dataset: &Dataset, query: &str) -> Dataset {
    let Some(needle) = normalize_query(query) else {
        return Arc::clone(dataset);
    };
    Arc::new(
        dataset
            .iter()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect(),
    )
}

#[derive(Debug)]
pub struct SearchEngine {
    /// Latest requested query (may not be resolved yet).
    query: String,
    /// Query that produced `filtered`.
    resolved_query: String,
    filtered: Dataset,
    searching: bool,
    seq: u64,
    debouncer: Debouncer,
}

impl SearchEngine {
    pub fn new(delay: Duration) -> Self {
        Self {
            query: String::new(),
            resolved_query: String::new(),
            filtered: Arc::new(Vec::new()),
            searching: false,
            seq: 0,
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn resolved_query(&self) -> &str {
        &self.resolved_query
    }

    pub fn filtered(&self) -> Dataset {
        Arc::clone(&self.filtered)
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn delay(&self) -> Duration {
        self.debouncer.delay()
    }

    /// Record `text` as the requested query and enter `searching`.
    ///
    /// Cancels the pending debounce timer and voids every earlier ticket.
    pub fn set_query(&mut self, text: &str) -> SearchTicket {
        self.debouncer.cancel();
        self.seq += 1;
        self.query = text.to_owned();
        self.searching = true;
        debug!(seq = self.seq, query = text, "search requested");
        SearchTicket {
            seq: self.seq,
            query: self.query.clone(),
        }
    }

    /// Arm the debounce timer; `on_elapsed` receives the ticket once the
    /// interval passes without another `set_query`.
    pub fn schedule<F>(&mut self, ticket: SearchTicket, on_elapsed: F)
    where
        F: FnOnce(SearchTicket) + Send + 'static,
    {
        self.debouncer.arm(move || on_elapsed(ticket));
    }

    /// Whether `ticket` is from the latest `set_query`.
    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.seq
    }

    /// Compute the filtered view for `ticket` over `dataset`.
    ///
    /// Returns `false` (and changes nothing) for a superseded ticket.
    pub fn resolve(&mut self, ticket: &SearchTicket, dataset: &Dataset) -> bool {
        if !self.is_current(ticket) {
            debug!(seq = ticket.seq, latest = self.seq, "ignoring stale search");
            return false;
        }
        self.filtered = filter_records(dataset, &ticket.query);
        self.resolved_query.clone_from(&ticket.query);
        self.searching = false;
        debug!(
            query = ticket.query.as_str(),
            results = self.filtered.len(),
            "search resolved"
        );
        true
    }

    /// Take `dataset` as the new unfiltered baseline: empty query, full
    /// view, no pending search.
    pub fn reset(&mut self, dataset: &Dataset) {
        self.debouncer.cancel();
        self.seq += 1;
        self.query.clear();
        self.resolved_query.clear();
        self.filtered = Arc::clone(dataset);
        self.searching = false;
    }

    /// Stop the debounce timer for good.
    pub fn shutdown(&mut self) {
        self.debouncer.shutdown();
    }
}
