// ── Browser Session ──
//
// Orchestrates the store, search engine, paginator and selection, and
// publishes an immutable `SessionState` after every visible change.
// All transitions run under one lock so each snapshot is consistent.

mod machine;
mod state;
mod stream;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::BrowserConfig;
use crate::error::CoreError;
use crate::model::{Record, RecordId};
use crate::search::SearchTicket;
use crate::store::{ApiProvider, LoadOutcome, RecordProvider};

pub use machine::SessionMachine;
pub use state::{SessionState, ViewStatus};
pub use stream::{SessionStream, SessionWatchStream};

/// The entry point for presentation layers.
///
/// Cheaply cloneable via `Arc`. Loading and search resolution happen on
/// the tokio runtime, so `set_query` and `spawn_refresh` must be called
/// from within one.
pub struct BrowserSession<P: RecordProvider> {
    inner: Arc<SessionInner<P>>,
}

impl<P: RecordProvider> Clone for BrowserSession<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct SessionInner<P: RecordProvider> {
    config: BrowserConfig,
    provider: P,
    machine: Mutex<SessionMachine>,
    snapshot: watch::Sender<Arc<SessionState>>,
    cancel: CancellationToken,
}

impl<P: RecordProvider> SessionInner<P> {
    fn machine(&self) -> MutexGuard<'_, SessionMachine> {
        // Transitions never leave the machine half-updated, so a poisoned
        // lock still guards a usable value.
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run one transition and publish a snapshot if it reports a change.
    ///
    /// The snapshot is sent while the machine lock is held, so published
    /// versions never go backwards across threads.
    fn update<R>(&self, f: impl FnOnce(&mut SessionMachine) -> (R, bool)) -> R {
        let mut machine = self.machine();
        let (out, changed) = f(&mut *machine);
        if changed {
            self.snapshot.send_replace(Arc::new(machine.snapshot()));
        }
        out
    }

    fn resolve_search(&self, ticket: &SearchTicket) {
        let applied = self.update(|m| {
            let applied = m.resolve_search(ticket);
            (applied, applied)
        });
        if applied {
            debug!(query = ticket.query(), "search resolved");
        }
    }
}

impl BrowserSession<ApiProvider> {
    /// Session backed by the directory API described by `config`.
    pub fn from_config(config: BrowserConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let provider = ApiProvider::from_config(&config)?;
        Ok(Self::new(provider, config))
    }
}

impl<P: RecordProvider> BrowserSession<P> {
    /// Create a session in the Loading phase. Nothing is fetched until
    /// [`load()`](Self::load) is called.
    pub fn new(provider: P, config: BrowserConfig) -> Self {
        let machine = SessionMachine::new(&config);
        let (snapshot, _) = watch::channel(Arc::new(machine.snapshot()));

        Self {
            inner: Arc::new(SessionInner {
                config,
                provider,
                machine: Mutex::new(machine),
                snapshot,
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.inner.config
    }

    pub fn provider(&self) -> &P {
        &self.inner.provider
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Fetch the dataset and apply it, unless a later load was started
    /// meanwhile. Failures land in the `Error` phase, never in the caller.
    pub async fn load(&self) -> LoadOutcome {
        let ticket = self.inner.update(|m| (m.begin_load(), true));
        debug!(?ticket, "loading records");

        let result = self.inner.provider.fetch_records().await;

        let outcome = self.inner.update(|m| {
            let outcome = m.finish_load(ticket, result);
            (outcome, outcome != LoadOutcome::Superseded)
        });
        match outcome {
            LoadOutcome::Applied => {
                info!(records = self.snapshot().dataset.len(), "records loaded");
            }
            LoadOutcome::Superseded => debug!(?ticket, "load superseded"),
            LoadOutcome::Failed => {}
        }
        outcome
    }

    /// Retry after a failure, or reload on demand. Same as [`load()`](Self::load).
    pub async fn refresh(&self) -> LoadOutcome {
        self.load().await
    }

    /// Run a refresh in the background. The task stops early on
    /// [`shutdown()`](Self::shutdown).
    pub fn spawn_refresh(&self) -> JoinHandle<Option<LoadOutcome>> {
        let session = self.clone();
        let cancel = self.inner.cancel.child_token();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                outcome = session.load() => Some(outcome),
            }
        })
    }

    // ── Searching ────────────────────────────────────────────────────

    /// Record a new query and restart the debounce timer. The filtered view
    /// updates once the delay elapses without another call.
    pub fn set_query(&self, text: &str) {
        let weak: Weak<SessionInner<P>> = Arc::downgrade(&self.inner);
        self.inner.update(|m| {
            let ticket = m.request_search(text);
            m.schedule_search(ticket, move |ticket| {
                if let Some(inner) = weak.upgrade() {
                    inner.resolve_search(&ticket);
                }
            });
            ((), true)
        });
    }

    // ── Paging ───────────────────────────────────────────────────────

    /// Jump to a 1-based page. Out-of-range requests are refused.
    pub fn go_to_page(&self, page: usize) -> bool {
        self.inner.update(|m| {
            let before = m.version();
            let accepted = m.go_to_page(page);
            (accepted, m.version() != before)
        })
    }

    pub fn next_page(&self) -> bool {
        self.inner.update(|m| {
            let moved = m.next_page();
            (moved, moved)
        })
    }

    pub fn previous_page(&self) -> bool {
        self.inner.update(|m| {
            let moved = m.previous_page();
            (moved, moved)
        })
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Open the detail view on a record shown on the current page.
    pub fn select(&self, id: &RecordId) -> Result<Arc<Record>, CoreError> {
        self.inner.update(|m| {
            let result = m.select(id);
            let changed = result.is_ok();
            (result, changed)
        })
    }

    pub fn clear_selection(&self) -> bool {
        self.inner.update(|m| {
            let cleared = m.clear_selection();
            (cleared, cleared)
        })
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<SessionState> {
        self.inner.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> SessionStream {
        SessionStream::new(self.inner.snapshot.subscribe())
    }

    /// Wait until no load or search is in flight.
    pub async fn settled(&self) -> Arc<SessionState> {
        let mut stream = self.subscribe();
        match stream.wait_for(SessionState::is_settled).await {
            Some(state) => state,
            None => self.snapshot(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Cancel the pending search timer and background refreshes.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.machine().shutdown();
        debug!("browser session shut down");
    }
}
