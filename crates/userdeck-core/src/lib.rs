//! Result-browsing state machine between `userdeck-api` and UI consumers.
//!
//! This crate owns the domain model and the browsing logic for a user
//! directory:
//!
//! - **[`BrowserSession`]** — Central handle. [`load()`](BrowserSession::load)
//!   fetches the dataset, [`set_query()`](BrowserSession::set_query) filters it
//!   after a debounce delay, and paging and selection calls update the view.
//!   Every visible change is published as an immutable [`SessionState`].
//!
//! - **[`RecordStore`]** — The loaded dataset plus its load phase
//!   (`Loading` / `Error` / `Ready`). The latest issued load wins.
//!
//! - **[`SearchEngine`]** — Case-insensitive substring filter over
//!   name, surname, profile, interests and email, debounced through a
//!   cancellable timer.
//!
//! - **[`Paginator`]** / **[`SelectionController`]** — Fixed-size pages over
//!   the filtered view and the record open in the detail view.
//!
//! - **[`SessionStream`]** — Subscription handle exposing
//!   `current()` / `latest()` / `changed()` for reactive rendering.

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod paginate;
pub mod search;
pub mod selection;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BrowserConfig, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DELAY, TlsVerification};
pub use error::CoreError;
pub use model::{Interests, Record, RecordId};
pub use paginate::{PageInfo, Paginator};
pub use search::{SearchEngine, SearchTicket, filter_records};
pub use selection::SelectionController;
pub use session::{BrowserSession, SessionMachine, SessionState, SessionStream, ViewStatus};
pub use store::{ApiProvider, Dataset, LoadOutcome, Phase, RecordProvider, RecordStore};
