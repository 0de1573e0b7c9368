//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use userdeck_core::{RecordId, SessionState};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::Session;

/// Fetch the dataset, showing a spinner on an interactive stderr.
/// Returns the session state once the load has settled.
pub async fn load_quietly(session: &Session, global: &GlobalOpts) -> Arc<SessionState> {
    let spinner = spinner(global, "Loading users…");
    session.load().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    session.snapshot()
}

/// Like [`load_quietly`], but a failed load becomes the command's error.
pub async fn load(session: &Session, global: &GlobalOpts) -> Result<Arc<SessionState>, CliError> {
    let state = load_quietly(session, global).await;
    match state.error {
        Some(ref err) => Err(err.clone().into()),
        None => Ok(state),
    }
}

/// Apply `query` (if any) and wait for the filtered view to settle.
pub async fn search(session: &Session, query: Option<&str>) -> Arc<SessionState> {
    if let Some(query) = query {
        session.set_query(query);
    }
    session.settled().await
}

/// Resolve a user identifier against the filtered view.
///
/// Matches on the id's display form, so "7" finds both numeric and
/// text ids.
pub fn resolve_record_id(state: &SessionState, identifier: &str) -> Result<RecordId, CliError> {
    state
        .filtered
        .iter()
        .find(|r| r.id.to_string() == identifier)
        .map(|r| r.id.clone())
        .ok_or_else(|| CliError::NotFound {
            resource_type: "user".into(),
            identifier: identifier.into(),
            list_command: "list".into(),
        })
}

fn spinner(global: &GlobalOpts, message: &'static str) -> Option<ProgressBar> {
    if global.quiet || !io::stderr().is_terminal() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    Some(spinner)
}
