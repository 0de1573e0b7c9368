//! `userdeck browse`: interactive, line-oriented session.
//!
//! Input lines and session snapshots are multiplexed with `tokio::select!`,
//! so a debounced search shows up on its own once the quiet period ends.

use std::fmt::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use userdeck_core::{SessionState, ViewStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, Painter};

use super::render::{self, UserRow};
use super::{Session, util};

const HELP: &str = "\
Commands:
  /text    search (a bare / clears the search)
  n, p     next / previous page
  g N      go to page N
  o N      open row N of the current page
  c        close the open user
  r        reload the directory
  ?        this help
  q        quit";

// ── Input parsing ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Next,
    Previous,
    GoTo(usize),
    Open(usize),
    Close,
    Retry,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    if let Some(query) = line.trim_start().strip_prefix('/') {
        return Input::Search(query.to_owned());
    }

    let line = line.trim();
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Input::Empty;
    };

    let parsed = match (cmd, parts.next(), parts.next()) {
        ("n" | "next", None, None) => Some(Input::Next),
        ("p" | "prev", None, None) => Some(Input::Previous),
        ("g" | "goto", Some(n), None) => n.parse().ok().map(Input::GoTo),
        ("o" | "open", Some(n), None) => n.parse().ok().map(Input::Open),
        ("c" | "close", None, None) => Some(Input::Close),
        ("r" | "retry" | "reload", None, None) => Some(Input::Retry),
        ("?" | "h" | "help", None, None) => Some(Input::Help),
        ("q" | "quit" | "exit", None, None) => Some(Input::Quit),
        _ => None,
    };
    parsed.unwrap_or_else(|| Input::Unknown(line.to_owned()))
}

// ── Frame rendering ─────────────────────────────────────────────────

/// Everything shown for one snapshot.
pub fn render_frame(state: &SessionState, painter: Painter) -> String {
    let mut out = String::new();
    match state.view() {
        ViewStatus::Loading => out.push_str(&painter.muted("Loading users…")),
        ViewStatus::Failed { message, has_data } => {
            out.push_str(&painter.error(&message));
            out.push_str("\nType r to retry.");
            // The previous load's page stays usable under the banner.
            if has_data {
                out.push_str("\n\n");
                push_results(&mut out, state, painter);
            }
        }
        ViewStatus::Searching => {
            let _ = write!(out, "Searching for \"{}\"…", state.query.trim());
        }
        ViewStatus::NoResults => {
            out.push_str(&painter.muted(&render::no_results(&state.resolved_query)));
        }
        ViewStatus::Results => push_results(&mut out, state, painter),
    }

    if let Some(ref record) = state.selection {
        let _ = write!(
            out,
            "\n\n{}\n{}\nType c to close.",
            painter.accent(&record.full_name()),
            render::detail(record)
        );
    }
    out
}

fn push_results(out: &mut String, state: &SessionState, painter: Painter) {
    let page = &state.page_records;
    let rows: Vec<_> = page.iter().map(|r| UserRow::on_page(page, r)).collect();
    out.push_str(&output::render_table(&rows));
    out.push('\n');
    if let Some((first, last)) = state.page.record_range() {
        let _ = writeln!(out, "Showing {first}-{last}");
    }
    out.push_str(&render::footer(&state.page, painter));
    if let Some(at) = state.last_loaded_at {
        let local = at.with_timezone(&chrono::Local);
        let loaded = format!("Loaded {}", local.format("%H:%M:%S"));
        let _ = write!(out, "\n{}", painter.muted(&loaded));
    }
}

// ── Handler ─────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

fn apply(session: &Session, input: Input, painter: Painter) -> Flow {
    let notice = |text: &str| println!("{}", painter.muted(text));

    match input {
        Input::Search(query) => session.set_query(&query),
        Input::Next => {
            if !session.next_page() {
                notice("Already on the last page.");
            }
        }
        Input::Previous => {
            if !session.previous_page() {
                notice("Already on the first page.");
            }
        }
        Input::GoTo(n) => {
            if !session.go_to_page(n) {
                let total = session.snapshot().page.total_pages;
                notice(&format!("No page {n} (1-{total})."));
            }
        }
        Input::Open(n) => {
            let state = session.snapshot();
            let row = n.checked_sub(1).and_then(|idx| state.page_records.get(idx));
            match row {
                Some(record) => {
                    if let Err(e) = session.select(&record.id) {
                        notice(&e.to_string());
                    }
                }
                None => notice(&format!("No row {n} on this page.")),
            }
        }
        Input::Close => {
            if !session.clear_selection() {
                notice("Nothing is open.");
            }
        }
        Input::Retry => {
            session.spawn_refresh();
        }
        Input::Help => println!("{HELP}"),
        Input::Quit => return Flow::Quit,
        Input::Empty => {}
        Input::Unknown(line) => notice(&format!("Unknown command '{line}'. Type ? for help.")),
    }
    Flow::Continue
}

/// Print the frame for `state` unless it was already shown.
fn redraw(state: &SessionState, shown: &mut Option<u64>, painter: Painter) {
    if *shown == Some(state.version) {
        return;
    }
    *shown = Some(state.version);
    println!("{}\n", render_frame(state, painter));
}

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let painter = Painter::new(&global.color);
    let mut snapshots = session.subscribe();
    let mut shown = None;

    println!("{HELP}\n");
    let state = util::load_quietly(session, global).await;
    redraw(&state, &mut shown, painter);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = apply(session, parse_input(&line), painter) {
                    break;
                }
                redraw(&session.snapshot(), &mut shown, painter);
            }
            Some(state) = snapshots.changed() => {
                redraw(&state, &mut shown, painter);
            }
        }
    }
    Ok(())
}
