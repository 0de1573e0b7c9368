//! Table rows, detail view and pager footer shared by the browsing commands.

use std::fmt::Write;
use std::sync::Arc;

use tabled::Tabled;

use userdeck_core::{PageInfo, Record};

use crate::output::Painter;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct UserRow {
    #[tabled(rename = "#")]
    pub position: usize,
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Profile")]
    pub profile: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Interests")]
    pub interests: String,
}

impl UserRow {
    /// Row for `record`, numbered by its 1-based position on `page`.
    pub fn on_page(page: &[Arc<Record>], record: &Arc<Record>) -> Self {
        let position = page
            .iter()
            .position(|r| Arc::ptr_eq(r, record))
            .map_or(0, |idx| idx + 1);
        Self {
            position,
            id: record.id.to_string(),
            name: record.full_name(),
            profile: record.profile.clone(),
            email: record.email.clone(),
            interests: record.interests.to_string(),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub fn detail(r: &Record) -> String {
    let interests = r.interests.to_string();
    [
        format!("ID:         {}", r.id),
        format!("Name:       {}", or_dash(&r.full_name())),
        format!("Profile:    {}", or_dash(&r.profile)),
        format!("Interests:  {}", or_dash(&interests)),
        format!("Email:      {}", or_dash(&r.email)),
        format!("Photo:      {}", or_dash(&r.photo_url)),
    ]
    .join("\n")
}

// ── Messages ────────────────────────────────────────────────────────

pub fn no_results(query: &str) -> String {
    if query.trim().is_empty() {
        "No users found.".into()
    } else {
        format!("No users match \"{}\".", query.trim())
    }
}

/// `Page x of y (n results)`, followed by a pager line when there is more
/// than one page.
pub fn footer(page: &PageInfo, painter: Painter) -> String {
    let noun = if page.total_results == 1 { "result" } else { "results" };
    let mut out = painter.muted(&format!(
        "Page {} of {} ({} {noun})",
        page.current_page, page.total_pages, page.total_results
    ));

    if page.should_paginate() {
        out.push('\n');
        if page.has_previous() {
            out.push_str("‹ prev  ");
        }
        for n in page.page_numbers() {
            if n == page.current_page {
                let _ = write!(out, "{} ", painter.accent(&format!("[{n}]")));
            } else {
                let _ = write!(out, "{n} ");
            }
        }
        if page.has_next() {
            out.push_str(" next ›");
        }
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
    }
    out
}
