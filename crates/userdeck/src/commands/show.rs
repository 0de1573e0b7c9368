//! `userdeck show`: open the detail view of one user.

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

use super::render;
use super::{Session, util};

pub async fn handle(session: &Session, args: ShowArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::load(session, global).await?;
    let state = util::search(session, args.query.as_deref()).await;

    // Selection only reaches records on the visible page, so page there first.
    let id = util::resolve_record_id(&state, &args.id)?;
    if let Some(page) = state.page_of(&id) {
        session.go_to_page(page);
    }
    let record = session.select(&id)?;
    tracing::debug!(%id, page = session.snapshot().page.current_page, "user selected");

    let out = output::render_single(
        &global.output,
        &record,
        |r| render::detail(r),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
