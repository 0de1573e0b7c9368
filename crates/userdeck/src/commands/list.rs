//! `userdeck list`: one page of the (optionally filtered) directory.

use userdeck_core::ViewStatus;

use crate::cli::{GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::render::{self, UserRow};
use super::{Session, util};

pub async fn handle(session: &Session, args: ListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::load(session, global).await?;
    let state = util::search(session, args.query.as_deref()).await;

    if !session.go_to_page(args.page) {
        return Err(CliError::Validation {
            field: "page".into(),
            reason: format!(
                "page {} is out of range (1-{})",
                args.page, state.page.total_pages
            ),
        });
    }
    let state = session.snapshot();
    let painter = Painter::new(&global.color);

    if output::is_human(&global.output) && state.view() == ViewStatus::NoResults {
        output::print_output(
            &painter.muted(&render::no_results(&state.resolved_query)),
            global.quiet,
        );
        return Ok(());
    }

    let page = &state.page_records;
    let out = output::render_list(
        &global.output,
        page,
        |r| UserRow::on_page(page, r),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if output::is_human(&global.output) {
        output::print_output(&render::footer(&state.page, painter), global.quiet);
    }
    Ok(())
}
