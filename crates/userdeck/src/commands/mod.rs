//! Command dispatch: bridges CLI args -> browser session -> output formatting.

pub mod browse;
pub mod config_cmd;
pub mod list;
pub mod render;
pub mod show;
pub mod util;

use std::time::Duration;

use userdeck_core::{ApiProvider, BrowserConfig, BrowserSession};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// The session type every browsing command drives.
pub type Session = BrowserSession<ApiProvider>;

/// Dispatch a directory-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: BrowserConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        // One-shot commands have no typing to debounce.
        Command::List(args) => {
            let session = Session::from_config(config.with_search_delay(Duration::ZERO))?;
            let result = list::handle(&session, args, global).await;
            session.shutdown();
            result
        }
        Command::Show(args) => {
            let session = Session::from_config(config.with_search_delay(Duration::ZERO))?;
            let result = show::handle(&session, args, global).await;
            session.shutdown();
            result
        }
        Command::Browse(args) => {
            let config = match args.debounce_ms {
                Some(ms) => config.with_search_delay(Duration::from_millis(ms)),
                None => config,
            };
            let session = Session::from_config(config)?;
            let result = browse::handle(&session, global).await;
            session.shutdown();
            result
        }
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
