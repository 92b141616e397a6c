//! Terminal front end for the major selection flow.
//!
//! Each invocation plays one visit to the selection page: the flow is
//! initialised, the requested action runs, and the result is rendered as
//! plain text.

mod args;
mod render;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

pub use args::{CliArgs, Command};
pub use render::{render_navigation, render_options, render_selection, render_user};

use crate::domain::ports::{MajorCatalog, UserCacheSlot, UserDirectory};
use crate::domain::{Error, MajorSelectionFlow, Navigation, UserCacheSync};

/// Failures reported to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// The session user could not be loaded.
    #[error("{message} (next: {path})")]
    SessionEnded {
        /// Message shown by the page.
        message: String,
        /// Route the page redirects to.
        path: &'static str,
    },
    /// The major list could not be loaded.
    #[error("{0}")]
    MajorsUnavailable(String),
    /// The selection was not saved.
    #[error(transparent)]
    Selection(#[from] Error),
}

/// Build a flow over the given adapters and run `command` on it.
///
/// # Errors
///
/// See [`execute`].
pub async fn run_command<D, M, C>(
    directory: Arc<D>,
    catalog: Arc<M>,
    cache: Arc<C>,
    command: &Command,
) -> Result<String, CliError>
where
    D: UserDirectory,
    M: MajorCatalog,
    C: UserCacheSlot,
{
    let mut flow = MajorSelectionFlow::new(UserCacheSync::new(directory, cache), catalog);
    execute(&mut flow, command).await
}

/// Run `command` on `flow` and render the outcome.
///
/// # Errors
///
/// Returns [`CliError::SessionEnded`] when the user cannot be loaded,
/// [`CliError::MajorsUnavailable`] when listing without majors, and
/// [`CliError::Selection`] when a selection is not saved.
pub async fn execute<D, M, C>(
    flow: &mut MajorSelectionFlow<D, M, C>,
    command: &Command,
) -> Result<String, CliError>
where
    D: UserDirectory,
    M: MajorCatalog,
    C: UserCacheSlot,
{
    if *command == Command::Skip {
        return Ok(render_navigation(flow.skip()));
    }

    flow.initialize().await;
    if flow.navigation() == Some(Navigation::Landing) {
        return Err(CliError::SessionEnded {
            message: flow.message().unwrap_or_default().to_owned(),
            path: Navigation::Landing.path(),
        });
    }
    debug!(?command, majors = flow.majors().len(), "selection page loaded");

    match command {
        Command::List => {
            if flow.majors().is_empty() {
                if let Some(message) = flow.message() {
                    return Err(CliError::MajorsUnavailable(message.to_owned()));
                }
            }
            Ok(render_options(&flow.options()))
        }
        Command::Select { major_id } => {
            flow.select(major_id.clone());
            let outcome = flow.submit().await?;
            let navigation = flow.navigation().unwrap_or(Navigation::MyPage);
            Ok(render_selection(&outcome, navigation))
        }
        Command::Whoami => Ok(flow.user().map_or_else(
            || "no user loaded".to_owned(),
            render_user,
        )),
        Command::Skip => Ok(render_navigation(flow.skip())),
    }
}
