//! Run command - handle the event that triggered this run

use crate::cli::context::RunContext;
use anstream::eprintln;
use gitflow_action::config::Inputs;
use gitflow_action::event::load_event;
use gitflow_action::promote::{Dispatcher, TerminalState};
use std::path::PathBuf;
use tracing::{debug, info};

/// Options for a run
#[derive(Clone)]
pub struct RunOptions {
    /// Action inputs
    pub inputs: Inputs,
    /// Explicit GitHub token
    pub github_token: Option<String>,
    /// Triggering event name
    pub event_name: String,
    /// Path to the event payload
    pub event_path: PathBuf,
    /// Triggering ref
    pub git_ref: Option<String>,
    /// `owner/repo`
    pub repository: String,
    /// REST API base URL
    pub api_url: Option<String>,
}

/// Run the action for a single event
pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    let ctx = RunContext::new(
        &options.inputs,
        options.github_token.as_deref(),
        &options.repository,
        options.api_url,
    )?;

    let Some(event) = load_event(
        &options.event_name,
        &options.event_path,
        options.git_ref.as_deref(),
    )?
    else {
        info!("Event {} is not handled. Skipping...", options.event_name);
        return Ok(());
    };

    let dispatcher = Dispatcher::new(ctx.platform.as_ref(), &ctx.config);
    let report = dispatcher.dispatch(&event).await?.into_result()?;

    let state = report.terminal_state();
    debug!(?state, actions = ?report.actions(), "run finished");
    if state == TerminalState::MergeFailedLogged {
        info!("Merge failures were logged but not required to succeed.");
    }
    Ok(())
}

/// Report a fatal run failure as a GitHub workflow error annotation
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("::error::{err:#}");
}
