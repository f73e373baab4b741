//! gitflow-action - gitflow branch promotion for GitHub

mod cli;

use clap::Parser;
use gitflow_action::config::Inputs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Gitflow branch promotion and gated auto-merge for GitHub
#[derive(Parser)]
#[command(name = "gitflow-action", version, about)]
struct Cli {
    #[command(flatten)]
    inputs: Inputs,

    /// GitHub token (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Ref that triggered the run
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Dump event payloads and API responses
    #[arg(short, long, env = "RUNNER_DEBUG")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "gitflow_action=debug"
    } else {
        "gitflow_action=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(std::io::stdout().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli::RunOptions {
        inputs: cli.inputs,
        github_token: cli.github_token,
        event_name: cli.event_name,
        event_path: cli.event_path,
        git_ref: cli.git_ref,
        repository: cli.repository,
        api_url: cli.api_url,
    };

    match cli::run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
