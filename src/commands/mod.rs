//! Command dispatch and handlers.

pub mod generate;
pub mod session;

use std::env;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::context::ServiceContext;

/// Default root for recorded cassettes when `T3PO_RECORD=1`.
pub const DEFAULT_CASSETTE_ROOT: &str = ".t3po/cassettes";

/// Dispatch a parsed command to its handler.
///
/// When `T3PO_REPLAY` names a cassette file, both ports are served from it.
/// Otherwise, when `T3PO_RECORD` is set, live interactions are recorded to
/// per-port cassette files: `1` records under `.t3po/cassettes`, any other
/// value is taken as the root directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let mut config = AppConfig::from_env();
    cli.apply_overrides(&mut config.jira);
    debug!(model = %config.model, jira_url = %config.jira.url, project = %config.jira.project_key, "configuration loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    let (ctx, session) = if let Some(path) = env_path("T3PO_REPLAY") {
        info!(cassette = %path.display(), "replaying cassette");
        (ServiceContext::replaying(&path)?, None)
    } else if let Some(root) = env_path("T3PO_RECORD") {
        let root = if root.to_str() == Some("1") { PathBuf::from(DEFAULT_CASSETTE_ROOT) } else { root };
        let session = RecordingSession::new(&root)?;
        (ServiceContext::recording(&config, &session), Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let result = runtime.block_on(dispatch_with_context(&cli.command, ctx, &config));

    // Finish recording after the command completes (even on error).
    if let Some(session) = session {
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// The context is consumed so recording adapters are released before the
/// recording session is finished.
async fn dispatch_with_context(
    command: &Command,
    ctx: ServiceContext,
    config: &AppConfig,
) -> Result<(), String> {
    match command {
        Command::Generate { title, submit } => generate::run(ctx, config, title, *submit).await,
        Command::Session => session::run(ctx, config).await,
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
