//! `t3po session` command.

use std::io;

use crate::config::AppConfig;
use crate::console::ConsoleLoop;
use crate::context::ServiceContext;
use crate::ticket::TicketSession;

/// Execute the `session` command on stdin/stdout.
///
/// # Errors
///
/// Returns an error string if terminal I/O fails.
pub async fn run(ctx: ServiceContext, config: &AppConfig) -> Result<(), String> {
    let session = TicketSession::new(ctx, config.model.clone(), config.jira.clone());
    let stdin = io::stdin();
    ConsoleLoop::new(session, stdin.lock(), io::stdout()).run().await?;
    Ok(())
}
