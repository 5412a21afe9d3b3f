//! `t3po generate` command.

use crate::config::AppConfig;
use crate::console::render_task;
use crate::context::ServiceContext;
use crate::ticket::TicketSession;

/// Execute the `generate` command.
///
/// Prints the generated ticket; with `submit` also files it and prints the
/// tracker's confirmation.
///
/// # Errors
///
/// Returns the user-facing message of the first pipeline stage that failed.
pub async fn run(
    ctx: ServiceContext,
    config: &AppConfig,
    title: &str,
    submit: bool,
) -> Result<(), String> {
    let mut session = TicketSession::new(ctx, config.model.clone(), config.jira.clone());

    let task = session.generate(title).await.map_err(|e| e.to_string())?;
    println!("{}", render_task(task));

    if submit {
        let message = session.submit().await.map_err(|e| e.to_string())?;
        println!("{message}");
    }
    Ok(())
}
