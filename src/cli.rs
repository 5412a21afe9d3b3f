//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::config::JiraSettings;

/// Top-level CLI parser for `t3po`.
#[derive(Debug, Parser)]
#[command(name = "t3po", version, about = "Turn task titles into well-scoped Jira tickets")]
pub struct Cli {
    /// Jira server URL (overrides `JIRA_URL`).
    #[arg(long, global = true, value_name = "URL")]
    pub jira_url: Option<String>,
    /// Jira username, used to authenticate and as assignee (overrides `JIRA_USER`).
    #[arg(long, global = true, value_name = "USER")]
    pub jira_user: Option<String>,
    /// Jira project key (overrides `JIRA_PROJECT_KEY`).
    #[arg(long, global = true, value_name = "KEY")]
    pub project_key: Option<String>,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a scoped ticket for a task title and print it.
    Generate {
        /// Task title, e.g. "Write evaluation module for MNIST classifier".
        title: String,
        /// Also file the ticket in Jira when it is well-scoped.
        #[arg(long)]
        submit: bool,
    },
    /// Start an interactive ticket session.
    Session,
}

impl Cli {
    /// Applies the command-line Jira overrides on top of `jira`.
    pub fn apply_overrides(&self, jira: &mut JiraSettings) {
        if let Some(url) = &self.jira_url {
            jira.url.clone_from(url);
        }
        if let Some(user) = &self.jira_user {
            jira.user.clone_from(user);
        }
        if let Some(key) = &self.project_key {
            jira.project_key.clone_from(key);
        }
    }
}
