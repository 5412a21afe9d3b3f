//! Filing a judged task with the issue tracker.

use tracing::{info, warn};

use super::error::TicketError;
use super::format::format_description;
use super::scope::ScopedTask;
use crate::config::JiraSettings;
use crate::ports::issues::{CreatedIssue, IssueFields, IssueRequest, IssueTracker};

/// Issue type every generated ticket is filed as.
pub const ISSUE_TYPE: &str = "Task";

/// Files well-scoped tasks as tickets.
pub struct TicketSubmitter<'a> {
    issues: &'a dyn IssueTracker,
}

impl<'a> TicketSubmitter<'a> {
    /// Creates a submitter filing through `issues`.
    #[must_use]
    pub fn new(issues: &'a dyn IssueTracker) -> Self {
        Self { issues }
    }

    /// Builds the tracker request for `task` under `jira`.
    ///
    /// The configured user is both the basic-auth principal and the assignee.
    #[must_use]
    pub fn request(task: &ScopedTask, jira: &JiraSettings) -> IssueRequest {
        IssueRequest {
            server_url: jira.url.clone(),
            username: jira.user.clone(),
            fields: IssueFields {
                project_key: jira.project_key.clone(),
                summary: task.title.clone(),
                description: format_description(task),
                issue_type: ISSUE_TYPE.to_string(),
                assignee: jira.user.clone(),
            },
        }
    }

    /// Files `task` and returns the issue the tracker created.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::PoorlyScoped`] without contacting the tracker
    /// when the task was not judged well-scoped, and
    /// [`TicketError::Submission`] with the tracker's message when filing
    /// fails.
    pub async fn file(&self, task: &ScopedTask, jira: &JiraSettings) -> Result<CreatedIssue, TicketError> {
        if !task.is_well_scoped() {
            return Err(TicketError::PoorlyScoped { title: task.title.clone() });
        }

        let request = Self::request(task, jira);
        match self.issues.create_issue(&request).await {
            Ok(created) => {
                info!(key = %created.key, project = %jira.project_key, "ticket created");
                Ok(created)
            }
            Err(e) => {
                warn!(project = %jira.project_key, error = %e, "ticket creation failed");
                Err(TicketError::Submission(e.to_string()))
            }
        }
    }

    /// Files `task` and returns the confirmation shown to the user.
    ///
    /// # Errors
    ///
    /// Same as [`file`](Self::file).
    pub async fn submit(&self, task: &ScopedTask, jira: &JiraSettings) -> Result<String, TicketError> {
        let created = self.file(task, jira).await?;
        Ok(confirmation(&created))
    }
}

/// Message shown after a ticket was filed.
#[must_use]
pub fn confirmation(created: &CreatedIssue) -> String {
    format!("Successfully created Jira issue: {}", created.key)
}
