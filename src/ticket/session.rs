//! The per-user pipeline driver.

use std::fmt;

use tracing::{debug, info, warn};

use super::error::{Stage, TicketError};
use super::evaluator::ScopeEvaluator;
use super::generator::ScopeGenerator;
use super::scope::ScopedTask;
use super::submit::{confirmation, TicketSubmitter};
use super::title::is_valid_title;
use crate::config::JiraSettings;
use crate::context::ServiceContext;

/// Where the session's pipeline currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has run yet.
    Idle,
    /// Checking the title locally.
    Validating,
    /// Waiting on the generation pass.
    Generating,
    /// Waiting on the evaluation pass.
    Evaluating,
    /// The model judged the last scope poorly scoped.
    Rejected,
    /// A well-scoped task is held and may be filed.
    ReadyForSubmission,
    /// Waiting on the issue tracker.
    Submitting,
    /// The held task was filed under `key`.
    Submitted {
        /// Key assigned by the tracker.
        key: String,
    },
    /// The tracker refused or never received the ticket.
    SubmissionFailed {
        /// Message shown to the user.
        message: String,
    },
    /// A stage before submission failed.
    Failed {
        /// Stage that failed.
        stage: Stage,
        /// Message shown to the user.
        message: String,
    },
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Validating => f.write_str("validating"),
            Self::Generating => f.write_str("generating"),
            Self::Evaluating => f.write_str("evaluating"),
            Self::Rejected => f.write_str("rejected"),
            Self::ReadyForSubmission => f.write_str("ready for submission"),
            Self::Submitting => f.write_str("submitting"),
            Self::Submitted { key } => write!(f, "submitted as {key}"),
            Self::SubmissionFailed { message } => write!(f, "submission failed: {message}"),
            Self::Failed { stage, message } => write!(f, "{stage} failed: {message}"),
        }
    }
}

/// Drives title → scope → verdict → ticket for one user.
///
/// Holds the most recent well-scoped task between the generate and submit
/// actions. Every generation attempt drops the previously held task before
/// it starts, so a stale task can never be filed after a failed retry.
pub struct TicketSession {
    ctx: ServiceContext,
    model: String,
    jira: JiraSettings,
    state: PipelineState,
    current: Option<ScopedTask>,
}

impl TicketSession {
    /// Creates an idle session.
    pub fn new(ctx: ServiceContext, model: impl Into<String>, jira: JiraSettings) -> Self {
        Self { ctx, model: model.into(), jira, state: PipelineState::Idle, current: None }
    }

    /// Current pipeline state.
    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The held well-scoped task, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ScopedTask> {
        self.current.as_ref()
    }

    /// Active Jira settings.
    #[must_use]
    pub fn jira(&self) -> &JiraSettings {
        &self.jira
    }

    /// Mutable access to the Jira settings; changes apply to the next submission.
    pub fn jira_mut(&mut self) -> &mut JiraSettings {
        &mut self.jira
    }

    /// Model used for both passes.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn transition(&mut self, next: PipelineState) {
        debug!(from = %self.state, to = %next, "pipeline transition");
        self.state = next;
    }

    fn fail(&mut self, err: TicketError) -> TicketError {
        let next = match &err {
            TicketError::PoorlyScoped { .. } => PipelineState::Rejected,
            TicketError::Submission(_) => {
                PipelineState::SubmissionFailed { message: err.to_string() }
            }
            other => PipelineState::Failed { stage: other.stage(), message: other.to_string() },
        };
        warn!(stage = %err.stage(), error = %err, "pipeline stopped");
        self.transition(next);
        err
    }

    /// Runs validation, generation and evaluation for `title`.
    ///
    /// On success the task is held for [`submit`](Self::submit) and returned.
    ///
    /// # Errors
    ///
    /// Returns the [`TicketError`] of the first stage that failed, including
    /// [`TicketError::PoorlyScoped`] when the model rejects the scope.
    pub async fn generate(&mut self, title: &str) -> Result<&ScopedTask, TicketError> {
        self.current = None;
        info!(title, "generating ticket");

        self.transition(PipelineState::Validating);
        if !is_valid_title(title) {
            return Err(self.fail(TicketError::InvalidTitle));
        }

        self.transition(PipelineState::Generating);
        let generated = ScopeGenerator::new(self.ctx.llm.as_ref(), &self.model).generate(title).await;
        let raw = match generated {
            Ok(raw) => raw,
            Err(e) => return Err(self.fail(e)),
        };

        self.transition(PipelineState::Evaluating);
        let evaluated =
            ScopeEvaluator::new(self.ctx.llm.as_ref(), &self.model).evaluate(title, &raw).await;
        let task = match evaluated {
            Ok(task) => task,
            Err(e) => return Err(self.fail(e)),
        };

        if !task.is_well_scoped() {
            return Err(self.fail(TicketError::PoorlyScoped { title: task.title }));
        }

        info!(title = %task.title, "ticket ready for submission");
        self.transition(PipelineState::ReadyForSubmission);
        Ok(&*self.current.insert(task))
    }

    /// Files the held task with the issue tracker.
    ///
    /// The task stays held afterwards, so a failed submission can be retried
    /// by the user.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::NothingGenerated`] without contacting the
    /// tracker when no well-scoped task is held, and
    /// [`TicketError::Submission`] when filing fails.
    pub async fn submit(&mut self) -> Result<String, TicketError> {
        let Some(task) = self.current.as_ref() else {
            return Err(self.fail(TicketError::NothingGenerated));
        };

        debug!(from = %self.state, to = %PipelineState::Submitting, "pipeline transition");
        self.state = PipelineState::Submitting;
        let result = TicketSubmitter::new(self.ctx.issues.as_ref()).file(task, &self.jira).await;

        match result {
            Ok(created) => {
                let message = confirmation(&created);
                self.transition(PipelineState::Submitted { key: created.key });
                Ok(message)
            }
            Err(e) => Err(self.fail(e)),
        }
    }
}
