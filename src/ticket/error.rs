//! Error taxonomy of the ticket pipeline.

use std::fmt;

use thiserror::Error;

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Local title check.
    Validation,
    /// First model pass.
    Generation,
    /// Second model pass.
    Evaluation,
    /// Filing the ticket.
    Submission,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Generation => write!(f, "generation"),
            Self::Evaluation => write!(f, "evaluation"),
            Self::Submission => write!(f, "submission"),
        }
    }
}

/// Everything that can stop a ticket from being generated or filed.
///
/// Display strings are shown to the user verbatim and carry the upstream
/// message where there is one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// The title failed the local length check.
    #[error("Please enter a valid task title (more than 8 characters).")]
    InvalidTitle,
    /// The generation service call failed.
    #[error("Failed to generate task details due to: {0}")]
    Generation(String),
    /// The evaluation service call failed or returned unparseable data.
    #[error("Failed to evaluate task scope due to: {0}")]
    Evaluation(String),
    /// The model judged the scope poorly scoped. A business outcome, not a fault.
    #[error("The generated task details for {title:?} are not well-scoped. Please try again.")]
    PoorlyScoped {
        /// Title of the rejected task.
        title: String,
    },
    /// The issue tracker rejected or never received the ticket.
    #[error("Failed to create Jira ticket due to: {0}")]
    Submission(String),
    /// Submission was requested before any successful generation.
    #[error("Please generate task details before creating a Jira ticket.")]
    NothingGenerated,
}

impl TicketError {
    /// Stage this error stops the pipeline at.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidTitle => Stage::Validation,
            Self::Generation(_) => Stage::Generation,
            Self::Evaluation(_) | Self::PoorlyScoped { .. } => Stage::Evaluation,
            Self::Submission(_) | Self::NothingGenerated => Stage::Submission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_is_kept_verbatim() {
        let err = TicketError::Generation("connection refused".into());
        assert_eq!(err.to_string(), "Failed to generate task details due to: connection refused");
        assert_eq!(err.stage(), Stage::Generation);
    }

    #[test]
    fn rejection_names_the_title() {
        let err = TicketError::PoorlyScoped { title: "Update UI".into() };
        assert!(err.to_string().contains("\"Update UI\""));
        assert!(err.to_string().contains("not well-scoped"));
        assert_eq!(err.stage(), Stage::Evaluation);
    }

    #[test]
    fn nothing_generated_asks_to_generate_first() {
        let msg = TicketError::NothingGenerated.to_string();
        assert!(msg.contains("generate task details before"));
        assert_eq!(TicketError::NothingGenerated.stage(), Stage::Submission);
    }
}
