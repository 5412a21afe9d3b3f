//! Issue tracker port for filing tickets.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`IssueTracker`] to keep the trait dyn-compatible.
pub type IssueFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CreatedIssue, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Fields of a new issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueFields {
    /// Key of the project the issue is filed under.
    pub project_key: String,
    /// One-line summary shown as the issue title.
    pub summary: String,
    /// Issue body, in the tracker's markup.
    pub description: String,
    /// Issue type name (e.g. `"Task"`).
    pub issue_type: String,
    /// Username the issue is assigned to.
    pub assignee: String,
}

/// A request to create an issue on a specific tracker server.
///
/// The API token is not part of the request; it is held by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    /// Base URL of the tracker server.
    pub server_url: String,
    /// Principal used for basic authentication.
    pub username: String,
    /// Fields of the issue to create.
    pub fields: IssueFields,
}

/// An issue as acknowledged by the tracker after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Human-readable key (e.g. `"PROJ-42"`).
    pub key: String,
    /// Tracker-internal identifier.
    #[serde(default)]
    pub id: String,
}

/// Creates issues in an external tracker.
///
/// Abstracting issue tracking allows deterministic replay and testing
/// without touching a real issue tracker API.
pub trait IssueTracker: Send + Sync {
    /// Creates a new issue and returns its assigned key.
    ///
    /// # Errors
    ///
    /// Returns an error if the issue cannot be created (auth, network,
    /// validation on the tracker's side).
    fn create_issue(&self, request: &IssueRequest) -> IssueFuture<'_>;
}
