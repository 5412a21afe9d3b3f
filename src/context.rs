//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{LiveIssueTracker, LiveLlmClient};
use crate::adapters::recording::{RecordingIssueTracker, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingIssueTracker, ReplayingLlmClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::config::{duplicate_secret, AppConfig};
use crate::ports::issues::{IssueFuture, IssueRequest, IssueTracker};
use crate::ports::llm::{CompletionFuture, CompletionRequest, LlmClient};

/// Bundles the port trait objects the ticket pipeline talks to.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Language model used for generation and evaluation.
    pub llm: Box<dyn LlmClient>,
    /// Issue tracker tickets are filed in.
    pub issues: Box<dyn IssueTracker>,
}

impl ServiceContext {
    /// Wraps already-built adapters.
    #[must_use]
    pub fn from_ports(llm: Box<dyn LlmClient>, issues: Box<dyn IssueTracker>) -> Self {
        Self { llm, issues }
    }

    /// Creates a context talking to the real services configured in `config`.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        Self {
            llm: Box::new(LiveLlmClient::new(
                config.openai_api_key.as_ref().map(duplicate_secret),
                config.openai_base_url.clone(),
            )),
            issues: Box::new(LiveIssueTracker::new(
                config.jira_api_token.as_ref().map(duplicate_secret),
            )),
        }
    }

    /// Creates a live context whose interactions are captured into `session`.
    ///
    /// The context must be dropped before [`RecordingSession::finish`] is
    /// called.
    #[must_use]
    pub fn recording(config: &AppConfig, session: &RecordingSession) -> Self {
        let live = Self::live(config);
        Self {
            llm: Box::new(RecordingLlmClient::new(live.llm, Arc::clone(&session.llm))),
            issues: Box::new(RecordingIssueTracker::new(live.issues, Arc::clone(&session.issues))),
        }
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Both ports are served from the one file, each with its own cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Self::replaying_from(&CassetteConfig::monolithic(path))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette get an adapter that panics with
    /// a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            llm: match replayers.llm {
                Some(r) => Box::new(ReplayingLlmClient::new(r)),
                None => Box::new(PanickingLlmClient),
            },
            issues: match replayers.issues {
                Some(r) => Box::new(ReplayingIssueTracker::new(r)),
                None => Box::new(PanickingIssueTracker),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingLlmClient;
impl LlmClient for PanickingLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        panic!("LlmClient port not configured in CassetteConfig: no cassette loaded for llm");
    }
}

struct PanickingIssueTracker;
impl IssueTracker for PanickingIssueTracker {
    fn create_issue(&self, _request: &IssueRequest) -> IssueFuture<'_> {
        panic!("IssueTracker port not configured in CassetteConfig: no cassette loaded for issues");
    }
}
