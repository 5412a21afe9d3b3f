//! Recording adapter for the `IssueTracker` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{IssueFuture, IssueRequest, IssueTracker};

/// Records issue tracker interactions while delegating to an inner implementation.
pub struct RecordingIssueTracker {
    inner: Box<dyn IssueTracker>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingIssueTracker {
    /// Creates a new recording issue tracker wrapping the given implementation.
    pub fn new(inner: Box<dyn IssueTracker>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl IssueTracker for RecordingIssueTracker {
    fn create_issue(&self, request: &IssueRequest) -> IssueFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let result = self.inner.create_issue(&request).await;
            record_result(&self.recorder, "issues", "create_issue", &request, &result);
            result
        })
    }
}
