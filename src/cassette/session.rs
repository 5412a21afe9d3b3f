//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use super::recorder::CassetteRecorder;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file.
/// All cassettes are stored in a timestamped directory.
pub struct RecordingSession {
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for issue tracker interactions.
    pub issues: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session in a timestamped directory under `root`
    /// (`<root>/<timestamp>/`).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cassette directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, env!("CARGO_PKG_VERSION"))))
        };

        Ok(Self { llm: make_recorder("llm"), issues: make_recorder("issues"), output_dir })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// Ports that saw no interactions produce no file.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording adapter is still alive or any cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                return Ok(());
            }
            let path =
                recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            info!(port, path = %path.display(), "cassette written");
            Ok(())
        }

        finish_one(self.llm, "llm")?;
        finish_one(self.issues, "issues")?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn writes_only_ports_that_were_used() {
        let root = std::env::temp_dir().join("t3po_session_test");
        let session = RecordingSession::new(&root).expect("session should start");
        let dir = session.output_dir().to_path_buf();
        assert!(dir.exists(), "Output directory should exist after new()");

        session.llm.lock().unwrap().record("llm", "complete", json!({}), json!({"ok": {"text": "x"}}));

        let finished = session.finish().expect("finish should succeed");
        assert_eq!(finished, dir);
        assert!(dir.join("llm.cassette.yaml").exists());
        assert!(!dir.join("issues.cassette.yaml").exists());

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let root = std::env::temp_dir().join("t3po_session_test_held");
        let session = RecordingSession::new(&root).unwrap();
        let held = Arc::clone(&session.issues);

        let err = session.finish().unwrap_err();
        assert!(err.contains("issues still has references"));

        drop(held);
        let _ = std::fs::remove_dir_all(&root);
    }
}
