//! Replaying adapters that replay recorded interactions.

pub mod issues;
pub mod llm;

pub use issues::ReplayingIssueTracker;
pub use llm::ReplayingLlmClient;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;

/// Take the output of the next recorded interaction for `port::method`.
///
/// # Panics
///
/// Panics if the cassette holds no further interaction for this pair.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Rebuild a `Result` from a recorded output.
///
/// Expects `{"ok": <value>}` or `{"err": "message"}`; anything else is
/// treated as a bare ok value.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("ok") => map.remove("ok").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(value).map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
