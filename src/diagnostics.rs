//! Best-effort diagnostic dumps of payloads and API responses

use serde::Serialize;
use tracing::{Level, debug, enabled};

/// Log `value` as JSON at debug level.
///
/// Does nothing unless debug logging is enabled. A value that fails to
/// serialize is dropped silently; diagnostics never fail a run.
pub fn debug_json<T: Serialize + ?Sized>(label: &str, value: &T) {
    if !enabled!(Level::DEBUG) {
        return;
    }
    if let Some(json) = to_json(value) {
        debug!(target: "gitflow_action::payload", "{label}: {json}");
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}
