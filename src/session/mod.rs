//! Session-scoped key/value persistence.
//!
//! Views mirror their state into this store on every change and restore it
//! once when mounted, so switching tabs within a session loses nothing.
//! The store is an injected port: views only see the [`SessionStore`]
//! trait, which keeps them deterministic under test. The default backend
//! is in-memory (the process *is* the session); a JSON file backend exists
//! for resuming within the same login session.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Fixed persistence keys shared with nothing else; values are JSON text.
pub mod keys {
    /// Submission view: current input text (stored verbatim, not JSON).
    pub const DASH_INPUT: &str = "dash_input";
    /// Submission view: last result, JSON or the literal `null`.
    pub const DASH_RESULT: &str = "dash_result";
    /// Submission view: newest-first history array.
    pub const DASH_HISTORY: &str = "dash_history";
    /// Insights view: latest stats summary.
    pub const STRAT_STATS: &str = "strat_stats";
    /// Insights view: latest strategy report, JSON or the literal `null`.
    pub const STRAT_REPORT: &str = "strat_report";
}

/// Port for session-scoped persistence.
///
/// Implementations are shared process-wide behind an [`Arc`] and must be
/// safe to call from the UI thread at any time.
pub trait SessionStore: Send + Sync {
    /// Fetch the raw stored value for `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str);

    /// Drop any value stored under `key`.
    fn remove(&self, key: &str);
}

/// Shared handle type used throughout the TUI.
pub type SharedStore = Arc<dyn SessionStore>;

/// Serialize `value` as JSON under `key`.
///
/// Serialization of the dashboard's own state types cannot fail; if it
/// ever does the value is skipped and logged rather than poisoning the
/// store.
pub fn save_json<T: Serialize>(store: &dyn SessionStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.save(key, &json),
        Err(err) => tracing::warn!("session: failed to serialize {key}: {err}"),
    }
}

/// Restore a JSON value stored under `key`.
///
/// Returns `None` for an absent key, for the literal `null`/`undefined`
/// strings a previous session may have written for "no value", and for
/// any payload that no longer parses (logged, never propagated).
pub fn load_json<T: DeserializeOwned>(store: &dyn SessionStore, key: &str) -> Option<T> {
    let raw = store.load(key)?;
    if raw == "null" || raw == "undefined" {
        return None;
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("session: discarding unparseable value for {key}: {err}");
            None
        }
    }
}
