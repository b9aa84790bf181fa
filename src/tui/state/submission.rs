//! Submission view state: free-text input, single-shot analysis, history.

use crate::api::{AnalyzeRequest, SubmissionRecord};
use crate::error::Result;
use crate::session::{keys, load_json, save_json, SessionStore, SharedStore};
use crate::tasks::Job;

/// How many history entries are rendered; storage is unbounded.
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// State for the submission tab.
///
/// Input text, current result, and history mirror to the session store on
/// every change and are restored once when the view mounts.
pub struct SubmissionState {
    pub input: String,
    pub result: Option<SubmissionRecord>,
    /// Newest-first, append-only, never deduplicated.
    pub history: Vec<SubmissionRecord>,
    pub loading: bool,
    store: SharedStore,
}

impl SubmissionState {
    /// Mount the view, restoring session-persisted state.
    pub fn mount(store: SharedStore) -> Self {
        let input = store.load(keys::DASH_INPUT).unwrap_or_default();
        let result = load_json(store.as_ref(), keys::DASH_RESULT);
        let history = load_json(store.as_ref(), keys::DASH_HISTORY).unwrap_or_default();
        Self {
            input,
            result,
            history,
            loading: false,
            store,
        }
    }

    /// Append a character to the input, mirroring it to the session.
    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
        self.store.save(keys::DASH_INPUT, &self.input);
    }

    /// Remove the last input character.
    pub fn pop_input(&mut self) {
        self.input.pop();
        self.store.save(keys::DASH_INPUT, &self.input);
    }

    /// Replace the whole input (paste).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.store.save(keys::DASH_INPUT, &self.input);
    }

    /// Submit the current input for analysis.
    ///
    /// Empty or whitespace-only input is a no-op. The current result is
    /// cleared while the request is in flight; a second submit before the
    /// first resolves is not guarded beyond the mount-generation check in
    /// the app, so responses can land out of order.
    pub fn submit(&mut self) -> Option<Job> {
        let text = self.input.trim();
        if text.is_empty() {
            return None;
        }

        self.loading = true;
        self.result = None;
        self.persist_result();

        let request = AnalyzeRequest {
            id: format!("req_{}", chrono::Utc::now().timestamp_millis()),
            text: self.input.clone(),
        };
        Some(Job::Analyze(request))
    }

    /// Apply a completed analyze call.
    ///
    /// Failures leave history untouched and surface nothing to the user;
    /// the error is logged for diagnostics only.
    pub fn on_result(&mut self, outcome: Result<SubmissionRecord>) {
        self.loading = false;
        match outcome {
            Ok(record) => {
                self.result = Some(record.clone());
                self.history.insert(0, record);
                self.persist_result();
                self.persist_history();
            }
            Err(err) => {
                tracing::warn!("analyze request failed: {err}");
            }
        }
    }

    /// The slice of history actually rendered.
    #[must_use]
    pub fn visible_history(&self) -> &[SubmissionRecord] {
        let end = self.history.len().min(HISTORY_DISPLAY_LIMIT);
        &self.history[..end]
    }

    fn persist_result(&self) {
        match &self.result {
            Some(result) => save_json(self.store.as_ref(), keys::DASH_RESULT, result),
            // Mirror "no result" explicitly so a restore can tell it apart
            // from a never-written key.
            None => self.store.save(keys::DASH_RESULT, "null"),
        }
    }

    fn persist_history(&self) {
        save_json(self.store.as_ref(), keys::DASH_HISTORY, &self.history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Decision, Routing};
    use crate::session::MemoryStore;
    use crate::error::SiftError;
    use std::sync::Arc;

    fn record(id: &str, text: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: id.into(),
            text: text.into(),
            routing: Routing {
                decision: Decision::Simple,
                confidence: 0.9,
                tags: vec![],
                reason: "keyword".into(),
            },
            analysis: None,
            status: "Auto-Resolved (Simple)".into(),
        }
    }

    fn mounted() -> (SubmissionState, SharedStore) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        (SubmissionState::mount(Arc::clone(&store)), store)
    }

    #[test]
    fn test_empty_input_does_not_submit() {
        let (mut state, _) = mounted();
        assert!(state.submit().is_none());

        state.set_input("   \t  ");
        assert!(state.submit().is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_submit_generates_prefixed_id() {
        let (mut state, _) = mounted();
        state.set_input("my package never arrived");
        let job = state.submit().expect("job");
        match job {
            Job::Analyze(req) => {
                assert!(req.id.starts_with("req_"));
                assert_eq!(req.text, "my package never arrived");
            }
            other => panic!("unexpected job {other:?}"),
        }
        assert!(state.loading);
    }

    #[test]
    fn test_success_prepends_history_newest_first() {
        let (mut state, _) = mounted();
        for i in 0..7 {
            state.set_input(format!("complaint {i}"));
            let _ = state.submit().unwrap();
            state.on_result(Ok(record(&format!("req_{i}"), &format!("complaint {i}"))));
        }
        assert_eq!(state.history.len(), 7);
        assert_eq!(state.history[0].id, "req_6");
        assert_eq!(state.visible_history().len(), HISTORY_DISPLAY_LIMIT);
        assert_eq!(state.visible_history()[0].id, "req_6");
    }

    #[test]
    fn test_failure_keeps_history_and_clears_loading() {
        let (mut state, _) = mounted();
        state.set_input("first");
        let _ = state.submit().unwrap();
        state.on_result(Ok(record("req_a", "first")));

        state.set_input("second");
        let _ = state.submit().unwrap();
        state.on_result(Err(SiftError::network("analyze", "unreachable")));

        assert!(!state.loading);
        assert!(state.result.is_none());
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_remount_restores_session_state() {
        let (mut state, store) = mounted();
        state.set_input("pending text");
        let _ = state.submit().unwrap();
        state.on_result(Ok(record("req_a", "pending text")));

        let remounted = SubmissionState::mount(store);
        assert_eq!(remounted.input, "pending text");
        assert_eq!(remounted.result.as_ref().map(|r| r.id.as_str()), Some("req_a"));
        assert_eq!(remounted.history.len(), 1);
    }

    #[test]
    fn test_restoring_null_result_yields_none() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.save(keys::DASH_RESULT, "null");
        let state = SubmissionState::mount(store);
        assert!(state.result.is_none());
    }

    #[test]
    fn test_history_is_not_deduplicated() {
        let (mut state, _) = mounted();
        for _ in 0..3 {
            state.set_input("same text");
            let _ = state.submit().unwrap();
            state.on_result(Ok(record("req_same", "same text")));
        }
        assert_eq!(state.history.len(), 3);
    }
}
