//! Review queue state: flagged items, per-item corrections, and the bulk
//! validation push.

use crate::api::{RawQueueItem, ValidateRequest};
use crate::error::Result;
use crate::tasks::{Job, PushSummary};
use std::collections::HashMap;

/// Label applied when the reviewer confirmed the routing without picking a
/// correction.
pub const DEFAULT_LABEL: &str = "Validated";

/// Correction labels offered in the label cycle; the empty string means
/// "no correction" and falls back to [`DEFAULT_LABEL`] at push time.
pub const LABEL_CHOICES: [&str; 5] = ["", "sarcasm", "negative", "positive", "neutral"];

/// Visual priority derived from the backend's flag reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagPriority {
    High,
    Medium,
    Low,
}

impl FlagPriority {
    /// Derive a priority from the free-text reason: "critical" anywhere
    /// means high, "contrast" means medium, anything else (including a
    /// missing reason) is low.
    #[must_use]
    pub fn from_reason(reason: Option<&str>) -> Self {
        let Some(reason) = reason else {
            return Self::Low;
        };
        let lower = reason.to_lowercase();
        if lower.contains("critical") {
            Self::High
        } else if lower.contains("contrast") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

/// A queue entry with its derived priority.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub id: String,
    pub text: String,
    pub reason: Option<String>,
    pub priority: FlagPriority,
}

impl From<RawQueueItem> for QueueItem {
    fn from(raw: RawQueueItem) -> Self {
        let priority = FlagPriority::from_reason(raw.reason.as_deref());
        Self {
            id: raw.id,
            text: raw.text,
            reason: raw.reason,
            priority,
        }
    }
}

/// State for the review tab.
///
/// Corrections live in side maps keyed by item id rather than on the items
/// themselves; they are assembled into requests only at push time.
pub struct ReviewState {
    pub queue: Vec<QueueItem>,
    pub remarks: HashMap<String, String>,
    pub labels: HashMap<String, String>,
    /// Items validated this session, surviving queue refreshes.
    pub validated_session: u64,
    pub selected: usize,
    pub loading: bool,
    pub pushing: bool,
    /// True while the remark of the selected item is being edited.
    pub editing_remark: bool,
}

impl ReviewState {
    /// Mount the view and fetch the current queue.
    pub fn mount() -> (Self, Job) {
        let state = Self {
            queue: Vec::new(),
            remarks: HashMap::new(),
            labels: HashMap::new(),
            validated_session: 0,
            selected: 0,
            loading: true,
            pushing: false,
            editing_remark: false,
        };
        (state, Job::FetchQueue)
    }

    /// Apply a completed queue fetch. A failed fetch leaves the current
    /// queue in place.
    pub fn on_queue(&mut self, outcome: Result<Vec<RawQueueItem>>) {
        self.loading = false;
        match outcome {
            Ok(items) => {
                self.queue = items.into_iter().map(QueueItem::from).collect();
                self.selected = 0;
            }
            Err(err) => {
                tracing::warn!("queue fetch failed: {err}");
            }
        }
    }

    pub fn selected_item(&self) -> Option<&QueueItem> {
        self.queue.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.queue.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Remark text for an item, empty if none was entered.
    #[must_use]
    pub fn remark_for(&self, id: &str) -> &str {
        self.remarks.get(id).map_or("", String::as_str)
    }

    /// Correction label for an item, empty if none was picked.
    #[must_use]
    pub fn label_for(&self, id: &str) -> &str {
        self.labels.get(id).map_or("", String::as_str)
    }

    pub fn push_remark_char(&mut self, c: char) {
        if let Some(item) = self.queue.get(self.selected) {
            self.remarks.entry(item.id.clone()).or_default().push(c);
        }
    }

    pub fn pop_remark_char(&mut self) {
        if let Some(item) = self.queue.get(self.selected) {
            if let Some(remark) = self.remarks.get_mut(&item.id) {
                remark.pop();
            }
        }
    }

    /// Advance the selected item's label through [`LABEL_CHOICES`].
    pub fn cycle_label(&mut self) {
        let Some(item) = self.queue.get(self.selected) else {
            return;
        };
        let current = self.labels.get(&item.id).map_or("", String::as_str);
        let index = LABEL_CHOICES.iter().position(|&l| l == current).unwrap_or(0);
        let next = LABEL_CHOICES[(index + 1) % LABEL_CHOICES.len()];
        if next.is_empty() {
            self.labels.remove(&item.id);
        } else {
            self.labels.insert(item.id.clone(), next.to_string());
        }
    }

    /// Remove the selected item locally. No backend call; the item simply
    /// will not be part of the next push.
    pub fn delete_selected(&mut self) {
        if self.selected >= self.queue.len() {
            return;
        }
        let item = self.queue.remove(self.selected);
        self.remarks.remove(&item.id);
        self.labels.remove(&item.id);
        if self.selected >= self.queue.len() {
            self.selected = self.queue.len().saturating_sub(1);
        }
    }

    /// Push every queued item to the validation endpoint. No-op while a
    /// push is already in flight or when the queue is empty.
    pub fn push_all(&mut self) -> Option<Job> {
        if self.pushing || self.queue.is_empty() {
            return None;
        }
        let requests: Vec<ValidateRequest> = self
            .queue
            .iter()
            .map(|item| {
                let label = self.label_for(&item.id);
                ValidateRequest {
                    id: item.id.clone(),
                    text: item.text.clone(),
                    corrected_label: if label.is_empty() {
                        DEFAULT_LABEL.to_string()
                    } else {
                        label.to_string()
                    },
                    remark: self.remark_for(&item.id).to_string(),
                }
            })
            .collect();
        self.pushing = true;
        Some(Job::PushQueue(requests))
    }

    /// Apply a completed push. The whole pre-push queue counts as
    /// validated regardless of per-item failures, and the queue and its
    /// side maps are cleared unconditionally.
    pub fn on_push(&mut self, summary: PushSummary) {
        self.pushing = false;
        self.validated_session += summary.attempted as u64;
        if summary.failed() > 0 {
            tracing::warn!(
                "{} of {} validations failed",
                summary.failed(),
                summary.attempted
            );
        }
        self.queue.clear();
        self.remarks.clear();
        self.labels.clear();
        self.selected = 0;
        self.editing_remark = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;
    use crate::tasks::PushItemOutcome;

    fn raw(id: &str, reason: Option<&str>) -> RawQueueItem {
        RawQueueItem {
            id: id.into(),
            text: format!("text for {id}"),
            reason: reason.map(String::from),
        }
    }

    fn loaded(items: Vec<RawQueueItem>) -> ReviewState {
        let (mut state, _) = ReviewState::mount();
        state.on_queue(Ok(items));
        state
    }

    fn summary_for(state: &ReviewState, failed: usize) -> PushSummary {
        let items = state
            .queue
            .iter()
            .enumerate()
            .map(|(i, item)| PushItemOutcome {
                id: item.id.clone(),
                error: (i < failed).then(|| "boom".to_string()),
            })
            .collect::<Vec<_>>();
        PushSummary {
            attempted: state.queue.len(),
            items,
        }
    }

    #[test]
    fn test_priority_derivation_is_total() {
        assert_eq!(
            FlagPriority::from_reason(Some("LLM Flagged: Critical churn risk")),
            FlagPriority::High
        );
        assert_eq!(
            FlagPriority::from_reason(Some("sentiment contrast detected")),
            FlagPriority::Medium
        );
        assert_eq!(
            FlagPriority::from_reason(Some("low confidence")),
            FlagPriority::Low
        );
        assert_eq!(FlagPriority::from_reason(None), FlagPriority::Low);
        assert_eq!(FlagPriority::from_reason(Some("")), FlagPriority::Low);
    }

    #[test]
    fn test_critical_wins_over_contrast() {
        assert_eq!(
            FlagPriority::from_reason(Some("critical sentiment contrast")),
            FlagPriority::High
        );
    }

    #[test]
    fn test_failed_fetch_keeps_queue() {
        let mut state = loaded(vec![raw("a", None)]);
        state.on_queue(Err(SiftError::network("queue", "refused")));
        assert_eq!(state.queue.len(), 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_delete_is_local_only() {
        let mut state = loaded(vec![raw("a", None), raw("b", None)]);
        state.push_remark_char('x');
        state.delete_selected();
        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.queue[0].id, "b");
        assert!(state.remarks.is_empty());
        assert_eq!(state.validated_session, 0);
    }

    #[test]
    fn test_push_defaults_label_and_remark() {
        let mut state = loaded(vec![raw("a", None), raw("b", None)]);
        state.select_next();
        state.cycle_label(); // "" -> "sarcasm"
        state.push_remark_char('o');
        state.push_remark_char('k');

        let job = state.push_all().expect("push job");
        let Job::PushQueue(requests) = job else {
            panic!("unexpected job");
        };
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].corrected_label, DEFAULT_LABEL);
        assert_eq!(requests[0].remark, "");
        assert_eq!(requests[1].corrected_label, "sarcasm");
        assert_eq!(requests[1].remark, "ok");
    }

    #[test]
    fn test_push_empty_queue_is_noop() {
        let mut state = loaded(vec![]);
        assert!(state.push_all().is_none());
        assert_eq!(state.validated_session, 0);
    }

    #[test]
    fn test_push_completion_counts_everything_attempted() {
        let mut state = loaded(vec![raw("a", None), raw("b", None), raw("c", None)]);
        let _ = state.push_all().unwrap();
        let summary = summary_for(&state, 2);

        state.on_push(summary);
        assert_eq!(state.validated_session, 3);
        assert!(state.queue.is_empty());
        assert!(state.remarks.is_empty());
        assert!(state.labels.is_empty());
        assert!(!state.pushing);
    }

    #[test]
    fn test_session_counter_survives_refetch() {
        let mut state = loaded(vec![raw("a", None)]);
        let _ = state.push_all().unwrap();
        let summary = summary_for(&state, 0);
        state.on_push(summary);
        assert_eq!(state.validated_session, 1);

        state.on_queue(Ok(vec![raw("d", None), raw("e", None)]));
        assert_eq!(state.validated_session, 1);
        assert_eq!(state.queue.len(), 2);
    }

    #[test]
    fn test_label_cycle_wraps_to_empty() {
        let mut state = loaded(vec![raw("a", None)]);
        for _ in 0..LABEL_CHOICES.len() {
            state.cycle_label();
        }
        assert_eq!(state.label_for("a"), "");
    }

    #[test]
    fn test_no_push_while_in_flight() {
        let mut state = loaded(vec![raw("a", None)]);
        assert!(state.push_all().is_some());
        assert!(state.push_all().is_none());
    }
}
