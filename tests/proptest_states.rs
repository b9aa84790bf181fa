//! Property tests over the pure derivation functions of the view states.

use proptest::prelude::*;
use siftboard::api::{LatestBatchData, RawQueueItem};
use siftboard::tui::state::{clean_markup, BatchState, FlagPriority, ReviewState};

fn latest_batch(auto_resolved: u64, processed: u64) -> LatestBatchData {
    serde_json::from_value(serde_json::json!({
        "filename": "gen.csv",
        "status": "completed",
        "items": processed,
        "processed": processed,
        "preview": [],
        "insights": {
            "auto_resolved": auto_resolved,
            "critical": 0,
            "negative": 0,
            "preview_rows": 0,
            "row_errors": 0
        }
    }))
    .unwrap()
}

proptest! {
    // Flag derivation accepts any reason text without panicking and always
    // lands on one of the three priorities.
    #[test]
    fn flag_mapping_is_total(reason in any::<Option<String>>()) {
        let priority = FlagPriority::from_reason(reason.as_deref());
        prop_assert!(matches!(
            priority,
            FlagPriority::High | FlagPriority::Medium | FlagPriority::Low
        ));
    }

    // The resolution rate is always a non-negative one-decimal percentage
    // for any counter combination the backend could send, while the gauge
    // ratio stays clamped to its widget range.
    #[test]
    fn resolution_rate_stays_well_formed(
        auto_resolved in 0u64..2_000_000,
        processed in 0u64..2_000_000,
    ) {
        let (mut state, _) = BatchState::mount();
        state.on_latest(Ok(Some(latest_batch(auto_resolved, processed))));

        let rate = state.resolution_rate();
        let value: f64 = rate.parse().expect("rate must be numeric");
        prop_assert!(value >= 0.0);
        prop_assert!(rate.contains('.'));
        prop_assert!((0.0..=1.0).contains(&state.resolution_ratio()));
    }

    // Markup stripping only removes marker characters: it never panics and
    // never adds or drops line breaks.
    #[test]
    fn clean_markup_preserves_newlines(text in any::<String>()) {
        let cleaned = clean_markup(&text);
        let newlines = |s: &str| s.chars().filter(|&c| c == '\n').count();
        prop_assert_eq!(newlines(&cleaned), newlines(&text));
    }

    // Pushing any queue clears it and counts every item exactly once.
    #[test]
    fn push_contract_holds_for_any_queue(n in 0usize..40) {
        let (mut state, _) = ReviewState::mount();
        state.on_queue(Ok((0..n)
            .map(|i| RawQueueItem {
                id: format!("rev_{i}"),
                text: "generated".into(),
                reason: None,
            })
            .collect()));

        match state.push_all() {
            Some(siftboard::tasks::Job::PushQueue(requests)) => {
                prop_assert_eq!(requests.len(), n);
                state.on_push(siftboard::tasks::PushSummary {
                    attempted: n,
                    items: vec![],
                });
                prop_assert_eq!(state.validated_session, n as u64);
                prop_assert!(state.queue.is_empty());
            }
            Some(_) => prop_assert!(false, "unexpected job kind"),
            None => prop_assert_eq!(n, 0),
        }
    }
}
