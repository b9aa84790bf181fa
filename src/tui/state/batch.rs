//! Batch view state: file selection, upload, preview table, and the
//! derived metrics panel.

use crate::api::{BatchInsights, BatchUploadResponse, LatestBatchData, PreviewRow};
use crate::error::Result;
use crate::tasks::Job;
use std::path::PathBuf;

/// A row in the batch run list. Seeded demo rows and rehydrated server
/// batches share this shape, so ids are plain strings.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub id: String,
    pub filename: String,
    pub status: String,
    pub items: u64,
    pub processed: u64,
}

/// Preview rows of the most recent batch plus the filename they came from.
#[derive(Debug, Clone)]
pub struct CurrentBatch {
    pub filename: String,
    pub preview: Vec<PreviewRow>,
}

/// Outcome banner shown after an upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadBanner {
    Success(String),
    Error(String),
}

/// State for the batch tab.
pub struct BatchState {
    /// Newest-first run list, seeded with demo rows on mount.
    pub records: Vec<BatchRecord>,
    pub current: Option<CurrentBatch>,
    pub insights: Option<BatchInsights>,
    pub selected_file: Option<PathBuf>,
    /// Path entry line for picking a file.
    pub path_input: String,
    pub editing_path: bool,
    pub processing: bool,
    pub banner: Option<UploadBanner>,
    pub show_history: bool,
    /// Scroll offset into the preview table.
    pub table_offset: usize,
}

impl BatchState {
    /// Mount the view with seeded records and kick off rehydration of the
    /// latest server-side batch.
    pub fn mount() -> (Self, Job) {
        let state = Self {
            records: seed_records(),
            current: None,
            insights: None,
            selected_file: None,
            path_input: String::new(),
            editing_path: false,
            processing: false,
            banner: None,
            show_history: false,
            table_offset: 0,
        };
        (state, Job::FetchLatestBatch)
    }

    /// Select a file for upload. Clears any previous outcome so the view
    /// returns to its pre-analysis appearance.
    pub fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        self.banner = None;
        self.current = None;
        self.insights = None;
        self.table_offset = 0;
    }

    pub fn clear_selection(&mut self) {
        self.selected_file = None;
    }

    /// Begin the upload. No-op without a selected file.
    pub fn start_analysis(&mut self) -> Option<Job> {
        let path = self.selected_file.clone()?;
        self.processing = true;
        Some(Job::UploadBatch(path))
    }

    /// Apply a completed upload.
    ///
    /// Success prepends the new run, installs its preview and insights, and
    /// clears the selection; failure keeps the selection so the user can
    /// retry without re-picking the file.
    pub fn on_upload(&mut self, outcome: Result<BatchUploadResponse>) {
        self.processing = false;
        match outcome {
            Ok(resp) => {
                self.banner = Some(UploadBanner::Success(format!(
                    "Successfully processed {} records from {}",
                    resp.items, resp.filename
                )));
                self.current = Some(CurrentBatch {
                    filename: resp.filename.clone(),
                    preview: resp.preview,
                });
                self.insights = resp.insights;
                self.records.insert(
                    0,
                    BatchRecord {
                        id: resp.id,
                        filename: resp.filename,
                        status: resp.status,
                        items: resp.items,
                        processed: resp.processed,
                    },
                );
                self.selected_file = None;
                self.table_offset = 0;
            }
            Err(err) => {
                tracing::warn!("batch upload failed: {err}");
                self.banner = Some(UploadBanner::Error(format!("Error: {err}")));
            }
        }
    }

    /// Apply the rehydration fetch issued at mount. `Ok(None)` means the
    /// backend has no batch yet and the view keeps its empty state.
    pub fn on_latest(&mut self, outcome: Result<Option<LatestBatchData>>) {
        match outcome {
            Ok(Some(data)) => {
                self.current = Some(CurrentBatch {
                    filename: data.filename.clone(),
                    preview: data.preview,
                });
                self.insights = data.insights;
                // Server-side batches carry no id; synthesize one locally.
                self.records.insert(
                    0,
                    BatchRecord {
                        id: chrono::Utc::now().timestamp_millis().to_string(),
                        filename: data.filename,
                        status: data.status,
                        items: data.items,
                        processed: data.processed,
                    },
                );
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!("latest batch fetch failed: {err}");
            }
        }
    }

    /// Sum of processed counts across all listed runs.
    #[must_use]
    pub fn total_processed(&self) -> u64 {
        self.records.iter().map(|r| r.processed).sum()
    }

    /// Share of the latest batch that was auto-resolved, as a one-decimal
    /// percentage string. "0.0" when there is nothing to divide. The value
    /// is reported as-is, even above 100 when the backend's counters
    /// disagree; only the gauge is clamped.
    #[must_use]
    pub fn resolution_rate(&self) -> String {
        format!("{:.1}", self.resolution_percent())
    }

    /// Same value as a ratio clamped to 0.0..=1.0 for the gauge widget.
    #[must_use]
    pub fn resolution_ratio(&self) -> f64 {
        (self.resolution_percent() / 100.0).min(1.0)
    }

    fn resolution_percent(&self) -> f64 {
        let Some(insights) = &self.insights else {
            return 0.0;
        };
        let Some(latest) = self.records.first() else {
            return 0.0;
        };
        if latest.processed == 0 {
            return 0.0;
        }
        insights.auto_resolved as f64 / latest.processed as f64 * 100.0
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn scroll_preview_down(&mut self) {
        let rows = self.current.as_ref().map_or(0, |c| c.preview.len());
        if self.table_offset + 1 < rows {
            self.table_offset += 1;
        }
    }

    pub fn scroll_preview_up(&mut self) {
        self.table_offset = self.table_offset.saturating_sub(1);
    }
}

/// Demo rows shown before any real batch has run.
fn seed_records() -> Vec<BatchRecord> {
    vec![
        BatchRecord {
            id: "1".into(),
            filename: "customer_feedback_q4.csv".into(),
            status: "completed".into(),
            items: 1240,
            processed: 1240,
        },
        BatchRecord {
            id: "2".into(),
            filename: "survey_responses_2024.json".into(),
            status: "processing".into(),
            items: 856,
            processed: 573,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiftError;

    fn insights(auto_resolved: u64) -> BatchInsights {
        BatchInsights {
            auto_resolved,
            critical: 2,
            negative: 5,
            preview_rows: 10,
            row_errors: 0,
            precision: Some(0.97),
        }
    }

    fn upload_response(items: u64, processed: u64) -> BatchUploadResponse {
        serde_json::from_value(serde_json::json!({
            "id": 99,
            "filename": "complaints.csv",
            "status": "completed",
            "items": items,
            "processed": processed,
            "preview": [],
            "insights": {
                "auto_resolved": 40,
                "critical": 1,
                "negative": 3,
                "preview_rows": 10,
                "row_errors": 0
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_mount_seeds_demo_records() {
        let (state, job) = BatchState::mount();
        assert!(matches!(job, Job::FetchLatestBatch));
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.records[0].filename, "customer_feedback_q4.csv");
        assert_eq!(state.total_processed(), 1240 + 573);
    }

    #[test]
    fn test_start_analysis_requires_selection() {
        let (mut state, _) = BatchState::mount();
        assert!(state.start_analysis().is_none());
        assert!(!state.processing);

        state.select_file(PathBuf::from("data.csv"));
        assert!(matches!(state.start_analysis(), Some(Job::UploadBatch(_))));
        assert!(state.processing);
    }

    #[test]
    fn test_selecting_file_clears_previous_outcome() {
        let (mut state, _) = BatchState::mount();
        state.insights = Some(insights(10));
        state.banner = Some(UploadBanner::Success("old".into()));
        state.current = Some(CurrentBatch {
            filename: "old.csv".into(),
            preview: vec![],
        });

        state.select_file(PathBuf::from("new.csv"));
        assert!(state.insights.is_none());
        assert!(state.banner.is_none());
        assert!(state.current.is_none());
    }

    #[test]
    fn test_upload_success_prepends_and_clears_selection() {
        let (mut state, _) = BatchState::mount();
        state.select_file(PathBuf::from("complaints.csv"));
        let _ = state.start_analysis();

        state.on_upload(Ok(upload_response(50, 50)));
        assert!(!state.processing);
        assert!(state.selected_file.is_none());
        assert_eq!(state.records.len(), 3);
        assert_eq!(state.records[0].id, "99");
        assert_eq!(
            state.banner,
            Some(UploadBanner::Success(
                "Successfully processed 50 records from complaints.csv".into()
            ))
        );
    }

    #[test]
    fn test_upload_failure_keeps_selection() {
        let (mut state, _) = BatchState::mount();
        state.select_file(PathBuf::from("complaints.csv"));
        let _ = state.start_analysis();

        state.on_upload(Err(SiftError::network("batch upload", "refused")));
        assert!(!state.processing);
        assert_eq!(state.selected_file, Some(PathBuf::from("complaints.csv")));
        assert!(matches!(state.banner, Some(UploadBanner::Error(ref m)) if m.starts_with("Error: ")));
        assert_eq!(state.records.len(), 2);
    }

    #[test]
    fn test_rehydration_installs_latest_batch() {
        let (mut state, _) = BatchState::mount();
        let data: LatestBatchData = serde_json::from_value(serde_json::json!({
            "filename": "overnight.csv",
            "status": "completed",
            "items": 100,
            "processed": 100,
            "preview": [],
            "insights": {
                "auto_resolved": 60,
                "critical": 4,
                "negative": 20,
                "preview_rows": 10,
                "row_errors": 0
            }
        }))
        .unwrap();

        state.on_latest(Ok(Some(data)));
        assert_eq!(state.records.len(), 3);
        assert_eq!(state.records[0].filename, "overnight.csv");
        // Synthesized id is a millisecond timestamp, not a small seed id.
        assert!(state.records[0].id.len() > 2);
        assert_eq!(state.resolution_rate(), "60.0");
    }

    #[test]
    fn test_rehydration_absent_keeps_empty_state() {
        let (mut state, _) = BatchState::mount();
        state.on_latest(Ok(None));
        assert_eq!(state.records.len(), 2);
        assert!(state.current.is_none());
    }

    #[test]
    fn test_resolution_rate_zero_without_insights() {
        let (state, _) = BatchState::mount();
        assert_eq!(state.resolution_rate(), "0.0");
        assert_eq!(state.resolution_ratio(), 0.0);
    }

    #[test]
    fn test_resolution_rate_zero_processed_does_not_divide() {
        let (mut state, _) = BatchState::mount();
        state.insights = Some(insights(10));
        state.records.insert(
            0,
            BatchRecord {
                id: "x".into(),
                filename: "empty.csv".into(),
                status: "completed".into(),
                items: 0,
                processed: 0,
            },
        );
        assert_eq!(state.resolution_rate(), "0.0");
    }

    #[test]
    fn test_resolution_rate_reports_raw_percentage_gauge_clamps() {
        let (mut state, _) = BatchState::mount();
        state.insights = Some(insights(500));
        state.records.insert(
            0,
            BatchRecord {
                id: "x".into(),
                filename: "odd.csv".into(),
                status: "completed".into(),
                items: 100,
                processed: 100,
            },
        );
        // Inconsistent backend counters show through in the text; only the
        // gauge width is capped.
        assert_eq!(state.resolution_rate(), "500.0");
        assert_eq!(state.resolution_ratio(), 1.0);
    }
}
