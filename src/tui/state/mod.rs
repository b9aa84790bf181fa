//! Per-view state machines.
//!
//! Each tab owns one state struct holding everything the renderer needs.
//! States are plain data plus transition methods: user actions return the
//! [`Job`](crate::tasks::Job)s to dispatch, and completed jobs come back in
//! through `on_*` methods. Nothing in here touches the network or the
//! terminal, which is what keeps these testable without a backend.

mod batch;
mod insights;
mod review;
mod submission;

pub use batch::{BatchRecord, BatchState, CurrentBatch, UploadBanner};
pub use insights::{clean_markup, InsightsState};
pub use review::{FlagPriority, QueueItem, ReviewState, DEFAULT_LABEL, LABEL_CHOICES};
pub use submission::{SubmissionState, HISTORY_DISPLAY_LIMIT};
