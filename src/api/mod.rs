//! HTTP boundary to the remote analysis backend.
//!
//! The dashboard performs no analysis itself; everything flows through the
//! endpoints wrapped here. [`client`] owns transport, [`types`] owns the
//! wire schemas and boundary validation.

pub mod client;
pub mod types;

pub use client::{BackendClient, BackendConfig};
pub use types::{
    Analysis, AnalyzeRequest, Aspect, BatchInsights, BatchUploadResponse, Decision,
    LatestBatchData, LatestBatchEnvelope, PreviewRow, RawQueueItem, ReportEnvelope, Routing,
    StatsSummary, StrategyReport, SubmissionRecord, TopIssue, ValidateRequest,
};
