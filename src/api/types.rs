//! Wire types for the triage backend API.
//!
//! One request/response pair per endpoint, matching the backend's JSON
//! contract field for field. Everything crossing the HTTP boundary is parsed
//! into these types; anything that fails to parse surfaces as
//! [`SiftError::Malformed`](crate::error::SiftError) at the call site
//! instead of leaking dynamic shapes into the views.

use crate::error::{Result, SiftError};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// POST /analyze
// ============================================================================

/// Request body for a single text submission.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub id: String,
    pub text: String,
}

/// Backend routing classification for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Simple,
    Complex,
    #[serde(rename = "Review_Queue")]
    ReviewQueue,
}

impl Decision {
    /// Human-readable label used by the submission view.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple (Handled by CPU)",
            Self::ReviewQueue => "Flagged for Human Review",
            Self::Complex => "Complex (Deep LLM Analysis)",
        }
    }

    /// Short badge text for history rows.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Complex => "Complex",
            Self::ReviewQueue => "Flagged",
        }
    }
}

/// Routing block of an analyze response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routing {
    pub decision: Decision,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

/// A sub-topic of a complaint with its own sentiment.
///
/// Severity is absent for simple routings, so it stays optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aspect {
    pub aspect: String,
    pub sentiment: String,
    #[serde(default)]
    pub severity: Option<String>,
}

/// Deep-analysis block; `null` on the wire when the backend skipped it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    #[serde(default)]
    pub aspects: Vec<Aspect>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Full analyze response; immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub text: String,
    pub routing: Routing,
    #[serde(default)]
    pub analysis: Option<Analysis>,
    pub status: String,
}

// ============================================================================
// GET /batch/latest and POST /batch/upload
// ============================================================================

/// One preview table row produced by batch processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRow {
    pub id: String,
    pub text: String,
    pub sentiment: String,
    pub sentiment_score: u32,
    pub tag: String,
    pub action: String,
}

/// Aggregate counters for the most recent batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInsights {
    pub auto_resolved: u64,
    pub critical: u64,
    pub negative: u64,
    pub preview_rows: u64,
    pub row_errors: u64,
    /// Absent on batches produced before precision tracking existed.
    #[serde(default)]
    pub precision: Option<f64>,
}

/// Response to a batch upload. The backend sends `id` as a bare integer;
/// rehydrated records use a client timestamp, so ids are normalized to
/// strings at this boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchUploadResponse {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub filename: String,
    pub status: String,
    pub items: u64,
    pub processed: u64,
    pub preview: Vec<PreviewRow>,
    #[serde(default)]
    pub insights: Option<BatchInsights>,
}

/// Payload under `data` in the latest-batch envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestBatchData {
    pub filename: String,
    pub status: String,
    pub items: u64,
    pub processed: u64,
    pub preview: Vec<PreviewRow>,
    #[serde(default)]
    pub insights: Option<BatchInsights>,
}

/// Envelope for GET /batch/latest.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestBatchEnvelope {
    pub exists: bool,
    #[serde(default)]
    pub data: Option<LatestBatchData>,
}

impl LatestBatchEnvelope {
    /// Unwrap the envelope: `Ok(None)` when no batch exists, `Err` when the
    /// backend claims one exists but omitted the payload.
    pub fn into_data(self) -> Result<Option<LatestBatchData>> {
        if !self.exists {
            return Ok(None);
        }
        match self.data {
            Some(data) => Ok(Some(data)),
            None => Err(SiftError::missing_field("data", "latest batch envelope")),
        }
    }
}

// ============================================================================
// GET /annotator/queue and POST /annotator/validate
// ============================================================================

/// Raw queue entry as the backend sends it; flag derivation happens
/// client-side in the review view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawQueueItem {
    pub id: String,
    pub text: String,
    /// May be null for rows written before reasons were recorded.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request body for validating one reviewed item.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateRequest {
    pub id: String,
    pub text: String,
    pub corrected_label: String,
    pub remark: String,
}

// ============================================================================
// GET /stats and GET /generate-report
// ============================================================================

/// Aggregate statistics summary. Defaults are the zeroed pre-fetch state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSummary {
    pub total_processed: u64,
    pub human_review_count: u64,
    pub auto_resolved: u64,
    pub critical_count: u64,
    pub growth_rate: String,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total_processed: 0,
            human_review_count: 0,
            auto_resolved: 0,
            critical_count: 0,
            growth_rate: "...".to_string(),
        }
    }
}

/// One aggregated issue in the strategy report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopIssue {
    pub issue: String,
    pub count: u64,
    pub severity: String,
}

/// Generated remediation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    #[serde(default)]
    pub top_issues: Vec<TopIssue>,
    #[serde(default)]
    pub remediation_plan: String,
}

impl StrategyReport {
    /// A report is usable only when the backend produced actual issues;
    /// an empty list means the generator was busy and the previous report
    /// should be retained.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.top_issues.is_empty()
    }
}

/// Envelope for GET /generate-report; `report` is absent while the
/// generator is busy.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportEnvelope {
    #[serde(default)]
    pub report: Option<StrategyReport>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Accept a JSON number or string and normalize to `String`.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(i64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}
