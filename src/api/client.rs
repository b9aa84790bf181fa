//! Blocking HTTP client for the triage backend.

use super::types::{
    AnalyzeRequest, BatchUploadResponse, LatestBatchData, LatestBatchEnvelope, RawQueueItem,
    ReportEnvelope, StatsSummary, SubmissionRecord, ValidateRequest,
};
use crate::error::{MalformedErrorKind, Result, SiftError, TransportErrorKind};
use reqwest::blocking::{multipart, Client, Response};
use std::path::Path;
use std::time::Duration;

/// Backend client configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the analysis backend
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client wrapping the seven backend endpoints.
///
/// Cheap to clone; all methods block and are meant to run on background
/// task threads, never on the UI thread.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

/// Helper to convert reqwest errors to transport errors
fn network_error(context: &str, err: &reqwest::Error) -> SiftError {
    SiftError::network(context, err.to_string())
}

impl BackendClient {
    /// Create a new backend client.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;

        Ok(Self { client, config })
    }

    /// Base URL the client talks to (for the header line).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST /analyze — submit one text for routing and analysis.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<SubmissionRecord> {
        let url = format!("{}/analyze", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| network_error("Failed to send analyze request", &e))?;
        parse_json(response, "analyze response")
    }

    /// GET /batch/latest — most recent processed batch, if any.
    pub fn latest_batch(&self) -> Result<Option<LatestBatchData>> {
        let url = format!("{}/batch/latest", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| network_error("Failed to fetch latest batch", &e))?;
        let envelope: LatestBatchEnvelope = parse_json(response, "latest batch response")?;
        envelope.into_data()
    }

    /// POST /batch/upload — multipart CSV upload, field name `file`.
    pub fn upload_batch(&self, path: &Path) -> Result<BatchUploadResponse> {
        let url = format!("{}/batch/upload", self.config.base_url);
        let bytes = std::fs::read(path).map_err(|e| SiftError::io(path, e))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.csv")
            .to_string();

        let part = multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str("text/csv")
            .map_err(|e| {
                SiftError::transport(
                    "building upload form",
                    TransportErrorKind::Request(e.to_string()),
                )
            })?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| network_error("Failed to upload batch", &e))?;
        parse_json(response, "batch upload response")
    }

    /// GET /annotator/queue — flagged items awaiting human review.
    pub fn review_queue(&self) -> Result<Vec<RawQueueItem>> {
        let url = format!("{}/annotator/queue", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| network_error("Failed to fetch review queue", &e))?;
        parse_json(response, "review queue response")
    }

    /// POST /annotator/validate — push one reviewed item. The backend's
    /// response body is ignored by contract.
    pub fn validate_item(&self, request: &ValidateRequest) -> Result<()> {
        let url = format!("{}/annotator/validate", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| network_error("Failed to send validation", &e))?;
        check_status(&response, "validate response")?;
        Ok(())
    }

    /// GET /stats — aggregate dashboard statistics.
    pub fn stats(&self) -> Result<StatsSummary> {
        let url = format!("{}/stats", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| network_error("Failed to fetch stats", &e))?;
        parse_json(response, "stats response")
    }

    /// GET /generate-report — generated strategy report envelope.
    pub fn generate_report(&self) -> Result<ReportEnvelope> {
        let url = format!("{}/generate-report", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| network_error("Failed to fetch report", &e))?;
        parse_json(response, "report response")
    }
}

/// Reject non-2xx statuses, keeping a body excerpt for diagnostics.
fn check_status(response: &Response, context: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(SiftError::status(context, status.as_u16(), String::new()))
}

/// Check status, then parse the body into the expected wire type.
fn parse_json<T: serde::de::DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(SiftError::status(context, status.as_u16(), body));
    }
    response.json().map_err(|e| {
        SiftError::malformed(context, MalformedErrorKind::InvalidJson(e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_reports_base_url() {
        let client = BackendClient::new(BackendConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_upload_missing_file_is_io_error() {
        let client = BackendClient::new(BackendConfig::default()).unwrap();
        let err = client
            .upload_batch(Path::new("/nonexistent/never.csv"))
            .unwrap_err();
        assert!(matches!(err, SiftError::Io { .. }));
    }
}
