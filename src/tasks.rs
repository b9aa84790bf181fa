//! Background request execution for the TUI.
//!
//! The event loop never blocks on the network: every backend call is a
//! [`Job`] dispatched onto its own thread, and its [`Outcome`] comes back
//! over an mpsc channel drained once per tick. Outcomes are tagged with the
//! mount generation of the view that issued them; the app drops anything
//! whose generation is no longer current, so a response landing after its
//! view was unmounted is a no-op instead of a stale update.

use crate::api::{
    AnalyzeRequest, BackendClient, BatchUploadResponse, LatestBatchData, RawQueueItem,
    ReportEnvelope, StatsSummary, SubmissionRecord, ValidateRequest,
};
use crate::error::Result;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Maximum parallel validation requests during a queue push.
const PUSH_CONCURRENCY: usize = 4;

/// A backend call requested by a view.
#[derive(Debug)]
pub enum Job {
    Analyze(AnalyzeRequest),
    FetchLatestBatch,
    UploadBatch(PathBuf),
    FetchQueue,
    PushQueue(Vec<ValidateRequest>),
    FetchStats,
    FetchReport,
}

/// Per-item result of a bulk queue push.
#[derive(Debug, Clone)]
pub struct PushItemOutcome {
    pub id: String,
    pub error: Option<String>,
}

/// Aggregate result of a bulk queue push. Failed items are reported for
/// diagnostics but do not change the push contract: the whole queue counts
/// as attempted.
#[derive(Debug, Clone)]
pub struct PushSummary {
    pub attempted: usize,
    pub items: Vec<PushItemOutcome>,
}

impl PushSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.error.is_some()).count()
    }
}

/// Completed backend call, one variant per [`Job`].
#[derive(Debug)]
pub enum Outcome {
    Analyze(Result<SubmissionRecord>),
    LatestBatch(Result<Option<LatestBatchData>>),
    Upload(Result<BatchUploadResponse>),
    Queue(Result<Vec<RawQueueItem>>),
    Push(PushSummary),
    Stats(Result<StatsSummary>),
    Report(Result<ReportEnvelope>),
}

/// An outcome tagged with the mount generation that issued its job.
#[derive(Debug)]
pub struct TaggedOutcome {
    pub generation: u64,
    pub outcome: Outcome,
}

/// Dispatches jobs onto background threads and funnels their outcomes
/// back to the UI thread.
pub struct TaskRunner {
    client: BackendClient,
    tx: Sender<TaggedOutcome>,
}

impl TaskRunner {
    /// Create a runner and the receiving end the event loop drains.
    pub fn new(client: BackendClient) -> (Self, Receiver<TaggedOutcome>) {
        let (tx, rx) = channel();
        (Self { client, tx }, rx)
    }

    /// Run `job` on a fresh thread. Dispatched jobs are not cancellable;
    /// staleness is handled on the receiving side via `generation`.
    pub fn dispatch(&self, generation: u64, job: Job) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let outcome = run_job(&client, job);
            // Receiver gone means the app is shutting down.
            let _ = tx.send(TaggedOutcome {
                generation,
                outcome,
            });
        });
    }
}

fn run_job(client: &BackendClient, job: Job) -> Outcome {
    match job {
        Job::Analyze(request) => Outcome::Analyze(client.analyze(&request)),
        Job::FetchLatestBatch => Outcome::LatestBatch(client.latest_batch()),
        Job::UploadBatch(path) => Outcome::Upload(client.upload_batch(&path)),
        Job::FetchQueue => Outcome::Queue(client.review_queue()),
        Job::PushQueue(items) => Outcome::Push(push_queue(client, items)),
        Job::FetchStats => Outcome::Stats(client.stats()),
        Job::FetchReport => Outcome::Report(client.generate_report()),
    }
}

/// Bounded fan-out over the validation endpoint. Individual failures are
/// logged and collected; the sweep never aborts early.
fn push_queue(client: &BackendClient, requests: Vec<ValidateRequest>) -> PushSummary {
    let attempted = requests.len();

    let validate = |request: &ValidateRequest| -> PushItemOutcome {
        let error = match client.validate_item(request) {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!("validation failed for {}: {err}", request.id);
                Some(err.to_string())
            }
        };
        PushItemOutcome {
            id: request.id.clone(),
            error,
        }
    };

    let items = match rayon::ThreadPoolBuilder::new()
        .num_threads(PUSH_CONCURRENCY)
        .build()
    {
        Ok(pool) => pool.install(|| {
            use rayon::prelude::*;
            requests.par_iter().map(validate).collect()
        }),
        // No pool, no parallelism: sweep sequentially.
        Err(_) => requests.iter().map(validate).collect(),
    };

    PushSummary { attempted, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BackendConfig;
    use crate::error::SiftError;
    use std::time::Duration;

    fn runner() -> (TaskRunner, Receiver<TaggedOutcome>) {
        let client = BackendClient::new(BackendConfig::default()).unwrap();
        TaskRunner::new(client)
    }

    #[test]
    fn test_upload_of_missing_file_delivers_tagged_outcome() {
        let (runner, rx) = runner();
        runner.dispatch(7, Job::UploadBatch(PathBuf::from("/nonexistent/x.csv")));

        let tagged = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(tagged.generation, 7);
        match tagged.outcome {
            Outcome::Upload(Err(SiftError::Io { .. })) => {}
            other => panic!("expected Io error outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_push_summary_counts_failures() {
        let summary = PushSummary {
            attempted: 3,
            items: vec![
                PushItemOutcome {
                    id: "a".into(),
                    error: None,
                },
                PushItemOutcome {
                    id: "b".into(),
                    error: Some("boom".into()),
                },
                PushItemOutcome {
                    id: "c".into(),
                    error: None,
                },
            ],
        };
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.failed(), 1);
    }
}
