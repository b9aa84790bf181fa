//! Insights view state: aggregate statistics and the generated strategy
//! report.

use crate::api::{ReportEnvelope, StatsSummary, StrategyReport};
use crate::error::Result;
use crate::session::{keys, load_json, save_json, SharedStore};
use crate::tasks::Job;
use crate::tui::status::StatusMessage;
use regex::Regex;
use std::sync::OnceLock;

/// State for the insights tab.
///
/// Stats and the report refresh independently; each failure mode retains
/// the previous data, so the panel degrades to stale rather than empty.
pub struct InsightsState {
    pub stats: StatsSummary,
    pub report: Option<StrategyReport>,
    pub status: StatusMessage,
    pub plan_scroll: usize,
    /// In-flight fetches from the last refresh.
    pending: u8,
    store: SharedStore,
}

impl InsightsState {
    /// Mount the view. Persisted data is restored first; the fetch cycle
    /// only runs when no usable report was restored.
    pub fn mount(store: SharedStore) -> (Self, Vec<Job>) {
        let stats = load_json(store.as_ref(), keys::STRAT_STATS).unwrap_or_default();
        let report: Option<StrategyReport> = load_json(store.as_ref(), keys::STRAT_REPORT);
        let mut state = Self {
            stats,
            report,
            status: StatusMessage::transient(),
            plan_scroll: 0,
            pending: 0,
            store,
        };
        let jobs = if state.report.as_ref().is_some_and(StrategyReport::has_issues) {
            Vec::new()
        } else {
            state.refresh()
        };
        (state, jobs)
    }

    /// Kick off a full refresh of stats and report.
    pub fn refresh(&mut self) -> Vec<Job> {
        self.pending = 2;
        vec![Job::FetchStats, Job::FetchReport]
    }

    #[must_use]
    pub const fn loading(&self) -> bool {
        self.pending > 0
    }

    /// Apply a completed stats fetch. Failures retain the previous stats
    /// without any user-facing status.
    pub fn on_stats(&mut self, outcome: Result<StatsSummary>) {
        self.pending = self.pending.saturating_sub(1);
        match outcome {
            Ok(stats) => {
                self.stats = stats;
                save_json(self.store.as_ref(), keys::STRAT_STATS, &self.stats);
            }
            Err(err) => {
                tracing::warn!("stats fetch failed: {err}");
            }
        }
    }

    /// Apply a completed report fetch.
    ///
    /// Only a report with actual issues replaces the current one; a busy
    /// generator (no report, or one without issues) retains the previous
    /// report and says so. Transport failures retain too.
    pub fn on_report(&mut self, outcome: Result<ReportEnvelope>) {
        self.pending = self.pending.saturating_sub(1);
        match outcome {
            Ok(envelope) => match envelope.report.filter(StrategyReport::has_issues) {
                Some(report) => {
                    self.report = Some(report);
                    save_json(self.store.as_ref(), keys::STRAT_REPORT, &self.report);
                    self.plan_scroll = 0;
                    self.status.set("Updated");
                }
                None => {
                    self.status.set("AI Busy - Retaining Data");
                }
            },
            Err(err) => {
                tracing::warn!("report fetch failed: {err}");
                self.status.set("Connection Failed");
            }
        }
    }

    /// Total mentions across the report's top issues, zero without a
    /// report.
    #[must_use]
    pub fn issue_mentions(&self) -> u64 {
        self.report
            .as_ref()
            .map_or(0, |r| r.top_issues.iter().map(|i| i.count).sum())
    }

    /// Remediation plan with markup stripped, ready to render as plain
    /// lines.
    #[must_use]
    pub fn plan_text(&self) -> Option<String> {
        self.report
            .as_ref()
            .map(|r| clean_markup(&r.remediation_plan))
    }

    pub fn scroll_plan_down(&mut self) {
        self.plan_scroll = self.plan_scroll.saturating_add(1);
    }

    pub fn scroll_plan_up(&mut self) {
        self.plan_scroll = self.plan_scroll.saturating_sub(1);
    }
}

/// Strip the markdown the report generator tends to emit: bold markers and
/// heading hashes are dropped, leading list dashes become bullets.
#[must_use]
pub fn clean_markup(text: &str) -> String {
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    let markup = MARKUP.get_or_init(|| Regex::new(r"\*\*|### ?").expect("static regex"));

    let stripped = markup.replace_all(text, "");
    let mut out = stripped
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed.strip_prefix("- ") {
                Some(rest) => {
                    let indent = &line[..line.len() - trimmed.len()];
                    format!("{indent}\u{2022} {rest}")
                }
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    if stripped.ends_with('\n') {
        out.push('\n');
    }
    out
}
