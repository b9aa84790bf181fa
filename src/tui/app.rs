//! Application state for the TUI.
//!
//! Exactly one view is mounted at a time. Switching tabs drops the old
//! view's state outright and mounts a fresh one, which re-runs that view's
//! mount fetches and session restore. Every mount bumps a generation
//! counter; background outcomes carry the generation that issued them and
//! anything stale is discarded in [`App::apply`].

use crate::session::SharedStore;
use crate::tasks::{Job, Outcome, TaggedOutcome, TaskRunner};
use crate::tui::state::{BatchState, InsightsState, ReviewState, SubmissionState};

/// The four dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    Submission,
    Batch,
    Review,
    Insights,
}

impl TabKind {
    pub const ALL: [Self; 4] = [Self::Submission, Self::Batch, Self::Review, Self::Insights];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Submission => "Submit",
            Self::Batch => "Batch",
            Self::Review => "Review",
            Self::Insights => "Insights",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Submission => Self::Batch,
            Self::Batch => Self::Review,
            Self::Review => Self::Insights,
            Self::Insights => Self::Submission,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Submission => Self::Insights,
            Self::Batch => Self::Submission,
            Self::Review => Self::Batch,
            Self::Insights => Self::Review,
        }
    }
}

/// The state of whichever view is currently mounted.
pub enum MountedView {
    Submission(SubmissionState),
    Batch(BatchState),
    Review(ReviewState),
    Insights(InsightsState),
}

/// Main application state.
pub struct App {
    pub(crate) active_tab: TabKind,
    pub(crate) view: MountedView,
    /// Bumped on every mount; outcomes from older mounts are dropped.
    generation: u64,
    store: SharedStore,
    runner: TaskRunner,
    pub(crate) should_quit: bool,
    pub(crate) show_help: bool,
}

impl App {
    /// Create the app with the submission tab mounted.
    pub fn new(runner: TaskRunner, store: SharedStore) -> Self {
        let mut app = Self {
            active_tab: TabKind::Submission,
            view: MountedView::Submission(SubmissionState::mount(store.clone())),
            generation: 0,
            store,
            runner,
            should_quit: false,
            show_help: false,
        };
        // Re-mount through the common path so generation 1 is current.
        app.mount(TabKind::Submission);
        app
    }

    /// Switch to `tab`, unmounting the current view. Switching to the
    /// already-active tab remounts it, which doubles as a manual refresh.
    pub fn switch_tab(&mut self, tab: TabKind) {
        self.mount(tab);
    }

    pub fn next_tab(&mut self) {
        self.mount(self.active_tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.mount(self.active_tab.prev());
    }

    fn mount(&mut self, tab: TabKind) {
        self.generation += 1;
        self.active_tab = tab;
        self.view = match tab {
            TabKind::Submission => {
                MountedView::Submission(SubmissionState::mount(self.store.clone()))
            }
            TabKind::Batch => {
                let (state, job) = BatchState::mount();
                self.dispatch(job);
                MountedView::Batch(state)
            }
            TabKind::Review => {
                let (state, job) = ReviewState::mount();
                self.dispatch(job);
                MountedView::Review(state)
            }
            TabKind::Insights => {
                let (state, jobs) = InsightsState::mount(self.store.clone());
                for job in jobs {
                    self.dispatch(job);
                }
                MountedView::Insights(state)
            }
        };
        tracing::debug!("mounted {:?} (generation {})", tab, self.generation);
    }

    /// Dispatch a job under the current mount generation.
    pub fn dispatch(&self, job: Job) {
        self.runner.dispatch(self.generation, job);
    }

    pub fn dispatch_all(&self, jobs: Vec<Job>) {
        for job in jobs {
            self.dispatch(job);
        }
    }

    /// Route a completed background call into the mounted view. Outcomes
    /// from a previous mount are dropped without touching any state.
    pub fn apply(&mut self, tagged: TaggedOutcome) {
        if tagged.generation != self.generation {
            tracing::debug!(
                "dropping stale outcome (generation {} != {})",
                tagged.generation,
                self.generation
            );
            return;
        }
        match (&mut self.view, tagged.outcome) {
            (MountedView::Submission(state), Outcome::Analyze(result)) => {
                state.on_result(result);
            }
            (MountedView::Batch(state), Outcome::LatestBatch(result)) => {
                state.on_latest(result);
            }
            (MountedView::Batch(state), Outcome::Upload(result)) => {
                state.on_upload(result);
            }
            (MountedView::Review(state), Outcome::Queue(result)) => {
                state.on_queue(result);
            }
            (MountedView::Review(state), Outcome::Push(summary)) => {
                state.on_push(summary);
            }
            (MountedView::Insights(state), Outcome::Stats(result)) => {
                state.on_stats(result);
            }
            (MountedView::Insights(state), Outcome::Report(result)) => {
                state.on_report(result);
            }
            // A current-generation outcome always matches the mounted view;
            // this arm is unreachable unless a job was mis-tagged.
            (_, outcome) => {
                tracing::warn!("outcome {outcome:?} does not match mounted view");
            }
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}
