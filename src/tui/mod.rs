//! Terminal dashboard for the complaint triage backend.
//!
//! Four tabs over one remote backend: single submission, batch upload,
//! human review, and aggregate insights. One view is mounted at a time;
//! everything a view needs to survive a tab switch goes through the
//! session store.

pub mod app;
pub mod events;
pub mod state;
pub mod status;
pub mod theme;
pub mod ui;
pub mod views;
pub mod widgets;

pub use app::{App, MountedView, TabKind};
pub use status::StatusMessage;
pub use theme::{colors, set_theme, toggle_theme, Theme};
pub use ui::run_tui;
