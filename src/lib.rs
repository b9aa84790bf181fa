//! **siftboard: a terminal dashboard for complaint triage.**
//!
//! `siftboard` is a client for a remote complaint-analysis backend. It
//! renders four views over the backend's REST API: single-complaint
//! submission, bulk file upload, the human review queue, and aggregate
//! insights with a generated remediation plan.
//!
//! ## Core modules
//!
//! - **[`api`]**: the HTTP client and the wire types for every endpoint.
//!   All parsing happens here; views only ever see typed data.
//! - **[`session`]**: the session-scoped persistence port. Views mirror
//!   their durable state through a [`session::SessionStore`] so that a tab
//!   switch (which drops the view outright) loses nothing.
//! - **[`tasks`]**: background job execution. The UI thread never blocks
//!   on the network; completed calls come back tagged with the mount
//!   generation that issued them and stale ones are dropped.
//! - **[`tui`]**: the ratatui application itself: per-view state machines
//!   in [`tui::state`], renderers in [`tui::views`], and the event loop.
//! - **[`config`]**: YAML configuration with discovery and CLI merging.
//!
//! ## Example
//!
//! ```no_run
//! use siftboard::api::{BackendClient, BackendConfig};
//!
//! let client = BackendClient::new(BackendConfig::default())?;
//! let queue = client.review_queue()?;
//! println!("{} items waiting for review", queue.len());
//! # Ok::<(), siftboard::error::SiftError>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod tasks;
pub mod tui;

pub use error::{Result, SiftError};
