//! Per-tab renderers. Each takes the mounted view state and draws into the
//! content area; layout chrome (tabs, status bar) lives in `ui`.

mod batch;
mod insights;
mod review;
mod submission;

pub use batch::render_batch;
pub use insights::render_insights;
pub use review::render_review;
pub use submission::render_submission;
