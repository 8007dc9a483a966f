//! Live progress display for concurrently updated task operations.
//!
//! A [`ProgressLogger`] owns one terminal region. Calling
//! [`get_progress_info`](ProgressLogger::get_progress_info) starts a
//! [`ProgressSession`] (or returns the active one) and a redraw cadence; the
//! caller creates [`TaskOperation`]s and moves them to a terminal status from
//! any thread. Each redraw copies the session first, so it never sees a
//! half-built operation and status changes show up within one interval.
//!
//! Dropping the returned [`ProgressScope`] stops the cadence and draws one
//! final frame.

mod cadence;
pub mod config;
mod engine;
pub mod error;
mod log_init;
pub mod operation;
mod redraw;
pub mod session;
pub mod testing;

pub use config::ProgressConfig;
pub use engine::{ProgressLogger, ProgressScope};
pub use error::{ProgressError, Result};
pub use log_init::init_file_logger;
pub use operation::{OperationSnapshot, TaskOperation, TaskStatus};
pub use session::{ProgressSession, ProgressSummary};
