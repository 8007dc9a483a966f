//! Task operations: one tracked unit of work and its status.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ProgressError, Result};

/// Where a task operation stands.
///
/// Every status except `InProgress` is terminal: once reached it never changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    InProgress,
    CompletedSuccessfully,
    CompletedWithWarning,
    Skipped,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        self != TaskStatus::InProgress
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::InProgress => "in progress",
            TaskStatus::CompletedSuccessfully => "completed",
            TaskStatus::CompletedWithWarning => "completed with warning",
            TaskStatus::Skipped => "skipped",
            TaskStatus::Failed => "failed",
        })
    }
}

/// Point-in-time copy of an operation, as read by the redraw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationSnapshot {
    pub id: usize,
    pub message: String,
    pub status: TaskStatus,
}

#[derive(Debug)]
struct OperationState {
    message: String,
    status: TaskStatus,
}

/// Handle to one operation inside a [`ProgressSession`](crate::ProgressSession).
///
/// Clones share state, so a handle can move to whichever thread or task does
/// the work while the display keeps reading the same operation.
#[derive(Clone, Debug)]
pub struct TaskOperation {
    id: usize,
    state: Arc<Mutex<OperationState>>,
}

impl TaskOperation {
    pub(crate) fn new(id: usize, message: String) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(OperationState {
                message,
                status: TaskStatus::InProgress,
            })),
        }
    }

    /// Creation order within the session, starting at 0.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn message(&self) -> String {
        self.lock().message.clone()
    }

    pub fn status(&self) -> TaskStatus {
        self.lock().status
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    pub fn snapshot(&self) -> OperationSnapshot {
        let state = self.lock();
        OperationSnapshot {
            id: self.id,
            message: state.message.clone(),
            status: state.status,
        }
    }

    pub fn completed(&self) -> Result<()> {
        self.finish(TaskStatus::CompletedSuccessfully, None)
    }

    pub fn completed_with_warning(&self) -> Result<()> {
        self.finish(TaskStatus::CompletedWithWarning, None)
    }

    pub fn skipped(&self) -> Result<()> {
        self.finish(TaskStatus::Skipped, None)
    }

    /// Mark the operation failed, replacing its message with `error_message`.
    pub fn failed(&self, error_message: impl Into<String>) -> Result<()> {
        self.finish(TaskStatus::Failed, Some(error_message.into()))
    }

    fn finish(&self, status: TaskStatus, message: Option<String>) -> Result<()> {
        let mut state = self.lock();
        if state.status.is_terminal() {
            log::warn!(
                "task operation {} is already {}; ignoring transition to {}",
                self.id,
                state.status,
                status
            );
            return Err(ProgressError::AlreadyFinished {
                id: self.id,
                status: state.status,
            });
        }

        state.status = status;
        if let Some(message) = message {
            state.message = message;
        }
        log::debug!("task operation {} {}", self.id, status);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, OperationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_progress() {
        let op = TaskOperation::new(0, "build".to_string());
        assert_eq!(op.status(), TaskStatus::InProgress);
        assert!(!op.is_finished());
        assert_eq!(op.message(), "build");
    }

    #[test]
    fn each_terminal_transition() {
        let cases: [(fn(&TaskOperation) -> Result<()>, TaskStatus); 3] = [
            (TaskOperation::completed, TaskStatus::CompletedSuccessfully),
            (TaskOperation::completed_with_warning, TaskStatus::CompletedWithWarning),
            (TaskOperation::skipped, TaskStatus::Skipped),
        ];
        for (transition, expected) in cases {
            let op = TaskOperation::new(1, "step".to_string());
            transition(&op).unwrap();
            assert_eq!(op.status(), expected);
            assert_eq!(op.message(), "step");
        }
    }

    #[test]
    fn failure_replaces_message() {
        let op = TaskOperation::new(2, "compile".to_string());
        op.failed("compile: 3 errors").unwrap();
        assert_eq!(
            op.snapshot(),
            OperationSnapshot {
                id: 2,
                message: "compile: 3 errors".to_string(),
                status: TaskStatus::Failed,
            }
        );
    }

    #[test]
    fn terminal_status_is_absorbing() {
        let op = TaskOperation::new(3, "test".to_string());
        op.skipped().unwrap();

        let err = op.failed("late failure").unwrap_err();
        assert!(matches!(
            err,
            ProgressError::AlreadyFinished {
                id: 3,
                status: TaskStatus::Skipped
            }
        ));
        assert!(op.completed().is_err());
        assert_eq!(op.status(), TaskStatus::Skipped);
        assert_eq!(op.message(), "test");
    }

    #[test]
    fn clones_share_state() {
        let op = TaskOperation::new(4, "shared".to_string());
        let worker = op.clone();
        std::thread::spawn(move || worker.completed().unwrap())
            .join()
            .unwrap();
        assert_eq!(op.status(), TaskStatus::CompletedSuccessfully);
    }

    #[test]
    fn status_display() {
        assert_eq!(TaskStatus::CompletedWithWarning.to_string(), "completed with warning");
        assert_eq!(TaskStatus::InProgress.to_string(), "in progress");
    }
}
