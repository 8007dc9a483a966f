//! Progress sessions: a status line, an optional total and the operations.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::operation::{OperationSnapshot, TaskOperation, TaskStatus};

#[derive(Debug)]
struct Header {
    status_message: String,
    total: Option<usize>,
}

#[derive(Debug)]
struct SessionInner {
    generation: u64,
    header: Mutex<Header>,
    operations: RwLock<Vec<TaskOperation>>,
}

/// The live progress state shown by a [`ProgressLogger`](crate::ProgressLogger).
///
/// Clones are handles to the same session. Operations are append-only: they
/// are never removed or reordered while the session lives.
#[derive(Clone, Debug)]
pub struct ProgressSession {
    inner: Arc<SessionInner>,
}

impl ProgressSession {
    pub(crate) fn new(generation: u64, status_message: String) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                generation,
                header: Mutex::new(Header {
                    status_message,
                    total: None,
                }),
                operations: RwLock::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.inner.generation
    }

    /// Append a new in-progress operation.
    pub fn create_task_operation(&self, message: impl Into<String>) -> TaskOperation {
        let mut operations = self
            .inner
            .operations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let operation = TaskOperation::new(operations.len(), message.into());
        operations.push(operation.clone());
        log::debug!(
            "session {}: created task operation {}",
            self.inner.generation,
            operation.id()
        );
        operation
    }

    pub fn set_status_message(&self, message: impl Into<String>) {
        self.header().status_message = message.into();
    }

    pub fn status_message(&self) -> String {
        self.header().status_message.clone()
    }

    /// Set the expected number of operations. Last write wins.
    ///
    /// Once set, the display adds a progress bar and percentage.
    pub fn set_total_operations(&self, total: usize) {
        self.header().total = Some(total);
    }

    pub fn total_operations(&self) -> Option<usize> {
        self.header().total
    }

    pub fn operation_count(&self) -> usize {
        self.read_operations().len()
    }

    /// Snapshot of every operation, in creation order.
    pub fn operations(&self) -> Vec<OperationSnapshot> {
        self.read_operations()
            .iter()
            .map(TaskOperation::snapshot)
            .collect()
    }

    /// Counts recomputed from the current operation states.
    pub fn summary(&self) -> ProgressSummary {
        self.frame().summary()
    }

    /// Whether both handles refer to the same session.
    pub fn same_session(&self, other: &ProgressSession) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copy out everything a redraw needs.
    ///
    /// The operation list is cloned under the read lock and each operation is
    /// read under its own lock, so a frame never sees a half-built operation.
    pub(crate) fn frame(&self) -> Frame {
        let (status_message, total) = {
            let header = self.header();
            (header.status_message.clone(), header.total)
        };
        let handles = self.read_operations().clone();
        Frame {
            status_message,
            total,
            operations: handles.iter().map(TaskOperation::snapshot).collect(),
        }
    }

    fn header(&self) -> MutexGuard<'_, Header> {
        self.inner
            .header
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn read_operations(&self) -> std::sync::RwLockReadGuard<'_, Vec<TaskOperation>> {
        self.inner
            .operations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// A point-in-time copy of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub status_message: String,
    pub total: Option<usize>,
    pub operations: Vec<OperationSnapshot>,
}

impl Frame {
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::from_statuses(self.operations.iter().map(|op| op.status), self.total)
    }
}

/// Operation counts for the summary line and progress bar.
///
/// `completed` includes operations that completed with a warning; those are
/// also counted in `warnings`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub skipped: usize,
    pub in_progress: usize,
    pub total: Option<usize>,
}

impl ProgressSummary {
    pub fn from_statuses(
        statuses: impl IntoIterator<Item = TaskStatus>,
        total: Option<usize>,
    ) -> Self {
        let mut summary = Self {
            total,
            ..Self::default()
        };
        for status in statuses {
            match status {
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::CompletedSuccessfully => summary.completed += 1,
                TaskStatus::CompletedWithWarning => {
                    summary.completed += 1;
                    summary.warnings += 1;
                }
                TaskStatus::Skipped => summary.skipped += 1,
                TaskStatus::Failed => summary.failed += 1,
            }
        }
        summary
    }

    /// Completed, failed and skipped operations.
    pub fn finished(&self) -> usize {
        self.completed + self.failed + self.skipped
    }

    /// Whole percent finished, rounded down and capped at 100. `None` until a
    /// total is set; a total of zero counts as done.
    pub fn percentage(&self) -> Option<usize> {
        self.scaled(100)
    }

    /// Filled cells of a `width`-cell bar, rounded down.
    pub fn filled_cells(&self, width: usize) -> Option<usize> {
        self.scaled(width)
    }

    /// `finished / total` scaled to `0..=scale`, rounded down.
    fn scaled(&self, scale: usize) -> Option<usize> {
        self.total.map(|total| match total {
            0 => scale,
            total => {
                let finished = self.finished().min(total) as u128;
                // finished <= total, so the quotient never exceeds `scale`.
                (finished * scale as u128 / total as u128) as usize
            }
        })
    }
}
