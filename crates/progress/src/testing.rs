//! Test utilities for capturing progress output.
//!
//! # Example
//!
//! ```
//! use stylable_progress::testing::SharedBuffer;
//! use stylable_progress::{ProgressConfig, ProgressLogger};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), stylable_progress::ProgressError> {
//! let buffer = SharedBuffer::new();
//! let logger = ProgressLogger::new(buffer.clone(), ProgressConfig::default())?;
//! {
//!     let progress = logger.get_progress_info("Working");
//!     progress.create_task_operation("step").completed()?;
//! }
//! assert!(buffer.contents_lossy().contains("Working"));
//! # Ok(())
//! # }
//! ```

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A cloneable in-memory writer. Clones share one buffer, so a test can keep a
/// handle while the engine owns another.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    pub fn contents_lossy(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return everything written so far.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
