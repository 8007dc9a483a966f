use thiserror::Error;

use crate::operation::TaskStatus;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Task operation {id} already finished as {status}")]
    AlreadyFinished { id: usize, status: TaskStatus },

    #[error("Could not start the redraw runtime: {0}")]
    RuntimeInit(#[source] std::io::Error),

    #[error("A logger is already installed: {0}")]
    LoggerInstall(#[from] log::SetLoggerError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, ProgressError>;
