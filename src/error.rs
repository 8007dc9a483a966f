use stylable::{FormatError, MarkupError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Markup error: {0}")]
    Markup(#[from] MarkupError),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
