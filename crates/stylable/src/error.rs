//! Error types for styled text construction and parsing.

use thiserror::Error;

/// A span list that does not describe its text.
///
/// Returned by [`StyledText::new`](crate::StyledText::new). Builders and
/// parsers in this crate never produce these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpanError {
    /// No spans at all; even empty text carries a terminator.
    #[error("span list is empty")]
    Empty,

    /// A span ends before the span preceding it.
    #[error("span {index} ends at {end}, before the previous end {previous}")]
    Decreasing {
        index: usize,
        end: usize,
        previous: usize,
    },

    /// A span ends past the end of the text.
    #[error("span {index} ends at {end}, past the text length {len}")]
    OutOfBounds { index: usize, end: usize, len: usize },

    /// A span ends in the middle of a UTF-8 sequence.
    #[error("span {index} ends at {end}, inside a character")]
    NotCharBoundary { index: usize, end: usize },

    /// The last span does not reach the end of the text.
    #[error("last span ends at {end}, but the text length is {len}")]
    Unterminated { end: usize, len: usize },
}

/// Errors raised by the composite format parser.
///
/// Positions are byte offsets into the format string. Any error aborts the
/// whole format call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A placeholder that does not follow `{index[,[-]width][:spec]}`.
    #[error("malformed placeholder at {position}: expected {expected}")]
    MalformedPlaceholder {
        position: usize,
        expected: &'static str,
    },

    /// A `}` outside a placeholder that is not part of a `}}` escape.
    #[error("unexpected '}}' at {position}")]
    UnexpectedCloseBrace { position: usize },

    /// A placeholder index with no matching argument.
    #[error("argument index {index} is out of range ({count} arguments)")]
    IndexOutOfRange { index: usize, count: usize },

    /// A format specifier the argument does not understand.
    #[error("invalid format specifier: {spec}")]
    InvalidFormatSpec { spec: String },
}

/// Errors raised by the bracket markup parser.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A region name that is not a known color.
    #[error("unknown color '{name}' at {position}")]
    UnknownColor { name: String, position: usize },

    /// A `[` with no closing `]` (strict parsing only).
    #[error("unclosed tag starting at {position}")]
    UnclosedTag { position: usize },

    /// A region with no `[/]` (strict parsing only).
    #[error("unclosed region starting at {position}")]
    UnclosedRegion { position: usize },
}

/// Errors that can occur when parsing a color name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Unknown color name.
    #[error("unknown color name: {0}")]
    UnknownName(String),
}
