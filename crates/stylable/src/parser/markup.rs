//! Bracket markup parser.
//!
//! Combines the lexer with the span recorder to produce [`StyledText`].

use crate::builder::SpanRecorder;
use crate::color::Color;
use crate::error::MarkupError;
use crate::styled_text::StyledText;

use super::lexer::{Lexer, Token, Unterminated};

/// What to do when the input ends inside a tag or region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OnUnterminated {
    Truncate,
    Fail,
}

/// Parse `[color]content[/]` markup.
///
/// Color names match case-insensitively. Text outside regions passes through
/// unchanged. An unclosed `[` or region ends the output at that point.
///
/// # Examples
///
/// ```
/// use stylable::parser::parse_markup;
/// use stylable::{Color, StyleSpan};
///
/// let text = parse_markup("[red]A[/]B").unwrap();
/// assert_eq!(text.text(), "AB");
/// assert_eq!(
///     text.spans(),
///     &[StyleSpan::new(1, Color::Red), StyleSpan::new(2, Color::Default)]
/// );
/// ```
pub fn parse_markup(input: &str) -> Result<StyledText, MarkupError> {
    parse(input, OnUnterminated::Truncate)
}

/// Like [`parse_markup`], but an unclosed `[` or region is an error.
pub fn parse_markup_strict(input: &str) -> Result<StyledText, MarkupError> {
    parse(input, OnUnterminated::Fail)
}

fn parse(input: &str, policy: OnUnterminated) -> Result<StyledText, MarkupError> {
    let mut out = SpanRecorder::with_capacity(input.len());

    for token in Lexer::new(input) {
        match token {
            Token::Text(text) => out.push_str(text),
            Token::Region {
                name,
                content,
                position,
            } => {
                let color = Color::parse(name).map_err(|_| MarkupError::UnknownColor {
                    name: name.to_string(),
                    position,
                })?;
                out.mark(Color::Default);
                out.push_str(content);
                if color != Color::Default {
                    out.mark(color);
                }
            }
            Token::Unterminated(open) => match policy {
                OnUnterminated::Fail => return Err(open.into()),
                OnUnterminated::Truncate => {
                    log::debug!("markup truncated: {open:?} in {input:?}");
                }
            },
        }
    }

    Ok(out.finish())
}

impl From<Unterminated> for MarkupError {
    fn from(open: Unterminated) -> Self {
        match open {
            Unterminated::Tag { position } => MarkupError::UnclosedTag { position },
            Unterminated::Region { position } => MarkupError::UnclosedRegion { position },
        }
    }
}
