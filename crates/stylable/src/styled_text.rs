//! StyledText: text plus the ordered spans that color it.

use std::fmt;

use crate::color::Color;
use crate::error::SpanError;
use crate::span::StyleSpan;

/// Text together with a boundary-complete list of color spans.
///
/// The spans are ordered by non-decreasing end offset, each end falls on a
/// character boundary, and the last span ends exactly at the text length.
/// The list is never empty: empty text carries the single span `(0, Default)`.
///
/// Values are immutable once built. Two values are equal when their text and
/// span lists are equal.
///
/// # Examples
///
/// ```
/// use stylable::{Color, StyleSpan, StyledText};
///
/// let text = StyledText::new(
///     "AB",
///     vec![StyleSpan::new(1, Color::Red), StyleSpan::new(2, Color::Default)],
/// )
/// .unwrap();
/// let runs: Vec<_> = text.segments().collect();
/// assert_eq!(runs, vec![("A", Color::Red), ("B", Color::Default)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledText {
    text: String,
    spans: Vec<StyleSpan>,
}

impl StyledText {
    /// Build a styled text, checking the span invariants.
    pub fn new(text: impl Into<String>, spans: Vec<StyleSpan>) -> Result<Self, SpanError> {
        let text = text.into();
        validate(&text, &spans)?;
        Ok(Self { text, spans })
    }

    /// Uncolored text: one `Default` span covering everything.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let spans = vec![StyleSpan::new(text.len(), Color::Default)];
        Self { text, spans }
    }

    /// Constructor for producers that maintain the invariants themselves.
    pub(crate) fn from_recorded(text: String, spans: Vec<StyleSpan>) -> Self {
        debug_assert_eq!(validate(&text, &spans), Ok(()), "recorder broke span invariants");
        Self { text, spans }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterate over `(slice, color)` pairs, one per span.
    ///
    /// Concatenating the slices reproduces [`text`](Self::text) exactly.
    /// Zero-width spans yield empty slices.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            styled: self,
            index: 0,
            cursor: 0,
        }
    }

    pub fn into_parts(self) -> (String, Vec<StyleSpan>) {
        (self.text, self.spans)
    }
}

impl Default for StyledText {
    fn default() -> Self {
        Self::plain(String::new())
    }
}

/// Writes the text without any color information.
impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn validate(text: &str, spans: &[StyleSpan]) -> Result<(), SpanError> {
    let Some(last) = spans.last() else {
        return Err(SpanError::Empty);
    };

    let mut previous = 0;
    for (index, span) in spans.iter().enumerate() {
        if span.end < previous {
            return Err(SpanError::Decreasing {
                index,
                end: span.end,
                previous,
            });
        }
        if span.end > text.len() {
            return Err(SpanError::OutOfBounds {
                index,
                end: span.end,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(span.end) {
            return Err(SpanError::NotCharBoundary {
                index,
                end: span.end,
            });
        }
        previous = span.end;
    }

    if last.end != text.len() {
        return Err(SpanError::Unterminated {
            end: last.end,
            len: text.len(),
        });
    }
    Ok(())
}

/// Iterator over the colored runs of a [`StyledText`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    styled: &'a StyledText,
    index: usize,
    cursor: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = (&'a str, Color);

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.styled.spans.get(self.index)?;
        self.index += 1;

        let start = self.cursor;
        self.cursor = span.end.max(start);
        Some((&self.styled.text[start..self.cursor], span.color))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.styled.spans.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}
