//! Span recording shared by every producer of [`StyledText`].
//!
//! [`SpanRecorder`] owns the single "append text, then record a color
//! boundary" step. The fluent [`TextBuilder`], the [`Interpolation`] builder
//! behind `styled!`, the composite format parser and the markup parser all
//! feed it, so equivalent input yields identical span lists whichever
//! front-end produced it.
//!
//! Boundaries are kept in canonical form:
//!
//! - a boundary that covers no text since the previous one is dropped;
//! - a boundary with the previous boundary's color extends it;
//! - [`SpanRecorder::finish`] extends a trailing `Default` span to the end of
//!   the text, or appends the `(len, Default)` terminator.

use std::fmt::{self, Write as _};

use crate::arg::{Culture, FormatArg};
use crate::color::Color;
use crate::span::StyleSpan;
use crate::styled_text::StyledText;

/// Accumulates text and color boundaries.
#[derive(Clone, Debug, Default)]
pub struct SpanRecorder {
    text: String,
    spans: Vec<StyleSpan>,
}

impl SpanRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            spans: Vec::new(),
        }
    }

    /// Current text length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append text without recording a boundary. It takes the color of the
    /// next boundary recorded.
    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Record that the text since the previous boundary has `color`.
    pub fn mark(&mut self, color: Color) {
        let end = self.text.len();
        let previous_end = self.spans.last().map_or(0, |span| span.end);
        if end == previous_end {
            return;
        }

        match self.spans.last_mut() {
            Some(last) if last.color == color => last.end = end,
            _ => self.spans.push(StyleSpan::new(end, color)),
        }
    }

    /// Append text and record it with `color`.
    pub fn append(&mut self, s: &str, color: Color) {
        self.push_str(s);
        self.mark(color);
    }

    /// Close the span list with the `Default` terminator.
    pub fn finish(mut self) -> StyledText {
        let len = self.text.len();
        match self.spans.last_mut() {
            Some(last) if last.color == Color::Default => last.end = len,
            _ => self.spans.push(StyleSpan::new(len, Color::Default)),
        }
        StyledText::from_recorded(self.text, self.spans)
    }
}

impl fmt::Write for SpanRecorder {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// Fluent builder: append content piece by piece.
///
/// # Examples
///
/// ```
/// use stylable::{Color, TextBuilder};
///
/// let mut builder = TextBuilder::new();
/// builder.append("status: ").append_colored("ok", Color::Green);
/// let text = builder.build();
/// assert_eq!(text.text(), "status: ok");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextBuilder {
    recorder: SpanRecorder,
}

impl TextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `content` in the default color.
    pub fn append(&mut self, content: impl fmt::Display) -> &mut Self {
        self.append_colored(content, Color::Default)
    }

    /// Append `content` in `color`.
    ///
    /// If `content`'s `Display` impl fails, whatever it wrote is discarded and
    /// nothing is appended.
    pub fn append_colored(&mut self, content: impl fmt::Display, color: Color) -> &mut Self {
        let start = self.recorder.len();
        if write!(self.recorder, "{content}").is_err() {
            let dropped = self.recorder.len() - start;
            log::warn!("Display impl failed; dropping {dropped} partial bytes");
            self.recorder.text.truncate(start);
            return self;
        }
        self.recorder.mark(color);
        self
    }

    pub fn len(&self) -> usize {
        self.recorder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorder.is_empty()
    }

    pub fn build(self) -> StyledText {
        self.recorder.finish()
    }
}

/// Interpolation builder: literal chunks and values, in source order.
///
/// Literals render in the default color; values render in their own
/// [`FormatArg::color`] or the default. This is what `styled!` expands to.
///
/// ```
/// use stylable::{Color, Interpolation, WithColor};
///
/// let mut text = Interpolation::with_capacity(7, 1);
/// text.literal("Hello, ").value(&"world".with_color(Color::Blue));
/// assert_eq!(text.finish().text(), "Hello, world");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Interpolation {
    recorder: SpanRecorder,
    scratch: String,
}

impl Interpolation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `literal_len` bytes of literal text plus
    /// `value_count` values.
    pub fn with_capacity(literal_len: usize, value_count: usize) -> Self {
        Self {
            recorder: SpanRecorder::with_capacity(literal_len + value_count * 8),
            scratch: String::new(),
        }
    }

    pub fn literal(&mut self, s: &str) -> &mut Self {
        self.recorder.append(s, Color::Default);
        self
    }

    pub fn value<T: FormatArg + ?Sized>(&mut self, value: &T) -> &mut Self {
        self.scratch.clear();
        value.write_plain(&mut self.scratch);
        self.recorder.append(&self.scratch, value.color().unwrap_or_default());
        self
    }

    /// Like [`value`](Self::value), formatting with a specifier.
    ///
    /// Specifiers the value does not understand render it plainly.
    pub fn value_with_spec<T: FormatArg + ?Sized>(
        &mut self,
        value: &T,
        spec: &str,
        culture: &Culture,
    ) -> &mut Self {
        self.scratch.clear();
        if value.write_formatted(spec, culture, &mut self.scratch).is_err() {
            log::debug!("format specifier {spec:?} rejected; using plain conversion");
            self.scratch.clear();
            value.write_plain(&mut self.scratch);
        }
        self.recorder.append(&self.scratch, value.color().unwrap_or_default());
        self
    }

    pub fn finish(self) -> StyledText {
        self.recorder.finish()
    }
}
