//! Style span: the color of one run of text.

use crate::color::Color;

/// The color of the text between the previous span's end (or 0) and `end`.
///
/// Offsets are byte positions in the UTF-8 text of a
/// [`StyledText`](crate::StyledText).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleSpan {
    /// End byte offset (exclusive).
    pub end: usize,
    /// Color applied to the run ending here.
    pub color: Color,
}

impl StyleSpan {
    pub const fn new(end: usize, color: Color) -> Self {
        Self { end, color }
    }
}

impl From<(usize, Color)> for StyleSpan {
    fn from((end, color): (usize, Color)) -> Self {
        Self::new(end, color)
    }
}
