//! Renderer: replays color spans as ANSI control sequences.
//!
//! Each span's slice is preceded by its color's sequence. No trailing reset is
//! written beyond what a final `Default` span provides.

use std::io::{self, Write};

use crate::styled_text::StyledText;

/// Write `styled` as colored output, without a line terminator.
///
/// Slices are clamped to the text length.
///
/// # Examples
///
/// ```
/// use stylable::{write_styled, parser::parse_markup};
///
/// let mut out = Vec::new();
/// write_styled(&mut out, &parse_markup("[red]A[/]B").unwrap()).unwrap();
/// assert_eq!(out, b"\x1b[31mA\x1b[39mB");
/// ```
pub fn write_styled<W: Write + ?Sized>(out: &mut W, styled: &StyledText) -> io::Result<()> {
    let text = styled.text();
    let mut cursor = 0;
    for span in styled.spans() {
        let end = span.end.min(text.len()).max(cursor);
        out.write_all(span.color.ansi_code().as_bytes())?;
        out.write_all(&text.as_bytes()[cursor..end])?;
        cursor = end;
    }
    Ok(())
}

/// Writes styled lines to a terminal or any other byte sink.
#[derive(Debug)]
pub struct Renderer<W: Write> {
    out: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write `styled` followed by a newline.
    pub fn render(&mut self, styled: &StyledText) -> io::Result<()> {
        write_styled(&mut self.out, styled)?;
        self.out.write_all(b"\n")
    }

    /// Write `styled` without a line terminator.
    pub fn render_inline(&mut self, styled: &StyledText) -> io::Result<()> {
        write_styled(&mut self.out, styled)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
