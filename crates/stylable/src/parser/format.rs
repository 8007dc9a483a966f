//! Composite format parser.
//!
//! Substitutes `{index[,[-]width][:spec]}` placeholders from an argument list
//! while recording color boundaries: the literal run before each placeholder
//! is `Default`, and a [`ColoredSegment`](crate::ColoredSegment) argument
//! colors its own padded text.

use crate::arg::{Culture, FormatArg};
use crate::builder::SpanRecorder;
use crate::color::Color;
use crate::error::FormatError;
use crate::styled_text::StyledText;

/// Index and width values stop accumulating digits at this bound.
const NUMBER_LIMIT: usize = 1_000_000;

/// Format `args` into `format`, producing styled text.
///
/// # Examples
///
/// ```
/// use stylable::parser::format_styled;
/// use stylable::{Color, Culture, StyleSpan, WithColor};
///
/// let text = format_styled(&Culture::invariant(), "{0}", &[&"A".with_color(Color::Red)]).unwrap();
/// assert_eq!(text.text(), "A");
/// assert_eq!(
///     text.spans(),
///     &[StyleSpan::new(1, Color::Red), StyleSpan::new(1, Color::Default)]
/// );
/// ```
pub fn format_styled(
    culture: &Culture,
    format: &str,
    args: &[&dyn FormatArg],
) -> Result<StyledText, FormatError> {
    let mut cursor = Cursor::new(format);
    let mut out = SpanRecorder::with_capacity(format.len() + args.len() * 8);
    let mut value = String::new();

    loop {
        cursor.copy_literal(&mut out)?;
        if cursor.at_end() {
            break;
        }

        out.mark(Color::Default);
        let placeholder = cursor.placeholder(args.len())?;
        let arg = args[placeholder.index];

        value.clear();
        match placeholder.spec.as_deref() {
            Some(spec) => arg.write_formatted(spec, culture, &mut value)?,
            None => arg.write_plain(&mut value),
        }

        let padding = placeholder.width.saturating_sub(value.chars().count());
        if !placeholder.left_justify {
            push_spaces(&mut out, padding);
        }
        out.push_str(&value);
        if placeholder.left_justify {
            push_spaces(&mut out, padding);
        }

        if let Some(color) = arg.color() {
            out.mark(color);
        }
    }

    Ok(out.finish())
}

fn push_spaces(out: &mut SpanRecorder, count: usize) {
    for _ in 0..count {
        out.push(' ');
    }
}

/// A parsed `{...}` placeholder.
#[derive(Debug, PartialEq, Eq)]
struct Placeholder {
    index: usize,
    width: usize,
    left_justify: bool,
    spec: Option<String>,
}

/// Byte cursor over the format string. Every character with meaning to the
/// grammar is ASCII, so literal runs are copied as whole slices.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos + 1).copied()
    }

    fn malformed(&self, expected: &'static str) -> FormatError {
        FormatError::MalformedPlaceholder {
            position: self.pos,
            expected,
        }
    }

    /// Like `peek`, but running out of input is an unclosed placeholder.
    fn require(&self, expected: &'static str) -> Result<u8, FormatError> {
        self.peek().ok_or_else(|| self.malformed(expected))
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(b' ') {
            self.pos += 1;
        }
    }

    /// Copy literal text up to the next unescaped `{` (left unconsumed) or
    /// the end of input.
    fn copy_literal(&mut self, out: &mut SpanRecorder) -> Result<(), FormatError> {
        while let Some(byte) = self.peek() {
            match byte {
                b'}' if self.peek_next() == Some(b'}') => {
                    out.push('}');
                    self.pos += 2;
                }
                b'}' => {
                    return Err(FormatError::UnexpectedCloseBrace { position: self.pos });
                }
                b'{' if self.peek_next() == Some(b'{') => {
                    out.push('{');
                    self.pos += 2;
                }
                b'{' => return Ok(()),
                _ => {
                    let rest = &self.input[self.pos..];
                    let run = rest.find(['{', '}']).unwrap_or(rest.len());
                    out.push_str(&rest[..run]);
                    self.pos += run;
                }
            }
        }
        Ok(())
    }

    /// Accumulate decimal digits, stopping early at [`NUMBER_LIMIT`].
    fn number(&mut self, expected: &'static str) -> Result<usize, FormatError> {
        let first = self.require(expected)?;
        if !first.is_ascii_digit() {
            return Err(self.malformed(expected));
        }

        let mut value = 0;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            if value >= NUMBER_LIMIT {
                break;
            }
            value = value * 10 + usize::from(digit - b'0');
            self.pos += 1;
        }
        Ok(value)
    }

    /// Parse one placeholder, starting at its opening `{`.
    fn placeholder(&mut self, arg_count: usize) -> Result<Placeholder, FormatError> {
        self.pos += 1;

        let index = self.number("argument index")?;
        if index >= arg_count {
            return Err(FormatError::IndexOutOfRange {
                index,
                count: arg_count,
            });
        }
        self.skip_spaces();

        let mut width = 0;
        let mut left_justify = false;
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_spaces();
            if self.require("alignment width")? == b'-' {
                left_justify = true;
                self.pos += 1;
            }
            width = self.number("alignment width")?;
            self.skip_spaces();
        }

        let spec = if self.peek() == Some(b':') {
            self.pos += 1;
            Some(self.format_spec()?)
        } else {
            None
        };

        if self.require("closing brace")? != b'}' {
            return Err(self.malformed("closing brace"));
        }
        self.pos += 1;

        Ok(Placeholder {
            index,
            width,
            left_justify,
            spec: spec.filter(|spec| !spec.is_empty()),
        })
    }

    /// Read a format specifier up to the closing `}` (left unconsumed),
    /// resolving `{{` and `}}` escapes.
    fn format_spec(&mut self) -> Result<String, FormatError> {
        let mut spec = String::new();
        loop {
            match self.require("closing brace")? {
                b'{' if self.peek_next() == Some(b'{') => {
                    spec.push('{');
                    self.pos += 2;
                }
                b'{' => return Err(self.malformed("escaped brace in format specifier")),
                b'}' if self.peek_next() == Some(b'}') => {
                    spec.push('}');
                    self.pos += 2;
                }
                b'}' => return Ok(spec),
                _ => {
                    let rest = &self.input[self.pos..];
                    let run = rest.find(['{', '}']).unwrap_or(rest.len());
                    spec.push_str(&rest[..run]);
                    self.pos += run;
                }
            }
        }
    }
}
