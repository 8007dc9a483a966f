use std::io::{self, Stdout, Write};

use stylable::parser::{format_styled, parse_markup};
use stylable::{Culture, FormatArg, Renderer, StyledText, TextBuilder};

use crate::error::Result;

/// Writes colored log lines, one per call, whichever way they were authored.
///
/// Every entry point builds a [`StyledText`] and hands it to the same
/// [`Renderer`], so the four authoring styles produce identical bytes for
/// equivalent input.
pub struct Logger<W: Write = Stdout> {
    renderer: Renderer<W>,
    culture: Culture,
}

impl Logger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Logger<W> {
    pub fn new(out: W) -> Self {
        Self {
            renderer: Renderer::new(out),
            culture: Culture::invariant(),
        }
    }

    /// Use `culture` for the numeric specifiers of [`log_format`](Self::log_format).
    pub fn with_culture(mut self, culture: Culture) -> Self {
        self.culture = culture;
        self
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Write `text` followed by a newline.
    pub fn log(&mut self, text: &StyledText) -> Result<()> {
        self.renderer.render(text)?;
        Ok(())
    }

    /// Build a line with a [`TextBuilder`] and write it.
    pub fn log_builder(&mut self, build: impl FnOnce(&mut TextBuilder)) -> Result<()> {
        let mut builder = TextBuilder::new();
        build(&mut builder);
        self.log(&builder.build())
    }

    /// Write a composite format string such as `"{0,-8}|{1:N2}"`.
    ///
    /// Nothing is written when the format is malformed.
    pub fn log_format(&mut self, format: &str, args: &[&dyn FormatArg]) -> Result<()> {
        let text = format_styled(&self.culture, format, args)?;
        self.log(&text)
    }

    /// Write bracket markup such as `"[red]error[/]: details"`.
    pub fn log_markup(&mut self, content: &str) -> Result<()> {
        let text = parse_markup(content)?;
        self.log(&text)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.renderer.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        self.renderer.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.renderer.into_inner()
    }
}
