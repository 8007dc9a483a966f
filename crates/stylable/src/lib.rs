//! Colored terminal text built from spans.
//!
//! A [`StyledText`] is a string plus an ordered list of [`StyleSpan`]s, each
//! giving the color of the text up to its end offset. Four front-ends produce
//! one, all through the same [`SpanRecorder`]:
//!
//! - [`styled!`]: compile-time interpolation, `styled!("Hello {name}")`
//! - [`TextBuilder`]: fluent appends
//! - [`parser::format_styled`]: composite format strings, `"{0,-8} {1:F2}"`
//! - [`parser::parse_markup`]: bracket markup, `"[red]error[/]: details"`
//!
//! Equivalent input yields identical spans whichever front-end built it.
//! [`Renderer`] replays the spans as ANSI color sequences.
//!
//! # Usage
//!
//! ```
//! use stylable::{Color, Renderer, TextBuilder, WithColor, styled};
//!
//! let name = "world".with_color(Color::Blue);
//! let greeting = styled!("Hello, {name}!");
//!
//! let mut builder = TextBuilder::new();
//! builder
//!     .append("Hello, ")
//!     .append_colored("world", Color::Blue)
//!     .append("!");
//! assert_eq!(greeting, builder.build());
//!
//! let mut renderer = Renderer::new(Vec::new());
//! renderer.render(&greeting).unwrap();
//! ```

extern crate self as stylable;

pub mod arg;
pub mod builder;
pub mod color;
pub mod error;
pub mod parser;
pub mod render;
pub mod span;
pub mod styled_text;

pub use arg::{ColoredSegment, Culture, Displayed, FormatArg, WithColor};
pub use builder::{Interpolation, SpanRecorder, TextBuilder};
pub use color::Color;
pub use error::{ColorParseError, FormatError, MarkupError, SpanError};
pub use render::{Renderer, write_styled};
pub use span::StyleSpan;
pub use styled_text::{Segments, StyledText};
pub use stylable_macros::styled;
