//! Colored terminal logging.
//!
//! Four ways to author a colored line, all producing the same
//! [`StyledText`] and the same bytes on the terminal:
//!
//! ```
//! use stylable_logs::{Color, Logger, WithColor, styled};
//!
//! let mut logger = Logger::new(Vec::new());
//! let status = "ok".with_color(Color::Green);
//!
//! logger.log(&styled!("build {status}"))?;
//! logger.log_builder(|line| {
//!     line.append("build ").append_colored("ok", Color::Green);
//! })?;
//! logger.log_format("build {0}", &[&status])?;
//! logger.log_markup("build [green]ok[/]")?;
//!
//! let output = String::from_utf8(logger.into_inner()).unwrap();
//! let lines: Vec<_> = output.lines().collect();
//! assert!(lines.iter().all(|line| *line == lines[0]));
//! # Ok::<(), stylable_logs::Error>(())
//! ```
//!
//! Live multi-line progress comes from [`ProgressLogger`], re-exported from
//! `stylable-progress`.

pub mod error;
pub mod logger;

pub use error::{Error, Result};
pub use logger::Logger;

pub use stylable::parser::{format_styled, parse_markup, parse_markup_strict};
pub use stylable::{
    Color, ColoredSegment, Culture, FormatArg, Renderer, StyleSpan, StyledText, TextBuilder,
    WithColor, styled, write_styled,
};
pub use stylable_progress::{
    ProgressConfig, ProgressError, ProgressLogger, ProgressScope, ProgressSession,
    ProgressSummary, TaskOperation, TaskStatus, init_file_logger,
};
