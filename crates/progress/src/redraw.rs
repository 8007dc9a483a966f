//! Draws one frame of the progress display.
//!
//! Layout, starting at the anchor:
//!
//! ```text
//! ⌛ message of each in-progress operation      (grey)
//! ❌ message of each failed operation           (red)
//!
//! status 4 completed 1 with warnings 2 failed 1 skipped
//! ██████████████████████████████████████████████████ 70%
//! ```
//!
//! The bar line appears only once a total is known. Every line is cleared to
//! its end and everything below the display is cleared, so a shrinking frame
//! leaves nothing stale behind.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use stylable::{Color, StyledText, TextBuilder, write_styled};

use crate::config::{MAX_BAR_WIDTH, ProgressConfig};
use crate::operation::{OperationSnapshot, TaskStatus};
use crate::session::{Frame, ProgressSummary};

const IN_PROGRESS_MARKER: &str = "⌛";
const FAILED_MARKER: &str = "❌";
const BAR_CELL: &str = "█";

/// Write `frame` to `out` and flush it.
pub(crate) fn draw<W: Write>(
    out: &mut W,
    frame: &Frame,
    config: &ProgressConfig,
) -> io::Result<()> {
    let (column, top) = config.anchor;
    let mut row = top;
    let mut next_line = |out: &mut W| -> io::Result<()> {
        queue!(out, MoveTo(column, row))?;
        row = row.saturating_add(1);
        Ok(())
    };

    for line in frame.operations.iter().filter_map(operation_line) {
        next_line(out)?;
        write_styled(out, &line)?;
        queue!(out, Clear(ClearType::UntilNewLine))?;
    }

    next_line(out)?;
    queue!(out, Clear(ClearType::UntilNewLine))?;

    let summary = frame.summary();
    next_line(out)?;
    write_styled(out, &summary_line(&frame.status_message, &summary))?;
    queue!(out, Clear(ClearType::UntilNewLine))?;

    if let Some(bar) = bar_line(&summary, config.bar_width.min(MAX_BAR_WIDTH)) {
        next_line(out)?;
        write_styled(out, &bar)?;
        queue!(out, Clear(ClearType::UntilNewLine))?;
    }

    queue!(out, Clear(ClearType::FromCursorDown))?;
    out.flush()
}

/// The line for an operation, if its status is shown individually.
fn operation_line(operation: &OperationSnapshot) -> Option<StyledText> {
    let (marker, color) = match operation.status {
        TaskStatus::InProgress => (IN_PROGRESS_MARKER, Color::Grey),
        TaskStatus::Failed => (FAILED_MARKER, Color::Red),
        _ => return None,
    };
    let mut line = TextBuilder::new();
    line.append_colored(format_args!("{marker} {}", operation.message), color);
    Some(line.build())
}

fn summary_line(status_message: &str, summary: &ProgressSummary) -> StyledText {
    let counts = [
        (summary.completed, "completed", Color::Green),
        (summary.warnings, "with warnings", Color::Yellow),
        (summary.failed, "failed", Color::Red),
        (summary.skipped, "skipped", Color::Grey),
    ];

    let mut line = TextBuilder::new();
    line.append(status_message);
    for (count, label, color) in counts {
        if count == 0 {
            continue;
        }
        line.append(" ")
            .append_colored(count, color)
            .append(" ")
            .append(label);
    }
    line.build()
}

fn bar_line(summary: &ProgressSummary, width: usize) -> Option<StyledText> {
    let percentage = summary.percentage()?;
    let filled = summary.filled_cells(width)?;

    let mut line = TextBuilder::new();
    line.append_colored(BAR_CELL.repeat(filled), Color::Blue)
        .append_colored(BAR_CELL.repeat(width - filled), Color::Grey)
        .append(format_args!(" {percentage}%"));
    Some(line.build())
}
