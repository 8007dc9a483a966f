//! Virtual terminal helpers for progress output.
//!
//! Output captured in a [`SharedBuffer`] is replayed through a `vt100` parser,
//! so tests assert on what a terminal would actually show.

#![allow(dead_code)]

use stylable_progress::testing::SharedBuffer;

pub const ROWS: u16 = 24;
pub const COLS: u16 = 80;

/// Replay everything written to `buffer` on a fresh screen.
pub fn screen(buffer: &SharedBuffer) -> vt100::Parser {
    let mut parser = vt100::Parser::new(ROWS, COLS, 0);
    parser.process(&buffer.contents());
    parser
}

/// Visible rows with trailing blanks removed.
pub fn rows(parser: &vt100::Parser) -> Vec<String> {
    parser
        .screen()
        .rows(0, COLS)
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// The first `count` rows, for comparing a whole frame.
pub fn frame(parser: &vt100::Parser, count: usize) -> Vec<String> {
    rows(parser).into_iter().take(count).collect()
}

/// Foreground color at `(row, col)`.
pub fn fg(parser: &vt100::Parser, row: u16, col: u16) -> vt100::Color {
    parser
        .screen()
        .cell(row, col)
        .map(|cell| cell.fgcolor())
        .unwrap_or(vt100::Color::Default)
}

pub fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
