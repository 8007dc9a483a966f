//! Display configuration.

use std::str::FromStr;
use std::time::Duration;

/// Environment variable overriding the refresh interval, in milliseconds.
pub const REFRESH_MS_VAR: &str = "STYLABLE_REFRESH_MS";
/// Environment variable overriding the progress bar width, in cells.
pub const BAR_WIDTH_VAR: &str = "STYLABLE_BAR_WIDTH";
/// Widest progress bar drawn. Wider settings are clamped.
pub const MAX_BAR_WIDTH: usize = 1000;

/// How and where the progress display is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Time between automatic redraws.
    pub refresh_interval: Duration,
    /// Width of the progress bar in cells, at most [`MAX_BAR_WIDTH`].
    pub bar_width: usize,
    /// Top-left corner of the display, as `(column, row)`.
    pub anchor: (u16, u16),
    /// Hide the cursor while a session is active.
    pub hide_cursor: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_millis(250),
            bar_width: 50,
            anchor: (0, 0),
            hide_cursor: true,
        }
    }
}

impl ProgressConfig {
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Set the bar width, clamped to [`MAX_BAR_WIDTH`].
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.min(MAX_BAR_WIDTH);
        self
    }

    pub fn with_anchor(mut self, column: u16, row: u16) -> Self {
        self.anchor = (column, row);
        self
    }

    pub fn with_hide_cursor(mut self, hide: bool) -> Self {
        self.hide_cursor = hide;
        self
    }

    /// Defaults, overridden by [`REFRESH_MS_VAR`] and [`BAR_WIDTH_VAR`].
    ///
    /// Unparseable values and bar widths over [`MAX_BAR_WIDTH`] are logged
    /// and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading settings through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        match setting::<u64>(&lookup, REFRESH_MS_VAR) {
            Some(0) => log::warn!("ignoring {REFRESH_MS_VAR}=0: the interval must be positive"),
            Some(ms) => config.refresh_interval = Duration::from_millis(ms),
            None => {}
        }
        match setting::<usize>(&lookup, BAR_WIDTH_VAR) {
            Some(width) if width > MAX_BAR_WIDTH => {
                log::warn!("ignoring {BAR_WIDTH_VAR}={width}: wider than {MAX_BAR_WIDTH} cells");
            }
            Some(width) => config.bar_width = width,
            None => {}
        }

        config
    }
}

fn setting<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {key}={raw:?}: not a non-negative integer");
            None
        }
    }
}
