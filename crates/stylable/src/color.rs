//! Foreground colors and their terminal control sequences.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::error::ColorParseError;

/// A foreground color.
///
/// `Default` restores the terminal's own foreground color; every other
/// variant maps to a fixed SGR sequence (see [`Color::ansi_code`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Red,
    Green,
    Blue,
    Yellow,
    /// Bright black. Used by the progress display for pending and skipped work.
    Grey,
}

/// Lower-case names accepted by [`Color::parse`].
static COLOR_NAMES: phf::Map<&'static str, Color> = phf_map! {
    "default" => Color::Default,
    "red" => Color::Red,
    "green" => Color::Green,
    "blue" => Color::Blue,
    "yellow" => Color::Yellow,
    "grey" => Color::Grey,
};

impl Color {
    /// Every color, in declaration order.
    pub const ALL: [Color; 6] = [
        Color::Default,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Grey,
    ];

    /// Parse a color name, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use stylable::Color;
    ///
    /// assert_eq!(Color::parse("Red").unwrap(), Color::Red);
    /// assert!(Color::parse("magenta").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, ColorParseError> {
        COLOR_NAMES
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| ColorParseError::UnknownName(name.to_string()))
    }

    /// The control sequence that switches the terminal to this color.
    pub const fn ansi_code(self) -> &'static str {
        match self {
            Color::Default => "\x1b[39m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Blue => "\x1b[34m",
            Color::Yellow => "\x1b[33m",
            Color::Grey => "\x1b[90m",
        }
    }

    /// The canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Grey => "grey",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
