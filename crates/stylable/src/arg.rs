//! Values that can be substituted into styled text.
//!
//! [`FormatArg`] is the one trait every authoring front-end stringifies
//! through: the interpolation builder, the `styled!` macro and the composite
//! format parser. A value either renders in the surrounding `Default` color or,
//! for a [`ColoredSegment`], carries its own color.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

use crate::color::Color;
use crate::error::FormatError;

/// Number formatting conventions.
///
/// Only the separators are modelled; they affect the output of the `F`, `N`
/// and `P` specifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Culture {
    decimal_separator: char,
    group_separator: char,
}

impl Culture {
    pub const fn new(decimal_separator: char, group_separator: char) -> Self {
        Self {
            decimal_separator,
            group_separator,
        }
    }

    /// `.` for decimals and `,` for digit groups.
    pub const fn invariant() -> Self {
        Self::new('.', ',')
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separator(&self) -> char {
        self.group_separator
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// A value that can be written into styled text.
pub trait FormatArg {
    /// Generic string conversion, used when no format specifier is given.
    fn write_plain(&self, out: &mut String);

    /// Conversion driven by a non-empty format specifier.
    ///
    /// The default ignores the specifier, like any value without custom
    /// formatting.
    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        let _ = (spec, culture);
        self.write_plain(out);
        Ok(())
    }

    /// The color this value renders with, if it carries one.
    fn color(&self) -> Option<Color> {
        None
    }
}

/// Text tagged with a color.
///
/// # Examples
///
/// ```
/// use stylable::{Color, ColoredSegment, WithColor};
///
/// let segment = "Red".with_color(Color::Red);
/// assert_eq!(segment, ColoredSegment::new(Color::Red, "Red"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColoredSegment {
    color: Color,
    text: String,
}

impl ColoredSegment {
    pub fn new(color: Color, text: impl Into<String>) -> Self {
        Self {
            color,
            text: text.into(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for ColoredSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FormatArg for ColoredSegment {
    fn write_plain(&self, out: &mut String) {
        out.push_str(&self.text);
    }

    fn color(&self) -> Option<Color> {
        Some(self.color)
    }
}

/// Tag any displayable value with a color.
pub trait WithColor {
    fn with_color(&self, color: Color) -> ColoredSegment;
}

impl<T: fmt::Display + ?Sized> WithColor for T {
    fn with_color(&self, color: Color) -> ColoredSegment {
        ColoredSegment::new(color, self.to_string())
    }
}

/// Adapter for values that only implement [`fmt::Display`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> FormatArg for Displayed<T> {
    fn write_plain(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

impl<T: FormatArg + ?Sized> FormatArg for &T {
    fn write_plain(&self, out: &mut String) {
        (**self).write_plain(out);
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        (**self).write_formatted(spec, culture, out)
    }

    fn color(&self) -> Option<Color> {
        (**self).color()
    }
}

/// `None` renders as the empty string.
impl<T: FormatArg> FormatArg for Option<T> {
    fn write_plain(&self, out: &mut String) {
        if let Some(value) = self {
            value.write_plain(out);
        }
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        match self {
            Some(value) => value.write_formatted(spec, culture, out),
            None => Ok(()),
        }
    }

    fn color(&self) -> Option<Color> {
        self.as_ref().and_then(FormatArg::color)
    }
}

macro_rules! impl_display_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormatArg for $ty {
                fn write_plain(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

impl_display_arg!(str, String, Cow<'_, str>, char, bool);

macro_rules! impl_signed_arg {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl FormatArg for $ty {
                fn write_plain(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }

                fn write_formatted(
                    &self,
                    spec: &str,
                    culture: &Culture,
                    out: &mut String,
                ) -> Result<(), FormatError> {
                    let integer = Integer {
                        negative: *self < 0,
                        magnitude: i128::from(*self).unsigned_abs(),
                        bits: u128::from(*self as $unsigned),
                    };
                    integer.write(spec, culture, out)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormatArg for $ty {
                fn write_plain(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }

                fn write_formatted(
                    &self,
                    spec: &str,
                    culture: &Culture,
                    out: &mut String,
                ) -> Result<(), FormatError> {
                    let integer = Integer {
                        negative: false,
                        magnitude: u128::from(*self),
                        bits: u128::from(*self),
                    };
                    integer.write(spec, culture, out)
                }
            }
        )*
    };
}

impl_signed_arg!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128);
impl_unsigned_arg!(u8, u16, u32, u64, u128);

// `From` is not implemented between the pointer-sized integers and 128-bit ones.
impl FormatArg for isize {
    fn write_plain(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        (*self as i64).write_formatted(spec, culture, out)
    }
}

impl FormatArg for usize {
    fn write_plain(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        (*self as u64).write_formatted(spec, culture, out)
    }
}

impl FormatArg for f64 {
    fn write_plain(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        write_float(*self, spec, culture, out)
    }
}

impl FormatArg for f32 {
    fn write_plain(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }

    fn write_formatted(
        &self,
        spec: &str,
        culture: &Culture,
        out: &mut String,
    ) -> Result<(), FormatError> {
        write_float(f64::from(*self), spec, culture, out)
    }
}

/// Standard numeric specifier kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumericKind {
    /// `G` or `G0`: the generic conversion, with the culture's decimal separator.
    General,
    /// `D`: decimal digits, zero-padded to the precision.
    Decimal,
    /// `X`/`x`: hexadecimal digits, zero-padded to the precision.
    Hex { upper: bool },
    /// `F`: fixed point.
    Fixed,
    /// `N`: fixed point with digit grouping.
    Number,
    /// `P`: multiplied by 100, fixed point, followed by ` %`.
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NumericSpec {
    kind: NumericKind,
    precision: Option<usize>,
}

const DEFAULT_DECIMALS: usize = 2;

impl NumericSpec {
    fn parse(spec: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidFormatSpec {
            spec: spec.to_string(),
        };

        let mut chars = spec.chars();
        let kind = match chars.next() {
            Some('G' | 'g') => NumericKind::General,
            Some('D' | 'd') => NumericKind::Decimal,
            Some('X') => NumericKind::Hex { upper: true },
            Some('x') => NumericKind::Hex { upper: false },
            Some('F' | 'f') => NumericKind::Fixed,
            Some('N' | 'n') => NumericKind::Number,
            Some('P' | 'p') => NumericKind::Percent,
            _ => return Err(invalid()),
        };

        let digits = chars.as_str();
        let precision = if digits.is_empty() {
            None
        } else if digits.len() <= 2 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(digits.parse().map_err(|_| invalid())?)
        } else {
            return Err(invalid());
        };

        // Significant-digit precision is not supported.
        if kind == NumericKind::General && precision.is_some_and(|digits| digits > 0) {
            return Err(invalid());
        }

        Ok(Self { kind, precision })
    }

    fn decimals(&self) -> usize {
        self.precision.unwrap_or(DEFAULT_DECIMALS)
    }
}

/// An integer split into sign, magnitude and its same-width two's complement bits.
struct Integer {
    negative: bool,
    magnitude: u128,
    bits: u128,
}

impl Integer {
    fn write(&self, spec: &str, culture: &Culture, out: &mut String) -> Result<(), FormatError> {
        let parsed = NumericSpec::parse(spec)?;
        match parsed.kind {
            NumericKind::General => {
                if self.negative {
                    out.push('-');
                }
                let _ = write!(out, "{}", self.magnitude);
            }
            NumericKind::Decimal => {
                if self.negative {
                    out.push('-');
                }
                push_zero_padded(out, &self.magnitude.to_string(), parsed.precision);
            }
            NumericKind::Hex { upper } => {
                let digits = if upper {
                    format!("{:X}", self.bits)
                } else {
                    format!("{:x}", self.bits)
                };
                push_zero_padded(out, &digits, parsed.precision);
            }
            NumericKind::Fixed | NumericKind::Number => {
                let fraction = "0".repeat(parsed.decimals());
                let grouped = parsed.kind == NumericKind::Number;
                let whole = self.magnitude.to_string();
                push_fixed(out, self.negative, &whole, &fraction, grouped, culture);
            }
            NumericKind::Percent => {
                let fraction = "0".repeat(parsed.decimals());
                let whole = self.magnitude.saturating_mul(100).to_string();
                push_fixed(out, self.negative, &whole, &fraction, false, culture);
                out.push_str(" %");
            }
        }
        Ok(())
    }
}

fn write_float(
    value: f64,
    spec: &str,
    culture: &Culture,
    out: &mut String,
) -> Result<(), FormatError> {
    let parsed = NumericSpec::parse(spec)?;
    let (scaled, grouped, suffix) = match parsed.kind {
        NumericKind::General => {
            let plain = value.to_string();
            out.push_str(&plain.replace('.', &culture.decimal_separator.to_string()));
            return Ok(());
        }
        NumericKind::Fixed => (value, false, ""),
        NumericKind::Number => (value, true, ""),
        NumericKind::Percent => (value * 100.0, false, " %"),
        NumericKind::Decimal | NumericKind::Hex { .. } => {
            return Err(FormatError::InvalidFormatSpec {
                spec: spec.to_string(),
            });
        }
    };

    if !scaled.is_finite() {
        let _ = write!(out, "{scaled}");
        return Ok(());
    }

    let rendered = format!("{:.*}", parsed.decimals(), scaled.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));
    let negative = scaled < 0.0;
    push_fixed(out, negative, whole, fraction, grouped, culture);
    out.push_str(suffix);
    Ok(())
}

fn push_zero_padded(out: &mut String, digits: &str, width: Option<usize>) {
    let width = width.unwrap_or(0);
    for _ in digits.len()..width {
        out.push('0');
    }
    out.push_str(digits);
}

fn push_fixed(
    out: &mut String,
    negative: bool,
    whole: &str,
    fraction: &str,
    grouped: bool,
    culture: &Culture,
) {
    if negative {
        out.push('-');
    }
    if grouped {
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(culture.group_separator);
            }
            out.push(digit);
        }
    } else {
        out.push_str(whole);
    }
    if !fraction.is_empty() {
        out.push(culture.decimal_separator);
        out.push_str(fraction);
    }
}
