//! Procedural macros for stylable.
//!
//! This crate provides the `styled!` macro for compile-time interpolation.

use proc_macro::TokenStream;
use syn::{LitStr, parse_macro_input};

mod codegen;
mod parse;

/// Interpolate expressions into a `StyledText`.
///
/// # Syntax
///
/// ```ignore
/// // Literal text only
/// styled!("plain text")
///
/// // Holes hold any expression implementing FormatArg
/// styled!("{count} files in {dir}")
///
/// // A ColoredSegment keeps its color
/// let ok = "ok".with_color(Color::Green);
/// styled!("status: {ok}")
///
/// // Expressions, including ones with braces
/// styled!("total: {a + b}, first: {items[0]}, block: {{ literal braces }}")
/// ```
///
/// `{{` and `}}` produce literal braces. An empty hole, an unclosed `{` or a
/// lone `}` is a compile error.
///
/// # Expansion
///
/// ```ignore
/// {
///     let mut __styled = ::stylable::Interpolation::with_capacity(10, 1);
///     __styled.literal("status: ");
///     __styled.value(&(ok));
///     __styled.finish()
/// }
/// ```
#[proc_macro]
pub fn styled(input: TokenStream) -> TokenStream {
    let template = parse_macro_input!(input as LitStr);
    match parse::Template::parse(&template) {
        Ok(template) => codegen::generate(&template).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
