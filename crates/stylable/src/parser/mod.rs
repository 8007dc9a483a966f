//! Parsers that turn encoded styling into [`StyledText`](crate::StyledText).
//!
//! Two encodings are understood: composite format strings
//! (`{index[,[-]width][:spec]}`) and bracket markup (`[color]text[/]`).

mod format;
mod lexer;
mod markup;

pub use format::format_styled;
pub use lexer::{Lexer, Token, Unterminated};
pub use markup::{parse_markup, parse_markup_strict};
