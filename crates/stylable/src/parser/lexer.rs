//! Lexer for bracket markup.
//!
//! Splits input into plain text runs and `[name]content[/]` regions. Regions
//! do not nest: the content runs to the first `[/]` after the tag.

/// A token produced by the [`Lexer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text outside any region.
    Text(&'a str),
    /// A complete region. `position` is the byte offset of its `[`.
    Region {
        name: &'a str,
        content: &'a str,
        position: usize,
    },
    /// Input that ends before a tag or region is closed. Always the last
    /// token.
    Unterminated(Unterminated),
}

/// What was left open when the input ran out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unterminated {
    /// A `[` with no `]` after it.
    Tag { position: usize },
    /// A `[name]` with no `[/]` after it.
    Region { position: usize },
}

const CLOSE: &str = "[/]";

/// Lexer for bracket markup.
///
/// # Examples
///
/// ```
/// use stylable::parser::{Lexer, Token};
///
/// let tokens: Vec<_> = Lexer::new("a[red]b[/]").collect();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Text("a"),
///         Token::Region { name: "red", content: "b", position: 1 },
///     ]
/// );
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn consume_text(&mut self) -> Token<'a> {
        let rest = self.remaining();
        let len = rest.find('[').unwrap_or(rest.len());
        self.pos += len;
        Token::Text(&rest[..len])
    }

    fn consume_region(&mut self) -> Token<'a> {
        let position = self.pos;
        let after_open = &self.input[position + 1..];

        let Some(name_len) = after_open.find(']') else {
            self.pos = self.input.len();
            return Token::Unterminated(Unterminated::Tag { position });
        };
        let name = &after_open[..name_len];

        let body = &after_open[name_len + 1..];
        let Some(content_len) = body.find(CLOSE) else {
            self.pos = self.input.len();
            return Token::Unterminated(Unterminated::Region { position });
        };

        self.pos = position + 1 + name_len + 1 + content_len + CLOSE.len();
        Token::Region {
            name,
            content: &body[..content_len],
            position,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        if self.remaining().starts_with('[') {
            Some(self.consume_region())
        } else {
            Some(self.consume_text())
        }
    }
}
