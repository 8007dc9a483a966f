//! Template parsing for the styled! macro.

use syn::{Error, Expr, LitStr, Result};

/// A parsed template: literal chunks and interpolated expressions, in order.
#[derive(Debug)]
pub struct Template {
    pub pieces: Vec<Piece>,
}

#[derive(Debug)]
pub enum Piece {
    /// Literal text with `{{`/`}}` already unescaped.
    Literal(String),
    /// The expression inside a `{...}` hole.
    Value(Box<Expr>),
}

impl Template {
    pub fn parse(lit: &LitStr) -> Result<Self> {
        let source = lit.value();
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(Error::new(
                        lit.span(),
                        format!("unmatched `}}` at offset {start}; use `}}}}` for a literal brace"),
                    ));
                }
                '{' => {
                    // Expressions may contain braces of their own.
                    let mut depth = 1;
                    let mut end = None;
                    for (index, c) in chars.by_ref() {
                        match c {
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    end = Some(index);
                                    break;
                                }
                            }
                            _ => {}
                        }
                    }
                    let Some(end) = end else {
                        return Err(Error::new(
                            lit.span(),
                            format!("unclosed `{{` at offset {start}"),
                        ));
                    };

                    let hole = source[start + 1..end].trim();
                    if hole.is_empty() {
                        return Err(Error::new(
                            lit.span(),
                            format!("empty `{{}}` at offset {start}; holes need an expression"),
                        ));
                    }
                    let expr = syn::parse_str::<Expr>(hole).map_err(|err| {
                        Error::new(lit.span(), format!("invalid expression `{hole}`: {err}"))
                    })?;

                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Value(Box::new(expr)));
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        Ok(Template { pieces })
    }

    /// Total length of the literal chunks in bytes.
    pub fn literal_len(&self) -> usize {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => text.len(),
                Piece::Value(_) => 0,
            })
            .sum()
    }

    pub fn value_count(&self) -> usize {
        self.pieces
            .iter()
            .filter(|piece| matches!(piece, Piece::Value(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Span;

    fn parse(source: &str) -> Result<Template> {
        Template::parse(&LitStr::new(source, Span::call_site()))
    }

    fn shape(template: &Template) -> Vec<String> {
        template
            .pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => format!("lit:{text}"),
                Piece::Value(_) => "value".to_string(),
            })
            .collect()
    }

    #[test]
    fn literals_and_holes() {
        let template = parse("Hello {name}, you have {count + 1} items").unwrap();
        assert_eq!(
            shape(&template),
            vec!["lit:Hello ", "value", "lit:, you have ", "value", "lit: items"]
        );
        assert_eq!(template.value_count(), 2);
        assert_eq!(template.literal_len(), "Hello , you have  items".len());
    }

    #[test]
    fn escaped_braces_stay_literal() {
        let template = parse("{{x}} = {x}").unwrap();
        assert_eq!(shape(&template), vec!["lit:{x} = ", "value"]);
    }

    #[test]
    fn holes_may_contain_braces() {
        let template = parse("{ if flag { a } else { b } }!").unwrap();
        assert_eq!(shape(&template), vec!["value", "lit:!"]);
    }

    #[test]
    fn empty_template() {
        assert!(parse("").unwrap().pieces.is_empty());
    }

    #[test]
    fn malformed_templates_fail() {
        assert!(parse("a } b").is_err());
        assert!(parse("a { b").is_err());
        assert!(parse("{ }").is_err());
        assert!(parse("{1 +}").is_err());
    }
}
