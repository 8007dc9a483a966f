//! Code generation for the styled! macro.

use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{Piece, Template};

/// Expand a template into an `Interpolation` block that yields `StyledText`.
pub fn generate(template: &Template) -> TokenStream {
    let literal_len = template.literal_len();
    let value_count = template.value_count();

    let statements = template.pieces.iter().map(|piece| match piece {
        Piece::Literal(text) => quote! { __styled.literal(#text); },
        Piece::Value(expr) => quote! { __styled.value(&(#expr)); },
    });

    quote! {
        {
            #[allow(unused_mut)]
            let mut __styled = ::stylable::Interpolation::with_capacity(#literal_len, #value_count);
            #(#statements)*
            __styled.finish()
        }
    }
}
