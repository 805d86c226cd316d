//! Tokenization pipeline
//!
//!     The lexer turns source text into a flat stream of typed tokens in two
//!     stages. The block stage groups lines into paragraphs and emits
//!     paragraph_open / inline / paragraph_close triples. The inline stage
//!     then parses each inline token's content into child tokens: text runs,
//!     emphasis and link marks, code spans, breaks, and the doubled-brace
//!     field spans that are the point of this format.
//!
//!     Open/close tokens of the same base type always nest like balanced
//!     parentheses across the stream; the tree builder relies on that.

pub mod block;
pub mod fields;
pub mod inline;
pub mod tokens;

pub use tokens::{Nesting, Token};

/// Tokenize a full source text: block structure first, then inline children
/// for every `inline` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut stream = block::tokenize(source);
    for token in &mut stream {
        if token.name == tokens::INLINE {
            token.children = inline::tokenize(&token.content);
        }
    }
    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_fills_inline_children() {
        let stream = tokenize("hello *world*");
        assert_eq!(stream.len(), 3);
        assert_eq!(stream[0].name, "paragraph_open");
        assert_eq!(stream[1].name, "inline");
        assert_eq!(stream[2].name, "paragraph_close");
        let names: Vec<&str> = stream[1].children.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["text", "em_open", "text", "em_close"]);
    }

    #[test]
    fn test_tokenize_empty_source() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n  \n").is_empty());
    }
}
