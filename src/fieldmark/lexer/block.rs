//! Block-level tokenization
//!
//! The block stage is deliberately small: it scans the source line by line
//! with logos and groups consecutive non-blank lines into paragraphs. A
//! blank line (empty or whitespace-only) separates paragraphs. Each
//! paragraph becomes a `paragraph_open` / `inline` / `paragraph_close`
//! triple; the `inline` token holds the paragraph text with single newlines
//! preserved, for the inline stage to parse.

use super::tokens::{self, Token};
use logos::Logos;

/// Line-level scan tokens.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum LineToken {
    /// A full line of non-newline characters (may be whitespace-only).
    #[regex(r"[^\n]+")]
    Line,

    #[token("\n")]
    Newline,
}

/// Tokenize source text into the block-level token stream.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut stream = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut newlines_since_line = 0usize;

    let mut lexer = LineToken::lexer(source);
    while let Some(result) = lexer.next() {
        match result {
            Ok(LineToken::Line) => {
                let line = lexer.slice();
                if line.trim().is_empty() {
                    flush_paragraph(&mut stream, &mut current);
                } else {
                    if newlines_since_line >= 2 {
                        flush_paragraph(&mut stream, &mut current);
                    }
                    current.push(line);
                }
                newlines_since_line = 0;
            }
            Ok(LineToken::Newline) => {
                newlines_since_line += 1;
            }
            // The two rules cover every character, so no error tokens occur.
            Err(()) => {}
        }
    }
    flush_paragraph(&mut stream, &mut current);

    stream
}

fn flush_paragraph(stream: &mut Vec<Token>, lines: &mut Vec<&str>) {
    if lines.is_empty() {
        return;
    }
    let content = lines.join("\n");
    lines.clear();

    stream.push(Token::open(tokens::PARAGRAPH));
    stream.push(Token::leaf(tokens::INLINE, content));
    stream.push(Token::close(tokens::PARAGRAPH));
}
