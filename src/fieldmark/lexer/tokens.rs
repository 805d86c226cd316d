//! Token definitions for the fieldmark tokenizer
//!
//! Tokens are flat, typed units in document order. A token is either the
//! opening or closing half of a paired element, or a self-contained
//! occurrence that carries its content directly (text runs, code spans,
//! breaks). Block-level `inline` tokens additionally carry their parsed
//! inline children.

use crate::fieldmark::ast::Attrs;
use serde::{Deserialize, Serialize};

// Base names for paired tokens (emitted as `<base>_open` / `<base>_close`).
pub const PARAGRAPH: &str = "paragraph";
pub const FIELD: &str = "field";
pub const EM: &str = "em";
pub const STRONG: &str = "strong";
pub const LINK: &str = "link";

// Self-contained token names.
pub const TEXT: &str = "text";
pub const INLINE: &str = "inline";
pub const SOFTBREAK: &str = "softbreak";
pub const HARDBREAK: &str = "hardbreak";
pub const CODE_INLINE: &str = "code_inline";

/// How a token participates in pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nesting {
    Open,
    Close,
    SelfClosing,
}

/// A single unit of tokenized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub nesting: Nesting,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
}

impl Token {
    pub fn new(name: impl Into<String>, nesting: Nesting) -> Self {
        Token {
            name: name.into(),
            nesting,
            content: String::new(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Opening half of a paired token: `<base>_open`.
    pub fn open(base: &str) -> Self {
        Token::new(format!("{}_open", base), Nesting::Open)
    }

    /// Closing half of a paired token: `<base>_close`.
    pub fn close(base: &str) -> Self {
        Token::new(format!("{}_close", base), Nesting::Close)
    }

    /// A self-contained token carrying its content directly.
    pub fn leaf(name: &str, content: impl Into<String>) -> Self {
        let mut token = Token::new(name, Nesting::SelfClosing);
        token.content = content.into();
        token
    }

    /// A literal text run.
    pub fn text(content: impl Into<String>) -> Self {
        Token::leaf(TEXT, content)
    }

    pub fn with_attr(mut self, key: &str, value: serde_json::Value) -> Self {
        self.attrs.insert(key.to_string(), value);
        self
    }

    pub fn attr_get(&self, key: &str) -> Option<&serde_json::Value> {
        self.attrs.get(key)
    }
}
