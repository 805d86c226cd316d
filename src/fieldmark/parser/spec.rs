//! Declarative token handling table
//!
//! Each entry maps a token base name to one of three strategies:
//! - a structural node of a schema type (paired `_open`/`_close` tokens, or
//!   a single leaf token whose content collapses into open + text + close);
//! - a mark toggled over subsequent text (again paired or leaf);
//! - ignore (consume without effect).
//!
//! Attributes for the created node or mark can be fixed or derived from the
//! token at hand.

use crate::fieldmark::ast::Attrs;
use crate::fieldmark::lexer::Token;
use once_cell::sync::Lazy;

/// Derives node/mark attributes from the token being handled.
pub type AttrFn = fn(&Token) -> Attrs;

/// Where the attributes of a created node or mark come from.
#[derive(Clone)]
pub enum AttrSource {
    None,
    Fixed(Attrs),
    Derive(AttrFn),
}

impl AttrSource {
    pub fn resolve(&self, token: &Token) -> Attrs {
        match self {
            AttrSource::None => Attrs::new(),
            AttrSource::Fixed(attrs) => attrs.clone(),
            AttrSource::Derive(f) => f(token),
        }
    }
}

impl std::fmt::Debug for AttrSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrSource::None => write!(f, "None"),
            AttrSource::Fixed(attrs) => f.debug_tuple("Fixed").field(attrs).finish(),
            AttrSource::Derive(_) => write!(f, "Derive(..)"),
        }
    }
}

/// Handling strategy for one token base name.
#[derive(Debug, Clone)]
pub enum TokenSpec {
    /// Open/close (or collapse, when `leaf`) a structural node of the named
    /// schema type.
    Node {
        name: String,
        leaf: bool,
        attrs: AttrSource,
    },
    /// Toggle (or scope to one text run, when `leaf`) a mark of the named
    /// schema type.
    Mark {
        name: String,
        leaf: bool,
        attrs: AttrSource,
    },
    /// Consume the token (or token pair) without effect.
    Ignore { leaf: bool },
}

impl TokenSpec {
    pub fn node(name: impl Into<String>) -> Self {
        TokenSpec::Node {
            name: name.into(),
            leaf: false,
            attrs: AttrSource::None,
        }
    }

    pub fn leaf_node(name: impl Into<String>) -> Self {
        TokenSpec::Node {
            name: name.into(),
            leaf: true,
            attrs: AttrSource::None,
        }
    }

    pub fn mark(name: impl Into<String>) -> Self {
        TokenSpec::Mark {
            name: name.into(),
            leaf: false,
            attrs: AttrSource::None,
        }
    }

    pub fn leaf_mark(name: impl Into<String>) -> Self {
        TokenSpec::Mark {
            name: name.into(),
            leaf: true,
            attrs: AttrSource::None,
        }
    }

    pub fn ignore() -> Self {
        TokenSpec::Ignore { leaf: false }
    }

    pub fn ignore_leaf() -> Self {
        TokenSpec::Ignore { leaf: true }
    }

    pub fn with_attrs(self, attrs: AttrSource) -> Self {
        match self {
            TokenSpec::Node { name, leaf, .. } => TokenSpec::Node { name, leaf, attrs },
            TokenSpec::Mark { name, leaf, .. } => TokenSpec::Mark { name, leaf, attrs },
            ignore @ TokenSpec::Ignore { .. } => ignore,
        }
    }
}

fn link_attrs(token: &Token) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert(
        "href".to_string(),
        token.attr_get("href").cloned().unwrap_or(serde_json::json!("")),
    );
    attrs.insert(
        "title".to_string(),
        token
            .attr_get("title")
            .cloned()
            .unwrap_or(serde_json::Value::Null),
    );
    attrs
}

/// The default table for the default schema: mirrors the token names the
/// lexer emits.
pub static DEFAULT_TOKEN_SPECS: Lazy<Vec<(String, TokenSpec)>> = Lazy::new(|| {
    vec![
        ("paragraph".to_string(), TokenSpec::node("paragraph")),
        ("field".to_string(), TokenSpec::node("field")),
        ("hardbreak".to_string(), TokenSpec::leaf_node("hard_break")),
        ("em".to_string(), TokenSpec::mark("em")),
        ("strong".to_string(), TokenSpec::mark("strong")),
        ("code_inline".to_string(), TokenSpec::leaf_mark("code")),
        (
            "link".to_string(),
            TokenSpec::mark("link").with_attrs(AttrSource::Derive(link_attrs)),
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_source_resolution() {
        let token = Token::open("link").with_attr("href", serde_json::json!("/x"));
        assert!(AttrSource::None.resolve(&token).is_empty());

        let mut fixed = Attrs::new();
        fixed.insert("k".to_string(), serde_json::json!(1));
        assert_eq!(AttrSource::Fixed(fixed.clone()).resolve(&token), fixed);

        let derived = AttrSource::Derive(link_attrs).resolve(&token);
        assert_eq!(derived["href"], serde_json::json!("/x"));
        assert_eq!(derived["title"], serde_json::Value::Null);
    }

    #[test]
    fn test_default_table_covers_lexer_token_names() {
        let names: Vec<&str> = DEFAULT_TOKEN_SPECS
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        for expected in ["paragraph", "field", "em", "strong", "code_inline", "link"] {
            assert!(names.contains(&expected), "missing spec for {}", expected);
        }
    }

    #[test]
    fn test_with_attrs_keeps_shape() {
        let spec = TokenSpec::mark("link").with_attrs(AttrSource::Derive(link_attrs));
        match spec {
            TokenSpec::Mark { name, leaf, attrs } => {
                assert_eq!(name, "link");
                assert!(!leaf);
                assert!(matches!(attrs, AttrSource::Derive(_)));
            }
            _ => panic!("expected mark spec"),
        }
    }
}
