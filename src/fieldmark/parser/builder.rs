//! Tree builder: resolved handler table and the parse driver
//!
//! `TreeBuilder::new` resolves the declarative token table against the
//! schema once, producing a concrete handler per token name; unknown schema
//! types surface there, not mid-parse. `parse` then walks a token stream,
//! dispatching each token through the table (recursing into `inline`
//! children), and finally closes every frame left open so malformed or
//! partial input still yields a document.

use std::collections::HashMap;
use std::fmt;

use crate::fieldmark::ast::Node;
use crate::fieldmark::lexer::{tokens, Token};
use crate::fieldmark::schema::{MarkType, NodeType, Schema};

use super::spec::{AttrSource, TokenSpec};
use super::state::ParseState;

/// Errors from handler-table resolution or parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token's type is absent from both the table and the built-ins. This
    /// is a mismatch between token producer and handler table, so the whole
    /// parse aborts.
    UnknownToken(String),
    /// The handler table names a type the schema does not define.
    UnknownType(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownToken(name) => {
                write!(f, "Token type '{}' not supported by the parser", name)
            }
            ParseError::UnknownType(name) => {
                write!(f, "Schema has no node or mark type named '{}'", name)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A resolved handling strategy for one concrete token name.
#[derive(Debug, Clone)]
enum Handler {
    OpenNode { node_type: NodeType, attrs: AttrSource },
    CloseNode,
    LeafNode { node_type: NodeType, attrs: AttrSource },
    OpenMark { mark_type: MarkType, attrs: AttrSource },
    CloseMark { mark_type: MarkType },
    LeafMark { mark_type: MarkType, attrs: AttrSource },
    Ignore,
    Text,
    Inline,
    Softbreak,
}

/// Converts flat token streams into document trees.
#[derive(Debug)]
pub struct TreeBuilder {
    schema: Schema,
    handlers: HashMap<String, Handler>,
}

impl TreeBuilder {
    /// Resolve the token table into concrete handlers. Fails when a table
    /// entry names a schema type that does not exist or resolves to the
    /// wrong kind.
    pub fn new(schema: Schema, specs: &[(String, TokenSpec)]) -> Result<Self, ParseError> {
        // The registry's own references must resolve; `Schema::new` does not
        // check them.
        for name in [schema.top_node(), schema.default_block()] {
            if schema.node_type(name).is_none() {
                return Err(ParseError::UnknownType(name.to_string()));
            }
        }

        let mut handlers = HashMap::new();

        for (token_name, spec) in specs {
            match spec {
                TokenSpec::Node { name, leaf, attrs } => {
                    let node_type = schema
                        .node_type(name)
                        .cloned()
                        .ok_or_else(|| ParseError::UnknownType(name.clone()))?;
                    if *leaf {
                        handlers.insert(
                            token_name.clone(),
                            Handler::LeafNode {
                                node_type,
                                attrs: attrs.clone(),
                            },
                        );
                    } else {
                        handlers.insert(
                            format!("{}_open", token_name),
                            Handler::OpenNode {
                                node_type,
                                attrs: attrs.clone(),
                            },
                        );
                        handlers.insert(format!("{}_close", token_name), Handler::CloseNode);
                    }
                }
                TokenSpec::Mark { name, leaf, attrs } => {
                    let mark_type = schema
                        .mark_type(name)
                        .cloned()
                        .ok_or_else(|| ParseError::UnknownType(name.clone()))?;
                    if *leaf {
                        handlers.insert(
                            token_name.clone(),
                            Handler::LeafMark {
                                mark_type,
                                attrs: attrs.clone(),
                            },
                        );
                    } else {
                        handlers.insert(
                            format!("{}_open", token_name),
                            Handler::OpenMark {
                                mark_type: mark_type.clone(),
                                attrs: attrs.clone(),
                            },
                        );
                        handlers.insert(
                            format!("{}_close", token_name),
                            Handler::CloseMark { mark_type },
                        );
                    }
                }
                TokenSpec::Ignore { leaf } => {
                    if *leaf {
                        handlers.insert(token_name.clone(), Handler::Ignore);
                    } else {
                        handlers.insert(format!("{}_open", token_name), Handler::Ignore);
                        handlers.insert(format!("{}_close", token_name), Handler::Ignore);
                    }
                }
            }
        }

        // Built-ins. The softbreak handler stays overridable by the table.
        handlers.insert(tokens::TEXT.to_string(), Handler::Text);
        handlers.insert(tokens::INLINE.to_string(), Handler::Inline);
        handlers
            .entry(tokens::SOFTBREAK.to_string())
            .or_insert(Handler::Softbreak);

        Ok(TreeBuilder { schema, handlers })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Convert a token stream into one document node. Frames left open by
    /// partial input are closed at the end; an input that yields no root
    /// node at all falls back to a minimal empty document.
    pub fn parse(&self, stream: &[Token]) -> Result<Node, ParseError> {
        let mut state = ParseState::new(&self.schema)
            .ok_or_else(|| ParseError::UnknownType(self.schema.top_node().to_string()))?;
        self.parse_tokens(&mut state, stream)?;

        let mut doc = None;
        while state.stack_depth() > 0 {
            if let Some(node) = state.close_node() {
                doc = Some(node);
            }
        }
        Ok(doc.unwrap_or_else(|| self.schema.empty_document()))
    }

    fn parse_tokens(&self, state: &mut ParseState<'_>, stream: &[Token]) -> Result<(), ParseError> {
        for token in stream {
            let handler = self
                .handlers
                .get(&token.name)
                .ok_or_else(|| ParseError::UnknownToken(token.name.clone()))?;
            match handler {
                Handler::OpenNode { node_type, attrs } => {
                    state.open_node(node_type.clone(), attrs.resolve(token));
                }
                Handler::CloseNode => {
                    state.close_node();
                }
                Handler::LeafNode { node_type, attrs } => {
                    state.open_node(node_type.clone(), attrs.resolve(token));
                    state.add_text(without_trailing_newline(&token.content));
                    state.close_node();
                }
                Handler::OpenMark { mark_type, attrs } => {
                    state.open_mark(mark_type.create(attrs.resolve(token)));
                }
                Handler::CloseMark { mark_type } => {
                    state.close_mark(&mark_type.name);
                }
                Handler::LeafMark { mark_type, attrs } => {
                    state.open_mark(mark_type.create(attrs.resolve(token)));
                    state.add_text(without_trailing_newline(&token.content));
                    state.close_mark(&mark_type.name);
                }
                Handler::Ignore => {}
                Handler::Text => state.add_text(&token.content),
                Handler::Inline => self.parse_tokens(state, &token.children)?,
                Handler::Softbreak => state.add_text("\n"),
            }
        }
        Ok(())
    }
}

/// Trim exactly one trailing line break, if present.
fn without_trailing_newline(content: &str) -> &str {
    content.strip_suffix('\n').unwrap_or(content)
}
