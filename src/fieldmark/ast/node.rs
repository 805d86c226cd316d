//! AST node type definitions
//!
//! A document is a single root `Node`. Interior nodes are `Element`s with a
//! type name, attributes, and ordered children; leaves are `Text` runs with
//! the set of marks that applied at that position.

use super::marks::Mark;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute map shared by nodes, marks, and tokens.
///
/// Ordered so that serialized output is deterministic.
pub type Attrs = BTreeMap<String, serde_json::Value>;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// A text run with the marks that were active when it was added.
    Text { text: String, marks: Vec<Mark> },
    /// A structural node with a schema type name, attributes, and children.
    Element {
        name: String,
        #[serde(default, skip_serializing_if = "Attrs::is_empty")]
        attrs: Attrs,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<Node>,
    },
}

impl Node {
    /// Create a text node with the given marks.
    pub fn text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// Create an element node.
    pub fn element(name: impl Into<String>, attrs: Attrs, children: Vec<Node>) -> Self {
        Node::Element {
            name: name.into(),
            attrs,
            children,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    /// The schema type name of an element, or `"text"` for text runs.
    pub fn name(&self) -> &str {
        match self {
            Node::Text { .. } => "text",
            Node::Element { name, .. } => name,
        }
    }

    /// Children of an element; empty slice for text runs.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Text { .. } => &[],
            Node::Element { children, .. } => children,
        }
    }

    /// Concatenated text content of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::Element { children, .. } => {
                children.iter().map(Node::text_content).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node_name() {
        let node = Node::text("hello", Vec::new());
        assert_eq!(node.name(), "text");
        assert!(node.is_text());
    }

    #[test]
    fn test_element_children_access() {
        let node = Node::element(
            "paragraph",
            Attrs::new(),
            vec![Node::text("a", Vec::new()), Node::text("b", Vec::new())],
        );
        assert_eq!(node.children().len(), 2);
        assert_eq!(node.text_content(), "ab");
    }

    #[test]
    fn test_text_content_recurses() {
        let node = Node::element(
            "doc",
            Attrs::new(),
            vec![Node::element(
                "paragraph",
                Attrs::new(),
                vec![Node::text("nested", Vec::new())],
            )],
        );
        assert_eq!(node.text_content(), "nested");
    }
}
