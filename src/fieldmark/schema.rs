//! Document schema: node and mark type registry
//!
//! The schema maps logical type names to node types (structural tree nodes)
//! and mark types (text styles). Node types carry a content kind and
//! attribute defaults; construction goes through [`Schema::create_and_fill`],
//! which validates the content kind, auto-fills minimal required structure,
//! and refuses (returns `None`) when the children cannot be made valid.

use crate::fieldmark::ast::{Attrs, Mark, Node};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// What a node type allows as children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// One or more block children. An empty child list is auto-filled with
    /// one empty default block.
    Blocks,
    /// Zero or more inline children (text runs and inline elements).
    Inline,
    /// No children at all.
    Empty,
}

/// A structural node type.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeType {
    pub name: String,
    pub content: ContentKind,
    /// Whether this node itself sits in inline content (e.g. a field span or
    /// a hard break) rather than in block content.
    pub inline: bool,
    /// Attribute defaults, merged under any attributes given at creation.
    pub attrs: Attrs,
}

impl NodeType {
    pub fn new(name: impl Into<String>, content: ContentKind) -> Self {
        NodeType {
            name: name.into(),
            content,
            inline: false,
            attrs: Attrs::new(),
        }
    }

    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }
}

/// A text style type.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkType {
    pub name: String,
    pub attrs: Attrs,
}

impl MarkType {
    pub fn new(name: impl Into<String>) -> Self {
        MarkType {
            name: name.into(),
            attrs: Attrs::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Create a mark of this type, merging the given attributes over the
    /// type's defaults.
    pub fn create(&self, attrs: Attrs) -> Mark {
        let mut merged = self.attrs.clone();
        merged.extend(attrs);
        Mark::with_attrs(self.name.clone(), merged)
    }
}

/// Result of looking a name up in the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    Node(&'a NodeType),
    Mark(&'a MarkType),
    NotFound,
}

/// Which content class a child node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChildClass {
    Block,
    Inline,
}

/// Registry of node and mark types for one document format.
#[derive(Debug, Clone)]
pub struct Schema {
    nodes: HashMap<String, NodeType>,
    marks: HashMap<String, MarkType>,
    top_node: String,
    /// Node type used to auto-fill empty block content.
    default_block: String,
}

impl Schema {
    pub fn new(
        nodes: Vec<NodeType>,
        marks: Vec<MarkType>,
        top_node: impl Into<String>,
        default_block: impl Into<String>,
    ) -> Self {
        Schema {
            nodes: nodes.into_iter().map(|n| (n.name.clone(), n)).collect(),
            marks: marks.into_iter().map(|m| (m.name.clone(), m)).collect(),
            top_node: top_node.into(),
            default_block: default_block.into(),
        }
    }

    /// Resolve a logical name to a node type, a mark type, or not-found.
    pub fn resolve(&self, name: &str) -> Resolved<'_> {
        if let Some(node) = self.nodes.get(name) {
            Resolved::Node(node)
        } else if let Some(mark) = self.marks.get(name) {
            Resolved::Mark(mark)
        } else {
            Resolved::NotFound
        }
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.nodes.get(name)
    }

    pub fn mark_type(&self, name: &str) -> Option<&MarkType> {
        self.marks.get(name)
    }

    /// Name of the document root type.
    pub fn top_node(&self) -> &str {
        &self.top_node
    }

    /// Name of the node type used to auto-fill empty block content.
    pub fn default_block(&self) -> &str {
        &self.default_block
    }

    /// The node type of the document root, when registered. `Schema::new`
    /// does not validate the name, so a misconfigured registry resolves to
    /// `None` here rather than panicking.
    pub fn top_node_type(&self) -> Option<&NodeType> {
        self.nodes.get(&self.top_node)
    }

    fn child_class(&self, child: &Node) -> Option<ChildClass> {
        match child {
            Node::Text { .. } => Some(ChildClass::Inline),
            Node::Element { name, .. } => {
                let node_type = self.nodes.get(name)?;
                if node_type.inline {
                    Some(ChildClass::Inline)
                } else {
                    Some(ChildClass::Block)
                }
            }
        }
    }

    /// An empty instance of the default block type, used as auto-fill.
    /// `None` when the default block type is not registered.
    fn block_filler(&self) -> Option<Node> {
        let node_type = self.nodes.get(&self.default_block)?;
        Some(Node::element(
            node_type.name.clone(),
            node_type.attrs.clone(),
            Vec::new(),
        ))
    }

    /// Construct a node of the given type, merging attribute defaults,
    /// validating the content kind, and auto-filling required structure.
    /// Returns `None` when the children cannot satisfy the content kind.
    pub fn create_and_fill(
        &self,
        node_type: &NodeType,
        attrs: Attrs,
        mut children: Vec<Node>,
    ) -> Option<Node> {
        let mut merged = node_type.attrs.clone();
        merged.extend(attrs);

        match node_type.content {
            ContentKind::Blocks => {
                for child in &children {
                    if self.child_class(child)? != ChildClass::Block {
                        return None;
                    }
                }
                if children.is_empty() {
                    children.push(self.block_filler()?);
                }
            }
            ContentKind::Inline => {
                for child in &children {
                    if self.child_class(child)? != ChildClass::Inline {
                        return None;
                    }
                }
            }
            ContentKind::Empty => {
                if !children.is_empty() {
                    return None;
                }
            }
        }

        Some(Node::element(node_type.name.clone(), merged, children))
    }

    /// A minimally valid empty document of the top node type. Falls back to
    /// a bare element when the registry cannot construct one.
    pub fn empty_document(&self) -> Node {
        let Some(top) = self.top_node_type().cloned() else {
            return Node::element(self.top_node.clone(), Attrs::new(), Vec::new());
        };
        self.create_and_fill(&top, Attrs::new(), Vec::new())
            .unwrap_or_else(|| Node::element(top.name.clone(), Attrs::new(), Vec::new()))
    }
}

/// The default fieldmark schema: a document of paragraphs, inline field
/// spans (holding their tokenized interior as inline content), hard breaks,
/// and the em / strong / code / link marks.
pub static DEFAULT_SCHEMA: Lazy<Schema> = Lazy::new(default_schema);

fn default_schema() -> Schema {
    let mut field_attrs = Attrs::new();
    field_attrs.insert("type".to_string(), serde_json::json!(""));
    field_attrs.insert("value".to_string(), serde_json::json!({}));
    field_attrs.insert("id".to_string(), serde_json::json!(""));

    let mut link_attrs = Attrs::new();
    link_attrs.insert("href".to_string(), serde_json::json!(""));
    link_attrs.insert("title".to_string(), serde_json::Value::Null);

    Schema::new(
        vec![
            NodeType::new("doc", ContentKind::Blocks),
            NodeType::new("paragraph", ContentKind::Inline),
            NodeType::new("field", ContentKind::Inline)
                .inline()
                .with_attrs(field_attrs),
            NodeType::new("hard_break", ContentKind::Empty).inline(),
        ],
        vec![
            MarkType::new("em"),
            MarkType::new("strong"),
            MarkType::new("code"),
            MarkType::new("link").with_attrs(link_attrs),
        ],
        "doc",
        "paragraph",
    )
}
