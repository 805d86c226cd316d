//! Parse state: the frame stack and active mark set
//!
//! One `ParseState` exists per parse call and is never shared. The bottom
//! frame is the document root, created up front; every other frame is
//! pushed by an opening token and popped by the matching close. Marks never
//! cross a node boundary: closing a node clears the active set.

use crate::fieldmark::ast::marks::same_set;
use crate::fieldmark::ast::{Attrs, Mark, Node};
use crate::fieldmark::schema::{NodeType, Schema};

/// A not-yet-finalized tree node under construction.
#[derive(Debug)]
struct Frame {
    node_type: NodeType,
    attrs: Attrs,
    children: Vec<Node>,
}

/// Mutable state for one token-stream-to-tree conversion.
pub struct ParseState<'s> {
    schema: &'s Schema,
    stack: Vec<Frame>,
    marks: Vec<Mark>,
}

impl<'s> ParseState<'s> {
    /// Start a parse with the schema's top node type as the root frame.
    /// `None` when the schema's top node is not registered.
    pub fn new(schema: &'s Schema) -> Option<Self> {
        let root = Frame {
            node_type: schema.top_node_type()?.clone(),
            attrs: Attrs::new(),
            children: Vec::new(),
        };
        Some(ParseState {
            schema,
            stack: vec![root],
            marks: Vec::new(),
        })
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Push a new frame; subsequent content goes into it.
    pub fn open_node(&mut self, node_type: NodeType, attrs: Attrs) {
        self.stack.push(Frame {
            node_type,
            attrs,
            children: Vec::new(),
        });
    }

    /// Pop the top frame and construct its node through the schema. A node
    /// that cannot satisfy its content constraints even after auto-fill is
    /// dropped. The built node is appended to the parent frame; when the
    /// popped frame was the root, the node is returned instead.
    pub fn close_node(&mut self) -> Option<Node> {
        self.marks.clear();
        let frame = self.stack.pop()?;
        let node = self
            .schema
            .create_and_fill(&frame.node_type, frame.attrs, frame.children)?;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.children.push(node);
                None
            }
            None => Some(node),
        }
    }

    /// Append text under the current frame using the active mark set. When
    /// the frame's last child is a text run with an equal mark set, the runs
    /// merge into one node instead of fragmenting.
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        if let Some(Node::Text {
            text: last_text,
            marks: last_marks,
        }) = top.children.last_mut()
        {
            if same_set(last_marks, &self.marks) {
                last_text.push_str(text);
                return;
            }
        }
        top.children.push(Node::text(text, self.marks.clone()));
    }

    /// Activate a mark, replacing any active mark of the same name.
    pub fn open_mark(&mut self, mark: Mark) {
        mark.add_to_set(&mut self.marks);
    }

    /// Deactivate the mark with the given name.
    pub fn close_mark(&mut self, name: &str) {
        self.marks.retain(|m| m.name != name);
    }

    #[cfg(test)]
    pub(crate) fn active_marks(&self) -> &[Mark] {
        &self.marks
    }
}
