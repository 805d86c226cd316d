//! Inline marks and mark-set operations
//!
//! A mark is a named style (emphasis, strong, link, ...) with optional
//! attributes. The tree builder keeps an *active mark set*: an ordered list,
//! unique by mark name, describing the styles in effect at the current text
//! position. Insertion order is preserved because it matters for nested
//! rendering, but set equality ignores it.

use super::node::Attrs;
use serde::{Deserialize, Serialize};

/// A named text style with optional attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(name: impl Into<String>) -> Self {
        Mark {
            name: name.into(),
            attrs: Attrs::new(),
        }
    }

    pub fn with_attrs(name: impl Into<String>, attrs: Attrs) -> Self {
        Mark {
            name: name.into(),
            attrs,
        }
    }

    /// Add this mark to the set, replacing any existing mark of the same
    /// name in place (its position in the ordering is kept).
    pub fn add_to_set(self, set: &mut Vec<Mark>) {
        match set.iter_mut().find(|m| m.name == self.name) {
            Some(existing) => *existing = self,
            None => set.push(self),
        }
    }

    /// Remove every mark of this mark's name from the set.
    pub fn remove_from_set(&self, set: &mut Vec<Mark>) {
        set.retain(|m| m.name != self.name);
    }
}

/// Compare two mark sets for equality as sets: same length and every mark of
/// `a` (name and attributes) present in `b`. Ordering is ignored.
pub fn same_set(a: &[Mark], b: &[Mark]) -> bool {
    a.len() == b.len() && a.iter().all(|m| b.contains(m))
}
