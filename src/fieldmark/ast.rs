//! Document tree model
//!
//! This module defines the typed tree produced by the tree builder: text
//! leaves carrying mark sets, and element nodes carrying attributes and
//! ordered children. The model is deliberately plain data; validation of
//! content constraints lives in the schema module.

pub mod marks;
pub mod node;
pub mod treeviz;

pub use marks::Mark;
pub use node::{Attrs, Node};
