//! Token-stream to document-tree construction
//!
//!     The parser consumes the flat token stream produced by the lexer and
//!     reconstructs a typed document tree. It is driven by a declarative
//!     table mapping token base names to handling strategies (structural
//!     node, mark, or ignore, each in a leaf or paired flavor); the table is
//!     resolved once, at builder construction, into concrete handlers.
//!
//!     Tree reconstruction is a stack machine: open tokens push frames,
//!     close tokens pop and finalize them through the schema, text tokens
//!     append runs styled with the currently active mark set.

pub mod builder;
pub mod spec;
pub mod state;

pub use builder::{ParseError, TreeBuilder};
pub use spec::{AttrSource, TokenSpec, DEFAULT_TOKEN_SPECS};
pub use state::ParseState;
