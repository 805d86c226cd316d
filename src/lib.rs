//! # fieldmark
//!
//! A parser for markdown-like text with embedded `{{field}}` spans.
//!
//! The pipeline has two stages: a tokenizer that turns source text into a
//! flat stream of typed tokens (including the doubled-brace field spans),
//! and a tree builder that folds that stream into a typed document tree
//! driven by a declarative per-token handler table.

pub mod fieldmark;
