//! Main module for fieldmark library functionality

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod schema;
