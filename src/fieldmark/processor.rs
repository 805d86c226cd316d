//! File processing API for the fieldmark format
//!
//! This module glues the pipeline together: source text is tokenized, the
//! token stream is folded into a document tree, and either stage can be
//! rendered in several output formats. The CLI is a thin wrapper around
//! this module.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::fieldmark::ast::{treeviz, Node};
use crate::fieldmark::lexer::{self, Token};
use crate::fieldmark::parser::{ParseError, TokenSpec, TreeBuilder, DEFAULT_TOKEN_SPECS};
use crate::fieldmark::schema::{Schema, DEFAULT_SCHEMA};

/// Output format for a parsed document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Treeviz,
}

impl OutputFormat {
    pub fn from_string(format: &str) -> Result<Self, ProcessingError> {
        match format {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "tree" | "treeviz" => Ok(OutputFormat::Treeviz),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Output format for a raw token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    Json,
    Debug,
}

impl TokenFormat {
    pub fn from_string(format: &str) -> Result<Self, ProcessingError> {
        match format {
            "json" => Ok(TokenFormat::Json),
            "debug" => Ok(TokenFormat::Debug),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Errors that can occur while processing a file or source string.
#[derive(Debug)]
pub enum ProcessingError {
    FileRead(String),
    Parse(ParseError),
    InvalidFormat(String),
    Serialization(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileRead(msg) => write!(f, "Failed to read file: {}", msg),
            ProcessingError::Parse(err) => write!(f, "{}", err),
            ProcessingError::InvalidFormat(name) => write!(f, "Unknown format '{}'", name),
            ProcessingError::Serialization(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for ProcessingError {}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

/// End-to-end parser for one schema and token table.
pub struct Processor {
    builder: TreeBuilder,
}

impl Processor {
    /// Processor for the default fieldmark schema and token table.
    pub fn new() -> Result<Self, ParseError> {
        Processor::with(DEFAULT_SCHEMA.clone(), &DEFAULT_TOKEN_SPECS)
    }

    /// Processor for a custom schema and token table.
    pub fn with(schema: Schema, specs: &[(String, TokenSpec)]) -> Result<Self, ParseError> {
        Ok(Processor {
            builder: TreeBuilder::new(schema, specs)?,
        })
    }

    /// Parse source text into a document tree.
    pub fn parse(&self, source: &str) -> Result<Node, ParseError> {
        let stream = lexer::tokenize(source);
        self.builder.parse(&stream)
    }

    /// Parse source text and render the document in the given format.
    pub fn render(&self, source: &str, format: OutputFormat) -> Result<String, ProcessingError> {
        let doc = self.parse(source)?;
        render_document(&doc, format)
    }

    /// Parse a file and render the document in the given format.
    pub fn render_file(
        &self,
        path: impl AsRef<Path>,
        format: OutputFormat,
    ) -> Result<String, ProcessingError> {
        let source = read_source(path)?;
        self.render(&source, format)
    }
}

/// Parse source text with the default schema and token table.
pub fn parse_document(source: &str) -> Result<Node, ParseError> {
    Processor::new()?.parse(source)
}

/// Render a document tree in the given format.
pub fn render_document(doc: &Node, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(doc)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(doc).map_err(|e| ProcessingError::Serialization(e.to_string()))
        }
        OutputFormat::Treeviz => Ok(treeviz::to_treeviz_str(doc)),
    }
}

/// Tokenize source text and render the token stream in the given format.
pub fn render_tokens(source: &str, format: TokenFormat) -> Result<String, ProcessingError> {
    let stream: Vec<Token> = lexer::tokenize(source);
    match format {
        TokenFormat::Json => serde_json::to_string_pretty(&stream)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        TokenFormat::Debug => Ok(format!("{:#?}", stream)),
    }
}

/// Tokenize a file and render the token stream in the given format.
pub fn render_tokens_file(
    path: impl AsRef<Path>,
    format: TokenFormat,
) -> Result<String, ProcessingError> {
    let source = read_source(path)?;
    render_tokens(&source, format)
}

fn read_source(path: impl AsRef<Path>) -> Result<String, ProcessingError> {
    fs::read_to_string(path.as_ref()).map_err(|e| {
        ProcessingError::FileRead(format!("{}: {}", path.as_ref().display(), e))
    })
}
