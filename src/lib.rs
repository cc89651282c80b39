//! # sigscan - Function signature extraction
//!
//! Walks syntax trees produced by tree-sitter and reconstructs the signature
//! of every function-like construct as a [`FunctionRecord`].
//!
//! sigscan provides:
//! - A grammar-independent [`SyntaxNode`] interface with a tree-sitter adapter
//! - Per-language node-kind translation tables for C, Python, JavaScript, Java and Go
//! - A pre-order extractor that keeps nested functions as separate records
//! - File discovery and parallel per-file batch analysis

pub mod language;
pub mod syntax;
pub mod extractor;
pub mod discovery;
pub mod analyzer;
pub mod report;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use language::Language;
pub use syntax::{OwnedNode, ParserRegistry, SyntaxNode, TreeSitterNode};
pub use extractor::{ExtractOptions, Extractor, FieldStrategy, FunctionRecord, KindProfile, KindTable, NodeCategory};
pub use discovery::{DiscoveryOptions, LanguageSource, SourceFile};
pub use analyzer::{Analyzer, FileOutcome};

/// Result type alias for sigscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sigscan operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid UTF-8 in byte range {start}..{end}: {source}")]
    Decode {
        start: usize,
        end: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Malformed syntax tree: {0}")]
    MalformedTree(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
