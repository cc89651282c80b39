//! Syntax Provider - the interface between a parser and the extractor
//!
//! The extractor never talks to tree-sitter directly. It consumes anything
//! implementing [`SyntaxNode`]:
//! - `kind` - grammar construct label, e.g. `function_definition`
//! - `start_byte`/`end_byte` - half-open range into the source buffer
//! - `children` - every child (named and anonymous) in source order
//! - `field_name` - grammar field the node occupies in its parent
//!
//! [`TreeSitterNode`] adapts tree-sitter trees, [`OwnedNode`] holds a detached
//! copy that can be built by hand or serialized.

pub mod node;
pub mod registry;

pub use node::{OwnedNode, TreeSitterNode};
pub use registry::ParserRegistry;

/// A node of a syntax tree as seen by the extractor.
pub trait SyntaxNode: Sized {
    /// Grammar kind label
    fn kind(&self) -> &str;

    /// Start of the node's byte range (inclusive)
    fn start_byte(&self) -> usize;

    /// End of the node's byte range (exclusive)
    fn end_byte(&self) -> usize;

    /// All children in source order
    fn children(&self) -> Vec<Self>;

    /// Field name under which this node sits in its parent, if the grammar names one
    fn field_name(&self) -> Option<&str> {
        None
    }
}
