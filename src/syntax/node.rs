//! Syntax node implementations

use super::SyntaxNode;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tree_sitter::{Node, Tree};

/// A tree-sitter node together with the field name it occupies in its parent.
///
/// tree-sitter only exposes field names while walking with a cursor, so the
/// field is captured when the parent enumerates its children.
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterNode<'tree> {
    node: Node<'tree>,
    field: Option<&'static str>,
}

impl<'tree> TreeSitterNode<'tree> {
    /// Wrap the root node of a parsed tree
    pub fn root(tree: &'tree Tree) -> Self {
        Self::new(tree.root_node())
    }

    /// Wrap an arbitrary node (no field information)
    pub fn new(node: Node<'tree>) -> Self {
        Self { node, field: None }
    }

    /// The underlying tree-sitter node
    pub fn node(&self) -> Node<'tree> {
        self.node
    }
}

impl SyntaxNode for TreeSitterNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn start_byte(&self) -> usize {
        self.node.start_byte()
    }

    fn end_byte(&self) -> usize {
        self.node.end_byte()
    }

    fn children(&self) -> Vec<Self> {
        let mut children = Vec::with_capacity(self.node.child_count());
        let mut cursor = self.node.walk();
        if cursor.goto_first_child() {
            loop {
                children.push(Self {
                    node: cursor.node(),
                    field: cursor.field_name(),
                });
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        children
    }

    fn field_name(&self) -> Option<&str> {
        self.field
    }
}

/// A detached, owned syntax node.
///
/// Built by hand for trees coming from providers other than tree-sitter, or
/// captured from any [`SyntaxNode`] for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedNode {
    pub kind: String,
    pub start_byte: usize,
    pub end_byte: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OwnedNode>,
}

impl OwnedNode {
    /// Create a childless node spanning `range`
    pub fn new(kind: impl Into<String>, range: Range<usize>) -> Self {
        Self {
            kind: kind.into(),
            start_byte: range.start,
            end_byte: range.end,
            field: None,
            children: Vec::new(),
        }
    }

    /// Create a node spanning from its first child's start to its last child's end
    pub fn branch(kind: impl Into<String>, children: Vec<OwnedNode>) -> Self {
        let start = children.first().map(|c| c.start_byte).unwrap_or(0);
        let end = children.last().map(|c| c.end_byte).unwrap_or(start);
        Self::new(kind, start..end).with_children(children)
    }

    /// Set the grammar field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the children
    pub fn with_children(mut self, children: Vec<OwnedNode>) -> Self {
        self.children = children;
        self
    }

    /// Copy a node and its whole subtree out of another provider
    pub fn capture<N: SyntaxNode>(node: &N) -> Self {
        Self {
            kind: node.kind().to_string(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            field: node.field_name().map(str::to_string),
            children: node.children().iter().map(Self::capture).collect(),
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OwnedNode::size).sum::<usize>()
    }
}

impl<'a> SyntaxNode for &'a OwnedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn start_byte(&self) -> usize {
        self.start_byte
    }

    fn end_byte(&self) -> usize {
        self.end_byte
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a OwnedNode = *self;
        node.children.iter().collect()
    }

    fn field_name(&self) -> Option<&str> {
        self.field.as_deref()
    }
}
