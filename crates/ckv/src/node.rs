//! Parsed document tree

use std::ops::Range;

use crate::line::Scalar;

/// A key declared on one line, either holding a value or opening a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: String,
    /// 0-based line indices covered by this node and all of its descendants.
    lines: Range<usize>,
    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(Scalar),
    Block(Vec<Node>),
}

impl Node {
    pub(crate) fn leaf(key: String, index: usize, scalar: Scalar) -> Self {
        Self {
            key,
            lines: index..index + 1,
            kind: NodeKind::Leaf(scalar),
        }
    }

    pub(crate) fn block(key: String, index: usize, children: Vec<Node>) -> Self {
        let end = children.last().map_or(index + 1, |child| child.lines.end);
        Self {
            key,
            lines: index..end,
            kind: NodeKind::Block(children),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 1-based line on which the key is declared.
    pub fn line(&self) -> usize {
        self.lines.start + 1
    }

    /// 0-based line indices spanned by the node's subtree.
    pub fn line_range(&self) -> Range<usize> {
        self.lines.clone()
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The scalar value, for leaves.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(scalar) => Some(&scalar.value),
            NodeKind::Block(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Block(children) => children,
        }
    }
}

/// Depth-first, document-order walk over `nodes`.
///
/// `visit` receives the keys from the root down to each node, the node's
/// own key included.
pub fn walk<'a, F>(nodes: &'a [Node], visit: &mut F)
where
    F: FnMut(&[&'a str], &'a Node),
{
    fn inner<'a, F>(nodes: &'a [Node], keys: &mut Vec<&'a str>, visit: &mut F)
    where
        F: FnMut(&[&'a str], &'a Node),
    {
        for node in nodes {
            keys.push(node.key());
            visit(keys.as_slice(), node);
            inner(node.children(), keys, visit);
            keys.pop();
        }
    }

    inner(nodes, &mut Vec::new(), visit);
}
