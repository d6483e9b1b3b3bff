//! Edit records for document mutations.

use std::ops::Range;

/// The kind of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// A leaf's value was rewritten in place.
    Replace,
    /// A node's lines were deleted.
    Delete,
}

/// A change applied to a document's source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub kind: EditKind,
    /// Dotted path of the node that was changed.
    pub path: String,
    /// 0-based line indices affected, in the document before the edit.
    pub span: Range<usize>,
    pub old_content: String,
    pub new_content: String,
}

impl Edit {
    pub fn replace(
        path: impl Into<String>,
        index: usize,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            kind: EditKind::Replace,
            path: path.into(),
            span: index..index + 1,
            old_content: old_content.into(),
            new_content: new_content.into(),
        }
    }

    pub fn delete(path: impl Into<String>, span: Range<usize>, old_content: impl Into<String>) -> Self {
        Self {
            kind: EditKind::Delete,
            path: path.into(),
            span,
            old_content: old_content.into(),
            new_content: String::new(),
        }
    }

    /// Whether the edit left the text as it was.
    pub fn is_noop(&self) -> bool {
        self.kind == EditKind::Replace && self.old_content == self.new_content
    }

    /// 1-based number of the first affected line.
    pub fn line(&self) -> usize {
        self.span.start + 1
    }
}
