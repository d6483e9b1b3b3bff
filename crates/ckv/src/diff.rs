//! Line diffs between two renderings of a document
//!
//! Used to preview a mutation before writing it.

use similar::{ChangeTag, TextDiff};

/// A line that differs between the old and new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    /// `line` is 1-based in the old text.
    Removed { line: usize, content: String },
    /// `line` is 1-based in the new text.
    Added { line: usize, content: String },
}

/// Lines removed and added going from `old` to `new`.
pub fn preview(old: &str, new: &str) -> Vec<LineChange> {
    if old == new {
        return Vec::new();
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut changes = Vec::new();

    for change in text_diff.iter_all_changes() {
        let content = change.value().trim_end_matches(['\n', '\r']).to_string();
        match (change.tag(), change.old_index(), change.new_index()) {
            (ChangeTag::Delete, Some(index), _) => changes.push(LineChange::Removed {
                line: index + 1,
                content,
            }),
            (ChangeTag::Insert, _, Some(index)) => changes.push(LineChange::Added {
                line: index + 1,
                content,
            }),
            _ => {}
        }
    }

    changes
}

/// Unified diff of `old` against `new`, labelled with `name`.
pub fn unified(old: &str, new: &str, name: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}
