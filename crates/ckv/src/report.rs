//! Human-readable diagnostics

use std::path::Path;

use crate::error::Error;

/// Format an error raised on the file at `path`.
///
/// Line-bound errors read `<path>: Line <n>: <message>`, the rest
/// `<path>: <message>`.
pub fn render(path: &Path, err: &Error) -> String {
    match err.line() {
        Some(line) => format!("{}: Line {}: {}", path.display(), line, err),
        None => format!("{}: {}", path.display(), err),
    }
}
