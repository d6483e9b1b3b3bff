//! Recursive block parser
//!
//! Lines are classified lazily as the parser reaches them, so the error
//! reported is always the first offending line in source order.

use crate::error::{Error, Result};
use crate::line::{Classified, LineKind, SourceLine, classify};
use crate::node::Node;
use crate::options::{Nesting, ParseOptions};

/// Parse the whole document, starting at depth 0.
pub fn parse_document(lines: &[SourceLine], options: &ParseOptions) -> Result<Vec<Node>> {
    let mut parser = Parser::new(lines, options);
    let nodes = parser.parse_block(0)?;
    tracing::debug!(lines = lines.len(), nodes = nodes.len(), "Parsed ckv document");
    Ok(nodes)
}

struct Parser<'a> {
    lines: &'a [SourceLine],
    options: &'a ParseOptions,
    pos: usize,
    /// Next non-blank line, classified but not yet consumed.
    pending: Option<(usize, Classified)>,
    seen_key: bool,
}

impl<'a> Parser<'a> {
    fn new(lines: &'a [SourceLine], options: &'a ParseOptions) -> Self {
        Self {
            lines,
            options,
            pos: 0,
            pending: None,
            seen_key: false,
        }
    }

    /// Index and depth of the next non-blank line.
    fn peek(&mut self) -> Result<Option<(usize, usize)>> {
        while self.pending.is_none() && self.pos < self.lines.len() {
            let index = self.pos;
            self.pos += 1;
            let line = classify(&self.lines[index].text, index + 1, self.options)?;
            if !line.is_blank() {
                self.pending = Some((index, line));
            }
        }
        Ok(self.pending.as_ref().map(|(index, line)| (*index, line.depth)))
    }

    /// Consume the sibling lines at `depth`, recursing into nested blocks.
    ///
    /// Stops at the first line shallower than `depth` or at end of input.
    fn parse_block(&mut self, depth: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while let Some((index, line_depth)) = self.peek()? {
            if line_depth < depth {
                break;
            }
            if line_depth > depth {
                return Err(Error::ValueWithoutAKey { line: index + 1 });
            }
            let Some((index, line)) = self.pending.take() else {
                break;
            };

            match line.kind {
                LineKind::Entry { key, scalar } => {
                    self.seen_key = true;
                    nodes.push(Node::leaf(key, index, scalar));
                }
                LineKind::Opener { key } => {
                    self.seen_key = true;
                    let children = match self.child_depth(depth)? {
                        Some(child_depth) => self.parse_block(child_depth)?,
                        None => Vec::new(),
                    };
                    nodes.push(Node::block(key, index, children));
                }
                LineKind::Bare if !self.seen_key => {
                    return Err(Error::ValueWithoutAKey { line: index + 1 });
                }
                LineKind::Bare => return Err(Error::MissingEqualTo { line: index + 1 }),
                LineKind::Blank => {}
            }
        }

        Ok(nodes)
    }

    /// Depth of the block opened at `depth`, or `None` if it has no children.
    fn child_depth(&mut self, depth: usize) -> Result<Option<usize>> {
        Ok(match self.peek()? {
            Some((_, next)) if next > depth => Some(match self.options.nesting {
                Nesting::Strict => depth + 1,
                Nesting::Lenient => next,
            }),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::line::split_lines;

    fn parse(source: &str) -> Result<Vec<Node>> {
        parse_document(&split_lines(source), &ParseOptions::default())
    }

    #[test]
    fn test_nested_blocks() {
        let nodes = parse("a = 1\nb =\n\tc = 2\n\td =\n\t\te = 3\nf = 4\n").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].key(), "b");
        assert_eq!(nodes[1].children().len(), 2);
        assert_eq!(nodes[1].line_range(), 1..5);
        assert_eq!(nodes[1].children()[1].children()[0].value(), Some("3"));
        assert_eq!(nodes[2].line(), 6);
    }

    #[test]
    fn test_empty_block() {
        let nodes = parse("a =\nb = 1\n").unwrap();
        assert!(nodes[0].children().is_empty());
        assert!(!nodes[0].is_leaf());
        assert_eq!(nodes[0].line_range(), 0..1);
    }

    #[test]
    fn test_blank_lines_inside_block() {
        let nodes = parse("b =\n\tc = 1\n\n\t\n\td = 2\n\ne = 3\n").unwrap();
        assert_eq!(nodes[0].children().len(), 2);
        assert_eq!(nodes[0].line_range(), 0..5);
        assert_eq!(nodes[1].line(), 7);
    }

    #[test]
    fn test_indent_under_leaf() {
        let err = parse("a = 1\n\tb = 2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueWithoutAKey);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_skipped_level_strict() {
        let err = parse("a =\n\t\tb = 2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueWithoutAKey);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_skipped_level_lenient() {
        let options = ParseOptions::default().with_nesting(Nesting::Lenient);
        let nodes = parse_document(&split_lines("a =\n\t\tb = 2\n\t\tc = 3\n"), &options).unwrap();
        assert_eq!(nodes[0].children().len(), 2);

        let err = parse_document(&split_lines("a =\n\t\tb = 2\n\tc = 3\n"), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueWithoutAKey);
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_bare_line() {
        let err = parse("oops\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueWithoutAKey);

        let err = parse("a = 1\noops\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEqualTo);
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_first_error_wins() {
        let err = parse("a = 1\n\tb = 2\n= 3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueWithoutAKey);
        assert_eq!(err.line(), Some(2));
    }
}
