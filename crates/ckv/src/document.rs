//! In-memory ckv document
//!
//! A [`Document`] keeps the source lines it was parsed from next to the
//! node tree. Mutations splice those lines, so everything a mutation does
//! not touch is written back byte for byte.

use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::line::{LineEnding, LineKind, SourceLine, classify, render_value, split_lines};
use crate::node::{Node, NodeKind, walk};
use crate::options::ParseOptions;
use crate::parser::parse_document;
use crate::path::{self, KeyPath};

/// A parsed ckv document.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<SourceLine>,
    nodes: Vec<Node>,
    options: ParseOptions,
}

impl Document {
    /// Parse with the default grammar options.
    ///
    /// ```
    /// use ckv::Document;
    ///
    /// let doc = Document::parse("a = 1\nb =\n\tc = 2\n").unwrap();
    /// assert_eq!(doc.get("b.c").unwrap(), "2");
    /// ```
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_with(source, ParseOptions::default())
    }

    pub fn parse_with(source: &str, options: ParseOptions) -> Result<Self> {
        let lines = split_lines(source);
        let nodes = parse_document(&lines, &options)?;
        Ok(Self {
            lines,
            nodes,
            options,
        })
    }

    /// Parse raw file content.
    ///
    /// Bytes that are not valid UTF-8 are an `InvalidCharacter` on the line
    /// that holds them, unless an earlier line already fails to parse.
    pub fn from_bytes(bytes: &[u8], options: ParseOptions) -> Result<Self> {
        match std::str::from_utf8(bytes) {
            Ok(source) => Self::parse_with(source, options),
            Err(e) => {
                let valid = String::from_utf8_lossy(&bytes[..e.valid_up_to()]);
                let line = valid.matches('\n').count() + 1;
                let complete = valid.rfind('\n').map_or("", |i| &valid[..=i]);
                Self::parse_with(complete, options)?;
                Err(Error::InvalidCharacter {
                    ch: char::REPLACEMENT_CHARACTER,
                    line: Some(line),
                })
            }
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Top-level nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The source text, including any edits made so far.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            out.push_str(line.ending.as_str());
        }
        out
    }

    /// Write the document to `sink`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.render().as_bytes())
            .map_err(Error::output)?;
        sink.flush().map_err(Error::output)
    }

    /// The last node, in document order, whose full path is `path`.
    pub fn find(&self, path: &KeyPath) -> Option<&Node> {
        let mut found = None;
        walk(&self.nodes, &mut |keys, node| {
            if path.matches(keys) {
                found = Some(node);
            }
        });
        found
    }

    pub fn contains(&self, path: impl Into<KeyPath>) -> bool {
        self.find(&path.into()).is_some()
    }

    /// Look up a leaf's value.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if no node has this path, `NoValueFoundForKey` if the
    /// path names a block.
    pub fn get(&self, path: impl Into<KeyPath>) -> Result<&str> {
        let path = path.into();
        let node = self
            .find(&path)
            .ok_or_else(|| Error::key_not_found(path.to_string()))?;
        node.value().ok_or_else(|| Error::no_value(path.to_string()))
    }

    /// Every leaf as a `(dotted path, value)` pair, in document order.
    ///
    /// Duplicate paths are all listed.
    pub fn leaves(&self) -> Vec<(String, String)> {
        let mut leaves = Vec::new();
        walk(&self.nodes, &mut |keys, node| {
            if let Some(value) = node.value() {
                leaves.push((path::join(keys), value.to_string()));
            }
        });
        leaves
    }

    /// Flatten into a map keyed by dotted path.
    ///
    /// Blocks contribute no entry of their own. When a path occurs more
    /// than once the last occurrence wins, so a block drops an earlier leaf
    /// with the same path, the same way [`get`](Self::get) resolves it.
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        walk(&self.nodes, &mut |keys, node| {
            let key = path::join(keys);
            match node.value() {
                Some(value) => {
                    if let Some(previous) = map.insert(key.clone(), value.to_string()) {
                        tracing::warn!(key = %key, shadowed = %previous, "Duplicate key, keeping the later value");
                    }
                }
                None => {
                    if let Some(previous) = map.remove(&key) {
                        tracing::warn!(key = %key, shadowed = %previous, "Block shadows an earlier value");
                    }
                }
            }
        });
        map
    }

    /// Replace the value of the leaf at `path`.
    ///
    /// The line is rewritten as `<indentation><key> = <value>`, keeping its
    /// line ending. Setting the current value is a no-op and leaves the line
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the path is absent, `NoValueFoundForKey` if it names
    /// a block, `InvalidCharacter` if `value` holds a tab or other control
    /// character. Errors about `value` itself carry no line.
    pub fn set_value(&mut self, path: impl Into<KeyPath>, value: &str) -> Result<Edit> {
        let path = path.into();
        let node = self
            .find(&path)
            .ok_or_else(|| Error::key_not_found(path.to_string()))?;
        let NodeKind::Leaf(scalar) = node.kind() else {
            return Err(Error::no_value(path.to_string()));
        };

        let index = node.line_range().start;
        let line = index + 1;
        let old_line = self.lines[index].text.clone();

        if scalar.value == value {
            return Ok(Edit::replace(path.to_string(), index, old_line.clone(), old_line));
        }
        if let Some(ch) = value.chars().find(|c| c.is_control()) {
            return Err(Error::InvalidCharacter { ch, line: None });
        }

        let depth = old_line.bytes().take_while(|b| *b == b'\t').count();
        let token = render_value(value, scalar.quoted, &self.options);
        let new_line = format!("{}{} = {}", &old_line[..depth], node.key(), token);

        match classify(&new_line, line, &self.options).map(|c| c.kind) {
            Ok(LineKind::Entry { scalar: written, .. }) if written.value == value => {}
            Ok(LineKind::Opener { .. }) => return Err(Error::no_value(path.to_string())),
            _ => {
                let ch = value.chars().find(|c| *c == '=').unwrap_or(' ');
                return Err(Error::InvalidCharacter { ch, line: None });
            }
        }

        let mut lines = self.lines.clone();
        lines[index].text = new_line.clone();
        self.commit(lines)?;

        tracing::debug!(path = %path, line, "Set value");
        Ok(Edit::replace(path.to_string(), index, old_line, new_line))
    }

    /// Remove the node at `path`, with its whole subtree if it is a block.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the path is absent.
    pub fn remove(&mut self, path: impl Into<KeyPath>) -> Result<Edit> {
        let path = path.into();
        let span = self
            .find(&path)
            .ok_or_else(|| Error::key_not_found(path.to_string()))?
            .line_range();

        let mut lines = self.lines.clone();
        let removed: Vec<SourceLine> = lines.drain(span.clone()).collect();

        // Removing the tail of a file without a final newline keeps it that way.
        if span.end == self.lines.len() {
            let unterminated = removed
                .last()
                .is_some_and(|line| line.ending == LineEnding::None);
            if let (true, Some(last)) = (unterminated, lines.last_mut()) {
                last.ending = LineEnding::None;
            }
        }

        let old_content: String = removed
            .iter()
            .map(|line| format!("{}{}", line.text, line.ending.as_str()))
            .collect();
        self.commit(lines)?;

        tracing::debug!(path = %path, lines = span.len(), "Removed node");
        Ok(Edit::delete(path.to_string(), span, old_content))
    }

    /// Swap in edited lines once they parse.
    fn commit(&mut self, lines: Vec<SourceLine>) -> Result<()> {
        let nodes = parse_document(&lines, &self.options)?;
        self.lines = lines;
        self.nodes = nodes;
        Ok(())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
