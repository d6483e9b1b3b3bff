//! A ckv file bound to a path
//!
//! Every operation re-reads and re-parses the file; nothing is cached
//! between calls except the line of the most recent failure. No locking is
//! done: callers that share a file between writers must serialize access.

use std::cell::Cell;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::edit::Edit;
use crate::error::{Error, Result};
use crate::io;
use crate::options::ParseOptions;
use crate::report;

/// A ckv file on disk.
///
/// ```no_run
/// use ckv::ConfigFile;
///
/// let file = ConfigFile::new("server.ckv");
/// match file.get_value_for_key("server.port") {
///     Ok(port) => println!("port {port}"),
///     Err(e) => eprintln!("{}", file.report(&e)),
/// }
/// ```
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    options: ParseOptions,
    err_line: Cell<usize>,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ParseOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ParseOptions) -> Self {
        Self {
            path: path.into(),
            options,
            err_line: Cell::new(0),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Line of the most recent line-bound failure, or 0.
    ///
    /// Only problems in the file itself set it; a rejected value passed to
    /// a setter leaves it at 0. Reset at the start of every operation.
    pub fn err_line(&self) -> usize {
        self.err_line.get()
    }

    /// Read and parse the file.
    pub fn load(&self) -> Result<Document> {
        self.track(|| self.read())
    }

    pub fn get_value_for_key(&self, key: &str) -> Result<String> {
        self.track(|| Ok(self.read()?.get(key)?.to_string()))
    }

    pub fn import_to_map(&self) -> Result<HashMap<String, String>> {
        self.track(|| Ok(self.read()?.to_map()))
    }

    /// Set a leaf's value and write the whole document to `sink`.
    ///
    /// The bound file itself is not modified.
    pub fn set_value_for_key_to<W: Write + ?Sized>(
        &self,
        key: &str,
        value: &str,
        sink: &mut W,
    ) -> Result<Edit> {
        self.track(|| {
            let mut doc = self.read()?;
            let edit = doc.set_value(key, value)?;
            doc.write_to(sink)?;
            Ok(edit)
        })
    }

    /// Remove a node and write the whole document to `sink`.
    pub fn remove_key_to<W: Write + ?Sized>(&self, key: &str, sink: &mut W) -> Result<Edit> {
        self.track(|| {
            let mut doc = self.read()?;
            let edit = doc.remove(key)?;
            doc.write_to(sink)?;
            Ok(edit)
        })
    }

    /// Set a leaf's value in place.
    ///
    /// The file is replaced atomically, so a failure never leaves it
    /// half-written.
    pub fn set_value_for_key(&self, key: &str, value: &str) -> Result<Edit> {
        self.track(|| {
            let mut doc = self.read()?;
            let edit = doc.set_value(key, value)?;
            if edit.is_noop() {
                tracing::debug!(path = %self.path.display(), key, "Value unchanged, not rewriting");
                return Ok(edit);
            }
            io::write_atomic(&self.path, doc.render().as_bytes())?;
            Ok(edit)
        })
    }

    /// Remove a node in place, replacing the file atomically.
    pub fn remove_key(&self, key: &str) -> Result<Edit> {
        self.track(|| {
            let mut doc = self.read()?;
            let edit = doc.remove(key)?;
            io::write_atomic(&self.path, doc.render().as_bytes())?;
            Ok(edit)
        })
    }

    /// Human-readable message for an error raised on this file.
    pub fn report(&self, err: &Error) -> String {
        report::render(&self.path, err)
    }

    fn read(&self) -> Result<Document> {
        let bytes = io::read_source(&self.path)?;
        Document::from_bytes(&bytes, self.options)
    }

    fn track<T>(&self, op: impl FnOnce() -> Result<T>) -> Result<T> {
        self.err_line.set(0);
        let result = op();
        if let Err(e) = &result {
            self.err_line.set(e.line().unwrap_or(0));
        }
        result
    }
}
