//! Dotted key paths
//!
//! A key path names a node by the keys on the way down to it, rendered
//! externally joined with `.`:
//!
//! ```
//! use ckv::KeyPath;
//!
//! let path = KeyPath::parse("server.tls.cert");
//! assert_eq!(path.segments(), ["server", "tls", "cert"]);
//! assert_eq!(path.to_string(), "server.tls.cert");
//! ```

use std::fmt;

/// An ordered sequence of key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a dotted path into segments.
    ///
    /// Empty segments are kept. Keys are never empty, so a path such as
    /// `a..b` simply matches nothing.
    pub fn parse(path: &str) -> Self {
        Self::new(path.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this path names the node reached through `keys`.
    pub fn matches(&self, keys: &[&str]) -> bool {
        self.segments.len() == keys.len()
            && self.segments.iter().zip(keys).all(|(a, b)| a == b)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for KeyPath {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&String> for KeyPath {
    fn from(s: &String) -> Self {
        Self::parse(s)
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(p: &KeyPath) -> Self {
        p.clone()
    }
}

/// Join keys the way flattened map entries are keyed.
pub fn join(keys: &[&str]) -> String {
    keys.join(".")
}
