//! Grammar options

use serde::{Deserialize, Serialize};

/// How far a block's children may be indented below their opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nesting {
    /// Children sit exactly one tab deeper than the opener.
    #[default]
    Strict,
    /// Children may sit at any deeper depth; the first child fixes it.
    Lenient,
}

/// Tunable parts of the ckv grammar.
///
/// Deserializable so an embedding application can keep these next to its
/// own settings. Missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub nesting: Nesting,
    /// Treat a value starting with `"` as a quoted string.
    pub quoted_values: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            nesting: Nesting::Strict,
            quoted_values: true,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nesting(mut self, nesting: Nesting) -> Self {
        self.nesting = nesting;
        self
    }

    pub fn with_quoted_values(mut self, quoted_values: bool) -> Self {
        self.quoted_values = quoted_values;
        self
    }
}
