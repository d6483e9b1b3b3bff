//! Reading and editing ckv files
//!
//! ckv is a small line-oriented configuration format. Keys and values are
//! separated by `=`, and a key with an empty value opens a block whose
//! children are indented one tab deeper:
//!
//! ```text
//! name = demo
//! server =
//! 	host = localhost
//! 	port = 8080
//! ```
//!
//! Values are addressed by dotted path (`server.port`). Edits rewrite only
//! the lines they touch.

pub mod diff;
pub mod document;
pub mod edit;
pub mod error;
pub mod file;
pub mod io;
pub mod line;
pub mod node;
pub mod options;
pub mod parser;
pub mod path;
pub mod report;

pub use document::Document;
pub use edit::{Edit, EditKind};
pub use error::{Error, ErrorKind, Result};
pub use file::ConfigFile;
pub use node::{Node, NodeKind};
pub use options::{Nesting, ParseOptions};
pub use path::KeyPath;
