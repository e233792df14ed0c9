//! Format-preserving TOML patching.
//!
//! Edits a TOML document in place while every byte it does not touch stays
//! exactly as written: comments, spacing, quoting style, key order, line
//! endings. Only the assignments, keys, or sections named by a patch
//! change: the tool for a deployment pipeline that must flip a handful of
//! fields without clobbering a human-authored config.
//!
//! # Architecture
//!
//! The document is held as a sequence of physical lines, each keeping its
//! own terminator. Every operation re-indexes the section headers,
//! resolves its dotted path to an exact line span (quote-aware scanning
//! plus a small state machine for multi-line values), and splices in the
//! replacement lines. Semantic understanding of TOML is delegated to the
//! [`toml`] parser, used only to validate the whole document and to parse
//! value literals; the lexical model here never re-serializes untouched
//! content.
//!
//! # Example
//!
//! ```
//! use toml_patcher::{PatchBatch, SetPatch, TomlDocument};
//!
//! let mut doc = TomlDocument::parse("[server]\nport = 8080 # default\n")?;
//! let batch = PatchBatch {
//!     sets: vec![SetPatch::parse("server.port = 9090")?],
//!     ..PatchBatch::default()
//! };
//! doc.apply(&batch)?;
//! assert_eq!(doc.to_text(), "[server]\nport = 9090\n");
//! # Ok::<(), toml_patcher::PatchError>(())
//! ```

pub mod document;
pub mod errors;
pub mod format;
pub mod index;
pub mod locate;
pub mod ops;
pub mod path;
pub mod scan;
pub mod validator;

// Re-exports
pub use document::{PatchBatch, TomlDocument};
pub use errors::PatchError;
pub use index::{index_headers, Header, HeaderKind};
pub use locate::{locate_assignment, AssignmentSpan};
pub use ops::{DeleteKeyPatch, DeleteSectionPatch, SetPatch};
pub use path::{parse_path, PathSegment};
