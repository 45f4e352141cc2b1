//! Core domain layer for blank.
//!
//! Pure logic over in-memory documents: no I/O, no codecs, no logging.
//! Decoding and reading files happen behind the ports in
//! [`crate::application`].
//!
//! - `document`: the tree value every format decodes into
//! - `path`: slash pointers and the single-key wrapping
//! - `merge`: the merge engine
//! - `patch`: one operation of an update run
//! - `search_path`: the makefile search directories

pub mod document;
pub mod error;
pub mod format;
pub mod merge;
pub mod patch;
pub mod path;
pub mod search_path;
pub mod strategy;
pub mod target;

pub use document::{Document, DocumentKind, Key, Mapping, Scalar};
pub use error::{DomainError, ErrorCategory};
pub use format::{Format, format_tokens, resolve_formats};
pub use merge::{merge, merge_into};
pub use patch::{FragmentRef, PatchSource, PatchSpec};
pub use path::{DocumentPath, resolve};
pub use search_path::{BLANK_PATH, SearchPath};
pub use strategy::{MergeStrategy, StrategyFlag};
pub use target::Target;
