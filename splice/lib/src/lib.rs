//! Marker-bounded text splicing.
//!
//! Finds the first start marker and the first end marker in a text file,
//! removes everything from the start marker through the `>` that closes the
//! end marker's tag, and puts replacement text in its place. The file is
//! rewritten in place.
//!
//! Matching is purely textual. Nothing here parses markup into a tree or
//! checks that the replacement is well-formed.
//!
//! ## Core Types
//!
//! - [`Markers`] - The literal start/end marker pair
//! - [`SpliceSpan`] - Byte range removed from the buffer
//! - [`SpliceOutcome`] - Result of an in-memory splice
//! - [`SpliceReport`] - Summary of a file splice
//! - [`Recipe`] - A TOML-described splice
//!
//! ## Operations
//!
//! - [`locate_span`] - Find the span without changing anything
//! - [`splice_text`] - Splice a buffer in memory
//! - [`replace_in_file`] - Read, splice, and atomically overwrite a file

mod error;
mod file;
mod recipe;
mod replace;
mod span;

pub use error::{MarkerKind, Result, SpliceError};
pub use file::{read_text, write_atomic};
pub use recipe::Recipe;
pub use replace::{SpliceOptions, SpliceReport, replace_in_file};
pub use span::{Markers, SpliceOutcome, SpliceSpan, locate_span, splice_text};
