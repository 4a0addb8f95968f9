//! Shared definitions for the CMO compiled-mesh format.
//!
//! The `.cmo` interchange format is a flat, count-driven binary layout: every
//! variable-length record is preceded by its element count, and nothing in
//! the file is randomly addressable. This crate holds the layout constants
//! and the length-prefixed UTF-16LE string codec used by the tools that walk
//! the format.

pub mod formats;
pub mod wide;

pub use formats::*;
pub use wide::{read_wide, write_wide};
