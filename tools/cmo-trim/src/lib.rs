//! cmo-trim library
//!
//! Streaming transcoder for `.cmo` model files: shortens the embedded shader
//! and texture reference paths baked in by the export pipeline, and renames
//! the matching asset files on disk so they resolve under the new names.

pub mod config;
pub mod error;
pub mod prefix;
pub mod rewrite;
pub mod scan;
pub mod transcode;

pub use config::{PassConfig, ShortenPolicy};
pub use error::TranscodeError;
pub use rewrite::{shorten_stem, split_suffix, AssetRewriter, RefKind};
pub use transcode::{transcode_file, transcode_model, TranscodeSummary};
