//! Error taxonomy for the transcoding pass.
//!
//! Every variant is fatal for the model file being processed and for that
//! file only; the caller decides whether the run continues. A missing asset
//! file at a rename point is not an error and never surfaces here.

use std::io;
use std::path::PathBuf;

/// Fatal, file-scoped failures of a single model-file pass.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    /// A declared count implied more bytes than the file holds.
    #[error("truncated input while reading {record}")]
    TruncatedInput {
        /// The record being read when the stream ran out.
        record: &'static str,
    },

    /// An asset rename failed after any pre-existing destination was cleared.
    #[error("failed to rename {kind} asset {} -> {}", from.display(), to.display())]
    AssetRenameFailed {
        /// "shader" or "texture".
        kind: &'static str,
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl TranscodeError {
    /// Classify an I/O error raised while reading `record`: a short read
    /// means the count lied about the remaining bytes.
    pub(crate) fn for_record(err: io::Error, record: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            TranscodeError::TruncatedInput { record }
        } else {
            TranscodeError::Io(err)
        }
    }
}
