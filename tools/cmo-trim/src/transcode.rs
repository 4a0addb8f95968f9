//! Streaming walk of one model file.
//!
//! The walker reads the input and writes the output in lock-step: every
//! count is echoed verbatim before its payload is processed, every fixed
//! block is copied byte-for-byte, and only the shader and texture reference
//! strings are interpreted at all. Nothing is held in memory beyond the
//! record currently in flight.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use cmo_common::{
    read_wide, write_wide, BONE_BLOCK_SIZE, INDEX_SIZE, MAX_TEXTURE_SLOTS, MESH_EXTENTS_SIZE,
    SHADING_BLOCK_SIZE, SKIN_VERTEX_SIZE, SUBMESH_SIZE, VERTEX_SIZE,
};

use crate::config::PassConfig;
use crate::error::TranscodeError;
use crate::rewrite::{AssetRewriter, RefKind};

/// What one file's pass touched, for reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranscodeSummary {
    /// Meshes in the file.
    pub meshes: u32,
    /// Materials across all meshes.
    pub materials: u32,
    /// References whose stored string changed.
    pub rewritten: usize,
    /// Asset files renamed on disk.
    pub renamed: usize,
}

/// Transcode a single model file in place.
///
/// The rewritten copy goes to a sibling file with a `new` extension and only
/// replaces the original after a clean close. On any failure the temporary
/// copy is removed best-effort and the original is left untouched; asset
/// renames performed before the failure stand, matching the ordering
/// guarantee that renames precede the model swap.
pub fn transcode_file(path: &Path, config: &PassConfig) -> Result<TranscodeSummary, TranscodeError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = path.with_extension("new");

    let result: Result<TranscodeSummary, TranscodeError> = (|| {
        let mut reader = BufReader::new(File::open(path)?);
        let mut writer = BufWriter::new(File::create(&tmp)?);
        let mut rewriter = AssetRewriter::new(dir, &config.policy);
        let summary = transcode_model(&mut reader, &mut writer, &mut rewriter, config)?;
        writer.flush()?;
        Ok(summary)
    })();

    match result {
        Ok(summary) => {
            fs::remove_file(path)?;
            fs::rename(&tmp, path)?;
            Ok(summary)
        }
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

/// Walk one whole model from `reader` to `writer`, shortening references
/// through `rewriter`.
pub fn transcode_model<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    rewriter: &mut AssetRewriter<'_>,
    config: &PassConfig,
) -> Result<TranscodeSummary, TranscodeError> {
    let mut summary = TranscodeSummary::default();

    let mesh_count = copy_u32(reader, writer, "mesh count")?;
    summary.meshes = mesh_count;

    for _ in 0..mesh_count {
        copy_wide(reader, writer, "mesh name")?;

        let material_count = copy_u32(reader, writer, "material count")?;
        summary.materials += material_count;

        for _ in 0..material_count {
            copy_wide(reader, writer, "material name")?;
            copy_exact(reader, writer, SHADING_BLOCK_SIZE, "shading parameters")?;

            rewrite_reference(reader, writer, rewriter, RefKind::Shader)?;
            for _ in 0..MAX_TEXTURE_SLOTS {
                rewrite_reference(reader, writer, rewriter, RefKind::Texture)?;
            }

            let skeleton = copy_u8(reader, writer, "skeleton flag")?;

            let submesh_count = copy_u32(reader, writer, "submesh count")?;
            copy_exact(
                reader,
                writer,
                u64::from(submesh_count) * SUBMESH_SIZE,
                "submesh records",
            )?;

            let index_buffers = copy_u32(reader, writer, "index buffer count")?;
            for _ in 0..index_buffers {
                let indices = copy_u32(reader, writer, "index count")?;
                copy_exact(reader, writer, u64::from(indices) * INDEX_SIZE, "index data")?;
            }

            let vertex_buffers = copy_u32(reader, writer, "vertex buffer count")?;
            for _ in 0..vertex_buffers {
                let vertices = copy_u32(reader, writer, "vertex count")?;
                copy_exact(reader, writer, u64::from(vertices) * VERTEX_SIZE, "vertex data")?;
            }

            let skin_buffers = copy_u32(reader, writer, "skin vertex buffer count")?;
            for _ in 0..skin_buffers {
                let vertices = copy_u32(reader, writer, "skin vertex count")?;
                copy_exact(
                    reader,
                    writer,
                    u64::from(vertices) * SKIN_VERTEX_SIZE,
                    "skin vertex data",
                )?;
            }

            copy_exact(reader, writer, MESH_EXTENTS_SIZE, "mesh extents")?;

            if skeleton != 0 {
                if config.keep_bones {
                    let bone_count = copy_u32(reader, writer, "bone count")?;
                    for _ in 0..bone_count {
                        copy_wide(reader, writer, "bone name")?;
                        copy_exact(reader, writer, BONE_BLOCK_SIZE, "bone transforms")?;
                    }

                    if config.keep_animation {
                        // Animation clips have no structure this pass knows;
                        // everything to end-of-file goes through verbatim.
                        io::copy(reader, writer)?;
                    }
                } else {
                    // With bone retention off the skeleton block is left
                    // unconsumed, so anything after this material is dropped
                    // from the copy.
                    tracing::warn!(
                        "skeleton data present but bone retention disabled; trailing bytes will not be copied"
                    );
                }
            }
        }
    }

    summary.rewritten = rewriter.rewritten();
    summary.renamed = rewriter.renamed();
    Ok(summary)
}

/// Read one reference string, shorten it, and emit the shortened form.
fn rewrite_reference<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    rewriter: &mut AssetRewriter<'_>,
    kind: RefKind,
) -> Result<(), TranscodeError> {
    let raw = read_wide(reader).map_err(|err| TranscodeError::for_record(err, kind.record()))?;
    let short = rewriter.rewrite(kind, &raw)?;
    write_wide(writer, &short)?;
    Ok(())
}

/// Echo a u32 count and return its value.
fn copy_u32<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    record: &'static str,
) -> Result<u32, TranscodeError> {
    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf)
        .map_err(|err| TranscodeError::for_record(err, record))?;
    writer.write_all(&buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Echo a single byte and return its value.
fn copy_u8<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    record: &'static str,
) -> Result<u8, TranscodeError> {
    let mut buf = [0u8; 1];
    reader
        .read_exact(&mut buf)
        .map_err(|err| TranscodeError::for_record(err, record))?;
    writer.write_all(&buf)?;
    Ok(buf[0])
}

/// Copy exactly `len` bytes through without interpretation.
fn copy_exact<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    len: u64,
    record: &'static str,
) -> Result<(), TranscodeError> {
    let copied = io::copy(&mut reader.take(len), writer)?;
    if copied < len {
        return Err(TranscodeError::TruncatedInput { record });
    }
    Ok(())
}

/// Echo a length-prefixed string without decoding it.
fn copy_wide<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    record: &'static str,
) -> Result<(), TranscodeError> {
    let count = copy_u32(reader, writer, record)?;
    copy_exact(reader, writer, u64::from(count) * 2, record)
}
