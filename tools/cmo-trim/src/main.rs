//! cmo-trim - shortens asset reference paths inside .cmo model files
//!
//! The export pipeline bakes long project-relative paths into the shader and
//! texture references of compiled models. This tool rewrites every `.cmo`
//! file in a directory with shortened references and renames the referenced
//! asset files to match.
//!
//! # Usage
//!
//! ```bash
//! # Shorten models exported from the FBX folder into Resources/Models
//! cmo-trim --source-dir FBX --cmo-dir Resources/Models
//!
//! # Models with skeletons and animation clips
//! cmo-trim --source-dir FBX --cmo-dir Resources/Models --bones --animation
//!
//! # Models compiled in another project: cut at the last underscore instead
//! cmo-trim --cmo-dir Resources/Models --suffix-cut
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cmo_trim::config::PassConfig;
use cmo_trim::prefix::derive_strip_prefix;
use cmo_trim::scan::find_model_files;
use cmo_trim::transcode::transcode_file;

/// Shorten shader and texture reference paths inside .cmo model files
#[derive(Parser)]
#[command(name = "cmo-trim")]
#[command(about = "Shortens shader and texture reference paths inside .cmo model files")]
#[command(version)]
struct Cli {
    /// Directory containing the .cmo files to rewrite
    #[arg(short, long, default_value = ".")]
    cmo_dir: PathBuf,

    /// Source folder the models were exported from, relative to the working
    /// directory; used to derive the path prefix stripped from references
    #[arg(short = 'f', long)]
    source_dir: Option<String>,

    /// Copy bone data through for models with skeletons
    #[arg(short, long)]
    bones: bool,

    /// Copy trailing animation data through (implies --bones took effect)
    #[arg(short, long)]
    animation: bool,

    /// Cut references at the last underscore instead of stripping a derived
    /// prefix; for models compiled in another project whose path is unknown
    #[arg(short, long)]
    suffix_cut: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let strip_prefix = if cli.suffix_cut {
        String::new()
    } else {
        match &cli.source_dir {
            Some(source) => {
                let cwd =
                    std::env::current_dir().context("Failed to resolve working directory")?;
                derive_strip_prefix(&cwd, source)
            }
            None => String::new(),
        }
    };

    let config = PassConfig::new(cli.bones, cli.animation, &strip_prefix);

    let files = find_model_files(&cli.cmo_dir);
    if files.is_empty() {
        anyhow::bail!("No .cmo files found in {}", cli.cmo_dir.display());
    }

    let mut failed = 0usize;
    for path in &files {
        match transcode_file(path, &config) {
            Ok(summary) => {
                tracing::info!(
                    "{}: {} meshes, {} materials, {} references shortened, {} assets renamed",
                    path.display(),
                    summary.meshes,
                    summary.materials,
                    summary.rewritten,
                    summary.renamed
                );
            }
            Err(err) => {
                failed += 1;
                let err = anyhow::Error::from(err);
                tracing::error!("{}: {err:#}", path.display());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}
