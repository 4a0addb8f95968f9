//! Model-file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Collect the `.cmo` files directly inside `dir` (non-recursive), sorted
/// for a stable processing order. The extension match ignores ASCII case.
pub fn find_model_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("cmo"))
        })
        .collect();
    files.sort();
    files
}
