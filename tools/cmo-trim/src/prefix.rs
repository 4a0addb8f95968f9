//! Strip-prefix derivation.
//!
//! The export pipeline bakes each texture's project-relative path into its
//! name, escaping `_` as `__` and turning path separators into `_`. The
//! strip prefix reproduces that flattening for the working directory plus
//! the relative source folder, so the prefix-strip policy can find and
//! remove it inside texture stems.

use std::path::Path;

/// Flatten a path fragment into the form baked into texture names.
fn flatten(path: &str) -> String {
    path.replace('_', "__").replace(['\\', '/'], "_")
}

/// Derive the strip prefix from the working directory and the source folder
/// the models were exported from (relative to the working directory). Each
/// `../` component of `source_dir` pops one trailing segment off the
/// flattened working directory before the remainder is appended.
pub fn derive_strip_prefix(working_dir: &Path, source_dir: &str) -> String {
    let mut prefix = flatten(&working_dir.to_string_lossy());
    let mut source = source_dir.to_string();

    while let Some(pos) = source.find("../") {
        if let Some(cut) = prefix.rfind('_') {
            prefix.truncate(cut);
        }
        source.replace_range(pos..pos + 3, "");
    }

    prefix.push('_');
    prefix.push_str(&flatten(&source));
    prefix.push('_');
    prefix
}
