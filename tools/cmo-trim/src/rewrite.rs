//! Reference shortening and asset-file synchronization.
//!
//! The walker hands every shader and texture reference through
//! [`AssetRewriter::rewrite`], which computes the shortened form and keeps
//! the on-disk asset files consistent with what gets written back into the
//! model: whenever a stem changes, the matching file next to the model is
//! renamed to the new stem.

use std::fs;
use std::path::Path;

use crate::config::ShortenPolicy;
use crate::error::TranscodeError;

/// Kind of embedded asset reference, which fixes the file-type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Shader,
    Texture,
}

impl RefKind {
    /// File-type suffix baked into references of this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            RefKind::Shader => ".dgsl",
            RefKind::Texture => ".png",
        }
    }

    /// Short name for error reports.
    pub fn label(self) -> &'static str {
        match self {
            RefKind::Shader => "shader",
            RefKind::Texture => "texture",
        }
    }

    /// Record name for truncation reports.
    pub(crate) fn record(self) -> &'static str {
        match self {
            RefKind::Shader => "shader reference",
            RefKind::Texture => "texture reference",
        }
    }
}

/// Split the kind's file-type suffix off a raw reference. The match is
/// case-sensitive and anchored at the end; a suffix appearing mid-string is
/// part of the stem.
pub fn split_suffix(raw: &str, kind: RefKind) -> (&str, &str) {
    match raw.strip_suffix(kind.suffix()) {
        Some(stem) => (stem, kind.suffix()),
        None => (raw, ""),
    }
}

/// Shorten a stem with the pass policy. Pure; no filesystem access.
pub fn shorten_stem(stem: &str, policy: &ShortenPolicy) -> String {
    match policy {
        ShortenPolicy::SuffixCut => match stem.rfind('_') {
            Some(pos) => stem[pos + 1..].to_string(),
            None => stem.to_string(),
        },
        ShortenPolicy::PrefixStrip { prefix_lower } => {
            // The ASCII fold keeps byte offsets aligned with the original
            // string, so the match position can be reused directly.
            match stem.to_ascii_lowercase().find(prefix_lower.as_str()) {
                Some(pos) => {
                    let mut out = String::with_capacity(stem.len() - prefix_lower.len());
                    out.push_str(&stem[..pos]);
                    out.push_str(&stem[pos + prefix_lower.len()..]);
                    out
                }
                None => stem.to_string(),
            }
        }
    }
}

/// Shortens references and renames the matching asset files on disk.
pub struct AssetRewriter<'a> {
    dir: &'a Path,
    policy: &'a ShortenPolicy,
    rewritten: usize,
    renamed: usize,
}

impl<'a> AssetRewriter<'a> {
    /// `dir` is the directory holding the model file; asset renames happen
    /// there and nowhere else.
    pub fn new(dir: &'a Path, policy: &'a ShortenPolicy) -> Self {
        Self {
            dir,
            policy,
            rewritten: 0,
            renamed: 0,
        }
    }

    /// References whose stored string changed.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    /// Asset files renamed on disk.
    pub fn renamed(&self) -> usize {
        self.renamed
    }

    /// Shorten one raw reference and rename its asset file to match.
    ///
    /// Empty references pass through untouched. A missing asset file is
    /// skipped silently: the reference may point outside this directory, or
    /// an earlier material sharing the same reference may already have
    /// renamed it. An occupied destination is deleted first, so when two
    /// references collapse to the same stem the last writer wins.
    ///
    /// Returns the shortened stem with the suffix removed; that is the
    /// string written back into the model.
    pub fn rewrite(&mut self, kind: RefKind, raw: &str) -> Result<String, TranscodeError> {
        if raw.is_empty() {
            return Ok(String::new());
        }

        let (stem, suffix) = split_suffix(raw, kind);
        let short = shorten_stem(stem, self.policy);
        // Dropping the suffix alone already changes the stored string, even
        // when the stem itself survives intact.
        if short != raw {
            self.rewritten += 1;
        }
        if short == stem {
            return Ok(short);
        }

        let from = self.dir.join(format!("{stem}{suffix}"));
        let to = self.dir.join(format!("{short}{suffix}"));
        if from.is_file() {
            if to.exists() {
                fs::remove_file(&to)?;
            }
            fs::rename(&from, &to).map_err(|source| TranscodeError::AssetRenameFailed {
                kind: kind.label(),
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            tracing::debug!("renamed {} -> {}", from.display(), to.display());
            self.renamed += 1;
        }

        Ok(short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn prefix_strip(prefix: &str) -> ShortenPolicy {
        ShortenPolicy::PrefixStrip {
            prefix_lower: prefix.to_ascii_lowercase(),
        }
    }

    #[test]
    fn test_suffix_cut_keeps_underscore_free_stems() {
        assert_eq!(shorten_stem("wood", &ShortenPolicy::SuffixCut), "wood");
    }

    #[test]
    fn test_suffix_cut_keeps_text_after_last_underscore() {
        assert_eq!(
            shorten_stem("Proj_Shaders_lit", &ShortenPolicy::SuffixCut),
            "lit"
        );
        assert_eq!(shorten_stem("a_b_c_d", &ShortenPolicy::SuffixCut), "d");
    }

    #[test]
    fn test_prefix_strip_is_case_insensitive() {
        assert_eq!(shorten_stem("MODELS_Foo", &prefix_strip("models_")), "Foo");
    }

    #[test]
    fn test_prefix_strip_removes_first_occurrence_only() {
        assert_eq!(shorten_stem("x_ab_ab_y", &prefix_strip("ab_")), "x_ab_y");
    }

    #[test]
    fn test_prefix_strip_keeps_remaining_underscores() {
        assert_eq!(
            shorten_stem("Users_Me_Proj_FBX_brick_diffuse", &prefix_strip("users_me_proj_fbx_")),
            "brick_diffuse"
        );
    }

    #[test]
    fn test_prefix_strip_without_match_is_identity() {
        assert_eq!(
            shorten_stem("Proj_Shaders_lit", &prefix_strip("somewhere_else_")),
            "Proj_Shaders_lit"
        );
    }

    #[test]
    fn test_split_suffix_is_anchored() {
        assert_eq!(
            split_suffix("Proj_Shaders_lit.dgsl", RefKind::Shader),
            ("Proj_Shaders_lit", ".dgsl")
        );
        // Mid-string occurrence is part of the stem.
        assert_eq!(
            split_suffix("a.dgsl_b", RefKind::Shader),
            ("a.dgsl_b", "")
        );
        assert_eq!(split_suffix("tex.png", RefKind::Texture), ("tex", ".png"));
        assert_eq!(split_suffix("tex.PNG", RefKind::Texture), ("tex.PNG", ""));
    }

    #[test]
    fn test_rewrite_empty_is_noop() {
        let dir = tempdir().unwrap();
        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        assert_eq!(rewriter.rewrite(RefKind::Texture, "").unwrap(), "");
        assert_eq!(rewriter.rewritten(), 0);
        assert_eq!(rewriter.renamed(), 0);
    }

    #[test]
    fn test_rewrite_renames_asset_and_keeps_suffix() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Proj_Shaders_lit.dgsl"), b"shader").unwrap();

        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        let short = rewriter.rewrite(RefKind::Shader, "Proj_Shaders_lit.dgsl").unwrap();

        // The stored string drops the suffix; the on-disk file keeps it.
        assert_eq!(short, "lit");
        assert!(!dir.path().join("Proj_Shaders_lit.dgsl").exists());
        assert_eq!(
            std::fs::read(dir.path().join("lit.dgsl")).unwrap(),
            b"shader"
        );
        assert_eq!(rewriter.renamed(), 1);
    }

    #[test]
    fn test_rewrite_missing_asset_is_skipped() {
        let dir = tempdir().unwrap();
        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        let short = rewriter.rewrite(RefKind::Texture, "Proj_FBX_wood.png").unwrap();
        assert_eq!(short, "wood");
        assert_eq!(rewriter.rewritten(), 1);
        assert_eq!(rewriter.renamed(), 0);
    }

    #[test]
    fn test_rewrite_collision_last_writer_wins() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tex_A_old.png"), b"first").unwrap();
        std::fs::write(dir.path().join("tex_B_old.png"), b"second").unwrap();

        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        assert_eq!(rewriter.rewrite(RefKind::Texture, "tex_A_old.png").unwrap(), "old");
        assert_eq!(rewriter.rewrite(RefKind::Texture, "tex_B_old.png").unwrap(), "old");

        // The second rename replaced the first rename's output.
        assert_eq!(std::fs::read(dir.path().join("old.png")).unwrap(), b"second");
        assert!(!dir.path().join("tex_A_old.png").exists());
        assert!(!dir.path().join("tex_B_old.png").exists());
        assert_eq!(rewriter.renamed(), 2);
    }

    #[test]
    fn test_rewrite_counts_suffix_only_change() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("lit.dgsl"), b"shader").unwrap();

        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        let short = rewriter.rewrite(RefKind::Shader, "lit.dgsl").unwrap();

        // The stored string loses its suffix, so it counts as rewritten,
        // but the stem is unchanged and the file keeps its name.
        assert_eq!(short, "lit");
        assert_eq!(rewriter.rewritten(), 1);
        assert_eq!(rewriter.renamed(), 0);
        assert!(dir.path().join("lit.dgsl").exists());
    }

    #[test]
    fn test_rewrite_rename_failure_is_fatal() {
        let dir = tempdir().unwrap();
        // The shortened stem keeps a directory component that does not
        // exist under the destination, so the rename cannot succeed
        // whatever the process privileges are.
        std::fs::create_dir(dir.path().join("tex_nodir")).unwrap();
        std::fs::write(dir.path().join("tex_nodir").join("wood.png"), b"pixels").unwrap();

        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        let err = rewriter
            .rewrite(RefKind::Texture, "tex_nodir/wood.png")
            .unwrap_err();

        match err {
            TranscodeError::AssetRenameFailed { kind, from, to, .. } => {
                assert_eq!(kind, "texture");
                assert!(from.ends_with("tex_nodir/wood.png"));
                assert!(to.ends_with("nodir/wood.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(rewriter.renamed(), 0);
        assert!(dir.path().join("tex_nodir").join("wood.png").exists());
    }

    #[test]
    fn test_rewrite_already_short_touches_nothing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("lit.dgsl"), b"shader").unwrap();

        let policy = ShortenPolicy::SuffixCut;
        let mut rewriter = AssetRewriter::new(dir.path(), &policy);
        assert_eq!(rewriter.rewrite(RefKind::Shader, "lit").unwrap(), "lit");
        assert!(dir.path().join("lit.dgsl").exists());
        assert_eq!(rewriter.rewritten(), 0);
    }
}
