//! Immutable configuration for one whole transcoding pass.

/// How reference stems are shortened. Chosen once per pass, never per string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenPolicy {
    /// Keep only the text after the last `_`; a stem without one is kept
    /// whole.
    SuffixCut,

    /// Remove the first case-insensitive occurrence of the strip prefix from
    /// the stem; everything else, underscores included, is kept.
    PrefixStrip {
        /// ASCII-lowercase fold of the strip prefix, computed once here so
        /// the search never re-folds per string.
        prefix_lower: String,
    },
}

/// Options for one pass over a set of model files.
#[derive(Debug, Clone)]
pub struct PassConfig {
    /// Copy bone data through for materials that carry a skeleton.
    pub keep_bones: bool,
    /// Copy trailing animation data through after the bone block.
    pub keep_animation: bool,
    /// Stem-shortening policy applied at every rewrite point.
    pub policy: ShortenPolicy,
}

impl PassConfig {
    /// Build a pass configuration. A non-empty `strip_prefix` selects the
    /// prefix-strip policy; otherwise stems are cut at the last underscore.
    pub fn new(keep_bones: bool, keep_animation: bool, strip_prefix: &str) -> Self {
        let policy = if strip_prefix.is_empty() {
            ShortenPolicy::SuffixCut
        } else {
            ShortenPolicy::PrefixStrip {
                prefix_lower: strip_prefix.to_ascii_lowercase(),
            }
        };
        Self {
            keep_bones,
            keep_animation,
            policy,
        }
    }
}
