//! Resolution detection from file names.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use crate::media::Resolution;

/// Ordered resolution patterns; first match wins. Each accepts an optional
/// `<width>x` prefix and an optional trailing `p`, so `1920x1080`, `1080`
/// and `1080p` all normalize to the same label.
static RESOLUTION_PATTERNS: Lazy<Vec<(Regex, Resolution)>> = Lazy::new(|| {
    [
        (r"(?i)(3840\s?x\s?)?2160p?", Resolution::P2160),
        (r"(?i)(1920\s?x\s?)?1080p?", Resolution::P1080),
        (r"(?i)(1280\s?x\s?)?720p?", Resolution::P720),
        (r"(?i)(854\s?x\s?)?480p?", Resolution::P480),
    ]
    .into_iter()
    .map(|(pattern, res)| (Regex::new(pattern).expect("invalid resolution pattern"), res))
    .collect()
});

/// Parses the display resolution out of a raw file or directory name.
///
/// Defaults to [`Resolution::Unknown`] when nothing matches; classification
/// never reads container metadata.
pub fn parse_resolution(name: &str) -> Resolution {
    match_resolution(name).0
}

/// Like [`parse_resolution`], but also reports the matched span so the
/// caller can strip the token from a working name.
pub(crate) fn match_resolution(name: &str) -> (Resolution, Option<Range<usize>>) {
    for (pattern, resolution) in RESOLUTION_PATTERNS.iter() {
        if let Some(m) = pattern.find(name) {
            debug!(name, %resolution, "resolution token matched");
            return (*resolution, Some(m.range()));
        }
    }
    (Resolution::Unknown, None)
}
