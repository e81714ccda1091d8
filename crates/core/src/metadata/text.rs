//! Text normalization helpers shared by both parser variants.

use std::path::Path;

use super::MetadataError;

/// Separator characters that stand in for spaces in release names.
const UNWANTED_SEPARATORS: [char; 2] = ['.', '_'];

/// Bracket kinds removed from titles, processed one kind at a time.
const UNWANTED_BRACKETS: [(char, char); 2] = [('[', ']'), ('(', ')')];

/// Returns the final path component as an owned string.
pub(crate) fn file_name_str(path: &Path) -> Result<String, MetadataError> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| MetadataError::MissingFileName {
            path: path.to_path_buf(),
        })
}

/// Splits a file name at its last `.` into (stem, suffix-with-dot).
pub(crate) fn split_extension<'a>(
    name: &'a str,
    path: &Path,
) -> Result<(&'a str, &'a str), MetadataError> {
    match name.rfind('.') {
        Some(idx) => Ok((&name[..idx], &name[idx..])),
        None => Err(MetadataError::MissingExtension {
            path: path.to_path_buf(),
        }),
    }
}

/// Returns the name of the file's immediate parent directory, if any.
pub(crate) fn parent_dir_name(path: &Path) -> Option<String> {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
}

/// Replaces release-name separators (`.`, `_`) with spaces and trims.
pub(crate) fn normalize_separators(name: &str) -> String {
    name.replace(UNWANTED_SEPARATORS, " ").trim().to_string()
}

/// Removes bracketed spans from a title.
///
/// For each bracket kind in turn: while any bracket char of that kind
/// remains, a properly ordered pair has the whole inclusive span deleted;
/// an unpaired (or inverted) bracket char is replaced by a space. Each pass
/// removes at least one bracket char, so the loop terminates.
pub(crate) fn strip_brackets(name: &str) -> String {
    let mut name = name.to_string();
    for (open, close) in UNWANTED_BRACKETS {
        loop {
            let leading = name.find(open);
            let trailing = name.find(close);
            match (leading, trailing) {
                (Some(l), Some(t)) if l < t => {
                    name.replace_range(l..=t, "");
                }
                (Some(l), _) => {
                    name.replace_range(l..=l, " ");
                }
                (None, Some(t)) => {
                    name.replace_range(t..=t, " ");
                }
                (None, None) => break,
            }
        }
    }
    name
}

/// Collapses whitespace runs into single spaces.
pub(crate) fn collapse_spaces(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

/// Final title cleanup: bracket removal, space collapsing, trimming.
pub(crate) fn cleanup_title(name: &str) -> String {
    collapse_spaces(&strip_brackets(name)).trim().to_string()
}

/// ASCII case-insensitive substring search.
///
/// Byte-offset safe for arbitrary UTF-8 haystacks, unlike lowercasing both
/// sides (which can change byte lengths).
pub(crate) fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}
