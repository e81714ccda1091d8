//! Movie parsing: release-year extraction and title cleanup.

use std::ops::Range;
use std::path::Path;

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, warn};

use crate::media::{MediaDetails, MediaItem, ReleaseYear};

use super::resolution::parse_resolution;
use super::text::{
    cleanup_title, file_name_str, normalize_separators, parent_dir_name, split_extension,
};
use super::MetadataError;

/// Oldest release year the parser will accept.
const MIN_RELEASE_YEAR: i32 = 1800;

/// Any standalone 4-digit token; the numeric range check happens after the
/// match so out-of-range tokens can be skipped rather than half-matched.
static YEAR_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<year>[0-9]{4})\b").expect("invalid year pattern"));

/// Parses a movie out of a file path.
///
/// The year is the first 4-digit token inside `[1800, currentYear + 1]`,
/// looked for in the file name first and the parent directory second.
pub fn parse_movie(path: &Path) -> Result<MediaItem, MetadataError> {
    let name = file_name_str(path)?;
    let (stem, extension) = split_extension(&name, path)?;
    debug!(file = %name, "parsing movie metadata");

    let resolution = parse_resolution(&name);
    let normalized = normalize_separators(stem);
    let max_year = Utc::now().year() + 1;

    let (year, title_source) = match find_year(&normalized, max_year) {
        Some((value, span)) => (ReleaseYear::Known(value), normalized[..span.start].to_string()),
        None => {
            let from_parent = parent_dir_name(path)
                .and_then(|dir| find_year(&normalize_separators(&dir), max_year))
                .map(|(value, _)| value);
            match from_parent {
                Some(value) => {
                    debug!(year = value, "release year taken from parent directory");
                    (ReleaseYear::Known(value), normalized.clone())
                }
                None => {
                    warn!(file = %name, "no plausible release year found");
                    (ReleaseYear::Unknown, normalized.clone())
                }
            }
        }
    };

    let title = cleanup_title(&title_source);
    let custom_name = match year {
        ReleaseYear::Known(value) => format!("{title} ({value})"),
        ReleaseYear::Unknown => title.clone(),
    };

    debug!(%title, ?year, %resolution, "movie metadata parsed");
    Ok(MediaItem::new(
        path,
        extension.to_string(),
        title,
        custom_name,
        resolution,
        MediaDetails::Movie { year },
    ))
}

/// First in-range 4-digit token wins; out-of-range tokens are never years.
fn find_year(text: &str, max_year: i32) -> Option<(i32, Range<usize>)> {
    for caps in YEAR_TOKEN.captures_iter(text) {
        let m = caps.name("year").expect("year group");
        if let Ok(value) = m.as_str().parse::<i32>() {
            if (MIN_RELEASE_YEAR..=max_year).contains(&value) {
                return Some((value, m.range()));
            }
        }
    }
    None
}
