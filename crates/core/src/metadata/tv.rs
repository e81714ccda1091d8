//! TV episode parsing: ordered cascade of season/episode pattern tiers.

use std::ops::Range;
use std::path::Path;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::{debug, trace, warn};

use crate::media::{Episode, MediaDetails, MediaItem};

use super::resolution::{match_resolution, parse_resolution};
use super::text::{
    cleanup_title, file_name_str, find_ascii_ci, normalize_separators, parent_dir_name,
    split_extension,
};
use super::MetadataError;

/// Upper bound (exclusive) for the linear season search.
const MAX_SEASONS: u32 = 15;

/// Upper bound (exclusive) for the linear episode search.
const MAX_EPISODES: u32 = 300;

/// Combined season+episode patterns, tried in priority order. Only a match
/// that yields BOTH groups wins the tier.
static COMBINED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // "S01E02" and friends
        r"(?i)(?: *- ?)? ?S(?P<season>0*[1-9][0-9]*|0) *E(?P<episode>0*(?:[1-9][0-9]*|0))",
        // "Season 1 ... Episode 2"; the season half is optional, so a
        // season-less match does not settle this tier
        r"(?i)(?:(?: *- ?)? ?Season ?\b(?P<season>0*(?:[1-9][0-9]*|0)))? *(?: *- ?)? *Episode ?\b(?P<episode>0*(?:[1-9][0-9]*|0))",
        // "1x02"
        r"(?i)(?: *- ?)? ?(?P<season>0*(?:[1-9][0-9]*|0)) *x *(?: *- ?)? *(?P<episode>0*(?:[1-9][0-9]*|0))",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("invalid combined pattern"))
    .collect()
});

/// Solo episode patterns: "Show - 02" and a trailing "E02"/"02".
static SOLO_EPISODE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r" *- ? *E?(?P<episode>0*(?:[1-9][0-9]*|0))",
        r"E?(?P<episode>0*(?:[1-9][0-9]*|0))$",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("invalid solo episode pattern"))
    .collect()
});

/// Solo season patterns: "Season 2" and "S2 " (trailing space required so a
/// bare "S" prefix inside a word is not misread).
static SOLO_SEASON_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Season ?\b(?P<season>0*(?:[1-9][0-9]*|0))",
        r"(?i)S(?P<season>0*(?:[1-9][0-9]*|0)) +",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("invalid solo season pattern"))
    .collect()
});

/// Parses a TV episode out of a file path.
///
/// Pure text work; the file does not have to exist. The only boundary
/// requirement is a `.` suffix separator in the file name.
pub fn parse_tv(path: &Path) -> Result<MediaItem, MetadataError> {
    let name = file_name_str(path)?;
    let (stem, extension) = split_extension(&name, path)?;
    debug!(file = %name, "parsing TV metadata");

    let resolution = parse_resolution(&name);
    let mut working = normalize_separators(stem);

    // Drop the resolution token from the working name up front: it never
    // belongs to the title, and a "1920x1080" span must not be readable as
    // an <n>x<m> season/episode marker.
    if let (_, Some(span)) = match_resolution(&working) {
        working.replace_range(span, "");
    }

    let mut season: Option<u32> = None;
    let mut episode: Option<u32> = None;

    // Tier 1: combined patterns, first full match wins.
    for pattern in COMBINED_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&working) {
            let s = caps.name("season").and_then(|m| m.as_str().parse().ok());
            let e = caps.name("episode").and_then(|m| m.as_str().parse().ok());
            if let (Some(s), Some(e)) = (s, e) {
                trace!(season = s, episode = e, "combined pattern matched");
                season = Some(s);
                episode = Some(e);
                let span = caps.get(0).expect("match").range();
                working.replace_range(span, "");
                break;
            }
        }
    }

    // Tier 2: solo patterns fill whichever field is still open.
    if episode.is_none() {
        if let Some((value, span)) = find_group(&SOLO_EPISODE_PATTERNS, "episode", &working) {
            trace!(episode = value, "solo episode pattern matched");
            episode = Some(value);
            working.replace_range(span, "");
        }
    }
    if season.is_none() {
        if let Some((value, span)) = find_group(&SOLO_SEASON_PATTERNS, "season", &working) {
            trace!(season = value, "solo season pattern matched");
            season = Some(value);
            working.replace_range(span, "");
        }
    }

    // Tier 3: the parent directory often carries the season when the file
    // name does not. The working name stays untouched.
    if season.is_none() {
        if let Some(parent) = parent_dir_name(path) {
            let normalized = normalize_separators(&parent);
            if let Some((value, _)) = find_group(&SOLO_SEASON_PATTERNS, "season", &normalized) {
                debug!(season = value, dir = %parent, "season taken from parent directory");
                season = Some(value);
            }
        }
    }

    // Tier 4: linear token search over a bounded range.
    if season.is_none() {
        if let Some((value, span)) = season_token_search(&working) {
            debug!(season = value, "season found by linear search");
            season = Some(value);
            working.replace_range(span, "");
        }
    }
    if episode.is_none() {
        if let Some((value, span)) = episode_token_search(&working) {
            debug!(episode = value, "episode found by linear search");
            episode = Some(value);
            working.replace_range(span, "");
        }
    }

    let title = cleanup_title(&working);
    if title.is_empty() {
        warn!(file = %name, "no title text left after parsing");
    }

    let season = season.unwrap_or(1);
    let episode = match episode {
        Some(n) => Episode::Numbered(n),
        None => {
            warn!(file = %name, "no episode token found, marking as special");
            Episode::Special
        }
    };
    let custom_name = match episode {
        Episode::Numbered(n) => format!("{title} - S{season:02}E{n:02}"),
        Episode::Special => format!("{title} - Special"),
    };

    debug!(%title, season, ?episode, %resolution, "TV metadata parsed");
    Ok(MediaItem::new(
        path,
        extension.to_string(),
        title,
        custom_name,
        resolution,
        MediaDetails::Tv { season, episode },
    ))
}

/// First pattern whose named group matches wins; returns the parsed value
/// and the span of the whole match.
fn find_group(patterns: &[Regex], group: &str, text: &str) -> Option<(u32, Range<usize>)> {
    for pattern in patterns {
        if let Some(caps) = pattern.captures(text) {
            if let Some(value) = caps.name(group).and_then(|m| m.as_str().parse().ok()) {
                let span = caps.get(0).expect("match").range();
                return Some((value, span));
            }
        }
    }
    None
}

/// Trial-token season search for names no pattern tier could read.
/// Case-sensitive: the token variants spell out the accepted casings.
fn season_token_search(name: &str) -> Option<(u32, Range<usize>)> {
    for i in 1..MAX_SEASONS {
        let tokens = [
            format!("Season {i}"),
            format!("SEASON {i}"),
            format!("season {i}"),
            format!("s{i}"),
            format!("s0{i}"),
            format!("S{i}"),
            format!("S0{i}"),
        ];
        for token in tokens {
            if let Some(pos) = name.find(&token) {
                return Some((i, pos..pos + token.len()));
            }
        }
    }
    None
}

/// Trial-token episode search, case-insensitive. The `E`-prefixed tokens
/// require a trailing space so codec tags like "E2" inside longer words do
/// not bind.
fn episode_token_search(name: &str) -> Option<(u32, Range<usize>)> {
    for i in 1..MAX_EPISODES {
        let tokens = [
            format!("Episode {i}"),
            format!("- {i:03}"),
            format!("- {i:02}"),
            format!("E{i} "),
            format!("E{i:02} "),
        ];
        for token in tokens {
            if let Some(pos) = find_ascii_ci(name, &token) {
                return Some((i, pos..pos + token.len()));
            }
        }
    }
    None
}
