//! Majority-vote canonical naming for media groups.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::media::{MediaGroup, MediaItem};

/// Picks the canonical name for a batch of items parsed from one directory.
///
/// Titles of valid items are tallied in first-seen order; the winner is the
/// first title to reach the highest count. Replacement happens on strictly
/// greater counts only, so ties keep the earlier title. Invalid items are
/// reported and excluded from the tally.
pub fn canonical_name(items: &[MediaItem]) -> Option<String> {
    let mut tally: Vec<(&str, u32)> = Vec::new();
    for item in items {
        if !item.is_valid() {
            warn!(
                file = %item.file_name(),
                "item has incomplete metadata, excluding from name vote"
            );
            continue;
        }
        match tally.iter_mut().find(|(title, _)| *title == item.title()) {
            Some((_, count)) => *count += 1,
            None => tally.push((item.title(), 1)),
        }
    }

    let mut winner: Option<(&str, u32)> = None;
    for (title, count) in tally {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((title, count));
        }
    }

    if let Some((title, count)) = winner {
        debug!(title, count, "canonical name elected");
    }
    winner.map(|(title, _)| title.to_string())
}

/// Builds a [`MediaGroup`] from one directory's parsed items, electing the
/// canonical name in the process.
pub fn aggregate_group(
    directory: PathBuf,
    extension: String,
    items: Vec<MediaItem>,
) -> MediaGroup {
    let name = canonical_name(&items);
    MediaGroup::new(directory, extension, items, name)
}
