//! Types for the media data model.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The two media classes the parser knows how to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Episodic content organized by series/season/episode.
    Tv,
    /// Feature content organized by title and release year.
    Movie,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tv => write!(f, "TV"),
            Self::Movie => write!(f, "Movie"),
        }
    }
}

/// Episode number, or the sentinel for "no episode marker detectable".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Episode {
    Numbered(u32),
    /// No episode token was found anywhere in the name.
    Special,
}

/// Release year, or the sentinel for "no plausible year token found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseYear {
    Known(i32),
    Unknown,
}

/// Display resolution parsed from the file name, never from the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    P2160,
    P1080,
    P720,
    P480,
    Unknown,
}

impl Resolution {
    /// The normalized label, always `p`-suffixed for known resolutions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::P2160 => "2160p",
            Self::P1080 => "1080p",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind-specific metadata carried by a [`MediaItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDetails {
    Tv { season: u32, episode: Episode },
    Movie { year: ReleaseYear },
}

/// One parsed, relocatable media file.
///
/// All parsed fields are set once at construction; only `current_path`
/// ever changes, and only after a verified relocation step.
#[derive(Debug, Clone)]
pub struct MediaItem {
    source_path: PathBuf,
    current_path: PathBuf,
    extension: String,
    title: String,
    custom_name: String,
    resolution: Resolution,
    details: MediaDetails,
}

impl MediaItem {
    pub(crate) fn new(
        path: &Path,
        extension: String,
        title: String,
        custom_name: String,
        resolution: Resolution,
        details: MediaDetails,
    ) -> Self {
        Self {
            source_path: path.to_path_buf(),
            current_path: path.to_path_buf(),
            extension,
            title,
            custom_name,
            resolution,
            details,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self.details {
            MediaDetails::Tv { .. } => MediaKind::Tv,
            MediaDetails::Movie { .. } => MediaKind::Movie,
        }
    }

    /// The path the file was discovered at. Never changes.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Where the file lives right now; equals `source_path` until a
    /// relocation succeeds.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub(crate) fn set_current_path(&mut self, path: PathBuf) {
        self.current_path = path;
    }

    /// File-type suffix including the leading dot, e.g. `".mkv"`.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Parsed series or movie title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The formatted display/file name, e.g. `"Series - S01E02"`.
    pub fn custom_name(&self) -> &str {
        &self.custom_name
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn details(&self) -> &MediaDetails {
        &self.details
    }

    /// The original file name of the source, for display purposes.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// An item is usable for aggregation and relocation only when both the
    /// title and the formatted name are non-empty.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.custom_name.is_empty()
    }

    /// Computes the canonical destination under `root`.
    ///
    /// TV: `root/{title}/Season {season}/{custom_name}{ext}`.
    /// Movie: `root/{custom_name}{ext}`.
    pub fn destination_path(&self, root: &Path) -> PathBuf {
        match &self.details {
            MediaDetails::Tv { season, .. } => root
                .join(&self.title)
                .join(format!("Season {season}"))
                .join(format!("{}{}", self.custom_name, self.extension)),
            MediaDetails::Movie { .. } => {
                root.join(format!("{}{}", self.custom_name, self.extension))
            }
        }
    }
}

/// The items discovered under one (directory, extension) pair, plus the
/// majority-vote canonical name for the group.
#[derive(Debug, Clone)]
pub struct MediaGroup {
    directory: PathBuf,
    extension: String,
    items: Vec<MediaItem>,
    canonical_name: Option<String>,
}

impl MediaGroup {
    pub(crate) fn new(
        directory: PathBuf,
        extension: String,
        items: Vec<MediaItem>,
        canonical_name: Option<String>,
    ) -> Self {
        Self {
            directory,
            extension,
            items,
            canonical_name,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [MediaItem] {
        &mut self.items
    }

    pub fn canonical_name(&self) -> Option<&str> {
        self.canonical_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for MediaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} items, name = {}):",
            self.directory.display(),
            self.items.len(),
            self.canonical_name.as_deref().unwrap_or("unnamed"),
        )?;
        for item in &self.items {
            writeln!(f, "  {} -> {}", item.file_name(), item.custom_name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv_item(title: &str, season: u32, episode: Episode) -> MediaItem {
        let custom_name = match episode {
            Episode::Numbered(n) => format!("{title} - S{season:02}E{n:02}"),
            Episode::Special => format!("{title} - Special"),
        };
        MediaItem::new(
            Path::new("/src/file.mkv"),
            ".mkv".to_string(),
            title.to_string(),
            custom_name,
            Resolution::Unknown,
            MediaDetails::Tv { season, episode },
        )
    }

    #[test]
    fn test_tv_destination_path() {
        let item = tv_item("Show Name", 1, Episode::Numbered(2));
        let dest = item.destination_path(Path::new("/library"));
        assert_eq!(
            dest,
            PathBuf::from("/library/Show Name/Season 1/Show Name - S01E02.mkv")
        );
    }

    #[test]
    fn test_movie_destination_path_is_flat() {
        let item = MediaItem::new(
            Path::new("/src/movie.mkv"),
            ".mkv".to_string(),
            "Movie Title".to_string(),
            "Movie Title (2020)".to_string(),
            Resolution::P1080,
            MediaDetails::Movie {
                year: ReleaseYear::Known(2020),
            },
        );
        let dest = item.destination_path(Path::new("/library"));
        assert_eq!(dest, PathBuf::from("/library/Movie Title (2020).mkv"));
    }

    #[test]
    fn test_validity_requires_title_and_custom_name() {
        let valid = tv_item("Show", 1, Episode::Special);
        assert!(valid.is_valid());

        let invalid = MediaItem::new(
            Path::new("/src/file.mkv"),
            ".mkv".to_string(),
            String::new(),
            " - Special".to_string(),
            Resolution::Unknown,
            MediaDetails::Tv {
                season: 1,
                episode: Episode::Special,
            },
        );
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_current_path_starts_at_source() {
        let mut item = tv_item("Show", 2, Episode::Numbered(4));
        assert_eq!(item.current_path(), item.source_path());

        item.set_current_path(PathBuf::from("/library/Show/Season 2/x.mkv"));
        assert_eq!(item.source_path(), Path::new("/src/file.mkv"));
        assert_ne!(item.current_path(), item.source_path());
    }

    #[test]
    fn test_resolution_labels() {
        assert_eq!(Resolution::P1080.label(), "1080p");
        assert_eq!(Resolution::Unknown.label(), "Unknown");
        assert_eq!(Resolution::P720.to_string(), "720p");
    }

    #[test]
    fn test_group_display_lists_renames() {
        let group = MediaGroup::new(
            PathBuf::from("/downloads"),
            ".mkv".to_string(),
            vec![tv_item("Show", 1, Episode::Numbered(1))],
            Some("Show".to_string()),
        );
        let rendered = group.to_string();
        assert!(rendered.contains("name = Show"));
        assert!(rendered.contains("file.mkv -> Show - S01E01"));
    }
}
