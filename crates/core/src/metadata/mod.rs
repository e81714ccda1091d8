//! Filename metadata parsing.
//!
//! Classification is entirely text driven: the parser reads the file name
//! (and, for some fallbacks, the parent directory name) and never opens the
//! file itself. Both variants run an ordered cascade of pattern tiers where
//! the first full match wins; later tiers only fill fields earlier tiers
//! left unresolved. Fields that stay unresolved get sentinel values
//! ([`Episode::Special`], [`ReleaseYear::Unknown`]) rather than failing the
//! parse.
//!
//! [`Episode::Special`]: crate::media::Episode::Special
//! [`ReleaseYear::Unknown`]: crate::media::ReleaseYear::Unknown

mod movie;
mod resolution;
mod text;
mod tv;

pub use movie::parse_movie;
pub use resolution::parse_resolution;
pub use tv::parse_tv;

use std::path::PathBuf;

use thiserror::Error;

/// Errors rejected at the parser boundary, before any pattern matching.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The file name carries no `.` suffix separator.
    #[error("file name has no extension separator: {path}")]
    MissingExtension { path: PathBuf },

    /// The path has no final component to parse (e.g. `/`).
    #[error("path has no file name component: {path}")]
    MissingFileName { path: PathBuf },
}
