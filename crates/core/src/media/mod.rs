//! Core data model for classified media files.
//!
//! A [`MediaItem`] is one on-disk file plus the metadata parsed out of its
//! name; a [`MediaGroup`] is the set of items discovered under a single
//! (directory, extension) pair together with the group's aggregated
//! canonical name.

mod types;

pub use types::{
    Episode, MediaDetails, MediaGroup, MediaItem, MediaKind, ReleaseYear, Resolution,
};
