//! Trait definition for the transcoding boundary.

use crate::media::MediaItem;

use super::types::TranscodeStatus;

/// An external process that can transcode a media file in place.
///
/// Implementations live outside this crate; the core only relies on the
/// status contract.
pub trait Transcoder {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Transcodes the file at the item's current path.
    fn transcode(&self, item: &MediaItem) -> TranscodeStatus;
}
