//! Types for the transcoding boundary.

use serde::{Deserialize, Serialize};

/// Status an external transcoder reports for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscodeStatus {
    /// The item was transcoded successfully.
    Processed,
    /// The transcoder ran but could not process the item.
    Failed,
    /// The transcoder could not access the item at all.
    PermissionsError,
}

impl TranscodeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }
}
