//! Types for the relocation module.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Terminal outcome of relocating one media item.
///
/// `Moved` and `FallbackCopied` are the success states; everything else
/// leaves the source file exactly where it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RelocationOutcome {
    /// A single atomic rename placed the file.
    Moved { destination: PathBuf },

    /// The cross-filesystem fallback ran: copy, verify, delete source.
    FallbackCopied {
        destination: PathBuf,
        checksum: String,
    },

    /// The copied bytes did not hash to the source's digest. Both files
    /// are retained for manual inspection; nothing was deleted.
    ChecksumMismatch {
        destination: PathBuf,
        expected: String,
        actual: String,
    },

    /// A file already sits at the destination; the source was not touched.
    AlreadyExists { destination: PathBuf },

    /// Some step failed with an I/O error; the source was not touched.
    IoFailure {
        destination: PathBuf,
        reason: String,
    },
}

impl RelocationOutcome {
    /// The destination path this outcome refers to.
    pub fn destination(&self) -> &Path {
        match self {
            Self::Moved { destination }
            | Self::FallbackCopied { destination, .. }
            | Self::ChecksumMismatch { destination, .. }
            | Self::AlreadyExists { destination }
            | Self::IoFailure { destination, .. } => destination,
        }
    }

    /// Whether the file now lives at the destination.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::FallbackCopied { .. })
    }

    /// Whether this outcome signals data that needs human attention.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ChecksumMismatch { .. } | Self::IoFailure { .. })
    }

    /// Short status label for report tallies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Moved { .. } => "moved",
            Self::FallbackCopied { .. } => "copied",
            Self::ChecksumMismatch { .. } => "checksum mismatch",
            Self::AlreadyExists { .. } => "already exists",
            Self::IoFailure { .. } => "io failure",
        }
    }
}
