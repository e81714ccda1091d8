use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;
use crate::relocate::RelocateConfig;

/// One relocation run: where to look, what to look for, where it goes.
///
/// There is no process-wide state; every entry point takes this value
/// explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory to scan recursively.
    pub source: PathBuf,

    /// File-type filter, including the leading dot (e.g. `".mkv"`).
    pub extension: String,

    /// How discovered files are classified.
    pub kind: MediaKind,

    /// Destination root; must be absolute.
    pub destination: PathBuf,

    /// Relocation protocol tuning.
    #[serde(default)]
    pub relocate: RelocateConfig,
}
