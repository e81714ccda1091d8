//! Directory scanning and group naming.
//!
//! Scanning walks a source tree, keeps the files matching the configured
//! extension, parses each one according to the configured media kind, and
//! groups the results by parent directory. Each group then gets a single
//! canonical name by majority vote over the parsed titles.

mod discover;
mod naming;

pub use discover::scan;
pub use naming::{aggregate_group, canonical_name};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning a source directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The configured source path does not exist.
    #[error("source directory not found: {0}")]
    SourceNotFound(PathBuf),

    /// The configured source path exists but is not a directory.
    #[error("source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// I/O error while walking the tree.
    #[error("I/O error while scanning: {0}")]
    Io(#[from] std::io::Error),
}
