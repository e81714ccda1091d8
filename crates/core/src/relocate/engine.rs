//! The relocation engine: rename first, verified copy as fallback.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::checksum::hash_file;
use crate::media::MediaItem;

use super::config::RelocateConfig;
use super::types::RelocationOutcome;

/// Executes the relocation protocol for parsed media items.
pub struct Relocator {
    config: RelocateConfig,
}

impl Relocator {
    /// Creates an engine with the given configuration.
    pub fn new(config: RelocateConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RelocateConfig::default())
    }

    /// Moves one item to its canonical location under `dest_root`.
    ///
    /// Always returns a terminal outcome; the caller decides what failures
    /// mean for the run. On success the item's `current_path` is updated.
    /// The caller is expected to skip items where `is_valid()` is false.
    pub fn relocate(&self, item: &mut MediaItem, dest_root: &Path) -> RelocationOutcome {
        let destination = item.destination_path(dest_root);
        debug!(
            from = %item.current_path().display(),
            to = %destination.display(),
            "relocating item"
        );

        if let Some(parent) = destination.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(dir = %parent.display(), "failed to create destination directories: {e}");
                let reason = format!("failed to create {}: {e}", parent.display());
                return RelocationOutcome::IoFailure {
                    destination,
                    reason,
                };
            }
        }

        if destination.exists() {
            info!(destination = %destination.display(), "destination already exists, skipping");
            return RelocationOutcome::AlreadyExists { destination };
        }

        let source = item.current_path().to_path_buf();
        if self.config.prefer_atomic_moves {
            match fs::rename(&source, &destination) {
                Ok(()) => {
                    info!(destination = %destination.display(), "moved atomically");
                    item.set_current_path(destination.clone());
                    return RelocationOutcome::Moved { destination };
                }
                Err(e) if is_cross_device(&e) => {
                    debug!("rename crosses a filesystem boundary, using verified copy");
                }
                Err(e) => {
                    warn!(source = %source.display(), "rename failed: {e}");
                    return RelocationOutcome::IoFailure {
                        destination,
                        reason: format!("rename failed: {e}"),
                    };
                }
            }
        }

        self.verified_copy(item, &source, destination)
    }

    /// Relocates a batch strictly sequentially. Invalid items are skipped
    /// with a warning; one item's failure never stops the rest.
    pub fn relocate_batch(
        &self,
        items: &mut [MediaItem],
        dest_root: &Path,
    ) -> Vec<RelocationOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        for item in items {
            if !item.is_valid() {
                warn!(file = %item.file_name(), "skipping item with incomplete metadata");
                continue;
            }
            outcomes.push(self.relocate(item, dest_root));
        }
        outcomes
    }

    /// Copy-verify-delete sequence for moves a rename cannot serve.
    ///
    /// The source is deleted only after the destination's checksum equals
    /// the one computed from the source before the copy began.
    fn verified_copy(
        &self,
        item: &mut MediaItem,
        source: &Path,
        destination: PathBuf,
    ) -> RelocationOutcome {
        let expected = match hash_file(source, self.config.checksum, self.config.buffer_size) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(source = %source.display(), "failed to checksum source: {e}");
                return RelocationOutcome::IoFailure {
                    destination,
                    reason: format!("failed to checksum source: {e}"),
                };
            }
        };

        if let Err(e) = self.copy_file(source, &destination) {
            warn!(destination = %destination.display(), "copy failed: {e}");
            // A half-written destination is useless; drop it so a retry
            // starts clean. The source has not been touched.
            if destination.exists() {
                if let Err(cleanup) = fs::remove_file(&destination) {
                    warn!(
                        destination = %destination.display(),
                        "failed to remove partial copy: {cleanup}"
                    );
                }
            }
            return RelocationOutcome::IoFailure {
                destination,
                reason: format!("copy failed: {e}"),
            };
        }

        let actual = match hash_file(&destination, self.config.checksum, self.config.buffer_size) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(destination = %destination.display(), "failed to checksum copy: {e}");
                return RelocationOutcome::IoFailure {
                    destination,
                    reason: format!("failed to checksum copy: {e}"),
                };
            }
        };

        if expected != actual {
            warn!(
                source = %source.display(),
                destination = %destination.display(),
                expected = %expected,
                actual = %actual,
                "checksum mismatch after copy, retaining both files"
            );
            return RelocationOutcome::ChecksumMismatch {
                destination,
                expected,
                actual,
            };
        }

        if let Err(e) = fs::remove_file(source) {
            warn!(source = %source.display(), "verified copy done but source cleanup failed: {e}");
            return RelocationOutcome::IoFailure {
                destination,
                reason: format!("source cleanup failed: {e}"),
            };
        }

        info!(destination = %destination.display(), checksum = %expected, "copied and verified");
        item.set_current_path(destination.clone());
        RelocationOutcome::FallbackCopied {
            destination,
            checksum: expected,
        }
    }

    /// Streams the file across in fixed-size chunks.
    fn copy_file(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let src = File::open(source)?;
        let dst = File::create(destination)?;
        let mut reader = BufReader::with_capacity(self.config.buffer_size, src);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dst);
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut total_bytes = 0u64;

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            writer.write_all(&buffer[..bytes_read])?;
            total_bytes += bytes_read as u64;
        }
        writer.flush()?;
        Ok(total_bytes)
    }
}

/// Cross-filesystem renames fail with EXDEV (18 on Linux).
fn is_cross_device(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::CrossesDevices || e.raw_os_error() == Some(18)
}
