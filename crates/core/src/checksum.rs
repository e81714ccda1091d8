//! Streaming content checksums for copy verification.
//!
//! Hashes are computed through a fixed-size read buffer, so memory stays
//! bounded regardless of file size. They are used solely to verify fallback
//! copies and are never persisted.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Digest algorithm used for copy verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumType {
    /// 128-bit digest, the verification default.
    Md5,
    /// 256-bit digest for callers that want the stronger check.
    Sha256,
}

impl Default for ChecksumType {
    fn default() -> Self {
        Self::Md5
    }
}

/// Streams `path` through the selected digest and returns lowercase hex.
pub fn hash_file(path: &Path, checksum: ChecksumType, buffer_size: usize) -> io::Result<String> {
    debug!(path = %path.display(), ?checksum, "computing file checksum");
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(buffer_size, file);
    let mut buffer = vec![0u8; buffer_size];

    let digest = match checksum {
        ChecksumType::Md5 => {
            let mut context = md5::Context::new();
            loop {
                let bytes_read = reader.read(&mut buffer)?;
                if bytes_read == 0 {
                    break;
                }
                context.consume(&buffer[..bytes_read]);
            }
            format!("{:x}", context.compute())
        }
        ChecksumType::Sha256 => {
            let mut hasher = Sha256::new();
            loop {
                let bytes_read = reader.read(&mut buffer)?;
                if bytes_read == 0 {
                    break;
                }
                hasher.update(&buffer[..bytes_read]);
            }
            format!("{:x}", hasher.finalize())
        }
    };

    debug!(path = %path.display(), digest = %digest, "checksum computed");
    Ok(digest)
}
