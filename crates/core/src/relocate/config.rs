//! Configuration for the relocation engine.

use serde::{Deserialize, Serialize};

use crate::checksum::ChecksumType;

/// Tuning knobs for the relocation protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelocateConfig {
    /// Buffer size for copies and checksum reads, in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Whether to try an atomic rename before copying. Disabled, every
    /// move goes through the copy-verify-delete path.
    #[serde(default = "default_true")]
    pub prefer_atomic_moves: bool,

    /// Digest used to verify fallback copies.
    #[serde(default)]
    pub checksum: ChecksumType,
}

fn default_buffer_size() -> usize {
    8 * 1024 * 1024 // 8 MiB
}

fn default_true() -> bool {
    true
}

impl Default for RelocateConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            prefer_atomic_moves: true,
            checksum: ChecksumType::default(),
        }
    }
}

impl RelocateConfig {
    /// Enables or disables the atomic-rename fast path.
    pub fn with_atomic_moves(mut self, enabled: bool) -> Self {
        self.prefer_atomic_moves = enabled;
        self
    }

    /// Sets the copy/checksum buffer size.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Selects the verification digest.
    pub fn with_checksum(mut self, checksum: ChecksumType) -> Self {
        self.checksum = checksum;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelocateConfig::default();
        assert_eq!(config.buffer_size, 8 * 1024 * 1024);
        assert!(config.prefer_atomic_moves);
        assert_eq!(config.checksum, ChecksumType::Md5);
    }

    #[test]
    fn test_config_builder() {
        let config = RelocateConfig::default()
            .with_atomic_moves(false)
            .with_buffer_size(1024)
            .with_checksum(ChecksumType::Sha256);

        assert!(!config.prefer_atomic_moves);
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.checksum, ChecksumType::Sha256);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RelocateConfig = toml::from_str("prefer_atomic_moves = false").unwrap();
        assert!(!config.prefer_atomic_moves);
        assert_eq!(config.buffer_size, 8 * 1024 * 1024);
        assert_eq!(config.checksum, ChecksumType::Md5);
    }
}
