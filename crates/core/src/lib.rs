pub mod checksum;
pub mod config;
pub mod media;
pub mod metadata;
pub mod relocate;
pub mod report;
pub mod scanner;
pub mod transcode;

pub use checksum::{hash_file, ChecksumType};
pub use config::{load_config, load_config_from_str, validate_config, ConfigError, RunConfig};
pub use media::{Episode, MediaDetails, MediaGroup, MediaItem, MediaKind, ReleaseYear, Resolution};
pub use metadata::{parse_movie, parse_resolution, parse_tv, MetadataError};
pub use relocate::{RelocateConfig, RelocationOutcome, Relocator};
pub use report::{ItemDisposition, ReportEntry, RunReport};
pub use scanner::{aggregate_group, canonical_name, scan, ScanError};
pub use transcode::{TranscodeStatus, Transcoder};
