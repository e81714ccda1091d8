//! Safe relocation of parsed media files.
//!
//! Moves run an atomic-rename-first protocol: when the destination sits on
//! the same filesystem a single rename settles the item; across filesystem
//! boundaries the engine falls back to a checksum-verified copy and deletes
//! the source only after the destination's digest matches. Every item ends
//! in exactly one terminal [`RelocationOutcome`], and no item's failure
//! ever aborts the batch.

mod config;
mod engine;
mod types;

pub use config::RelocateConfig;
pub use engine::Relocator;
pub use types::RelocationOutcome;
