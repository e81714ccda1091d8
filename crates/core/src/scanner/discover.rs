//! Recursive source-tree discovery.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::RunConfig;
use crate::media::{MediaGroup, MediaKind};
use crate::metadata::{parse_movie, parse_tv};

use super::naming::aggregate_group;
use super::ScanError;

/// Walks the configured source directory and returns one [`MediaGroup`] per
/// directory that holds matching files.
///
/// Groups come back in deterministic (path-sorted) order, with the files
/// inside each group sorted as well. Unreadable entries and files that fail
/// to parse are logged and skipped; they never abort the scan.
pub fn scan(config: &RunConfig) -> Result<Vec<MediaGroup>, ScanError> {
    let source = &config.source;
    if !source.exists() {
        return Err(ScanError::SourceNotFound(source.clone()));
    }
    if !source.is_dir() {
        return Err(ScanError::NotADirectory(source.clone()));
    }

    info!(
        source = %source.display(),
        extension = %config.extension,
        kind = %config.kind,
        "scanning source directory"
    );

    let mut by_directory: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(config.extension.as_str()) {
            continue;
        }
        let path = entry.into_path();
        let directory = path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| source.clone());
        by_directory.entry(directory).or_default().push(path);
    }

    let mut groups = Vec::new();
    for (directory, mut files) in by_directory {
        files.sort();
        let mut items = Vec::with_capacity(files.len());
        for file in files {
            let parsed = match config.kind {
                MediaKind::Tv => parse_tv(&file),
                MediaKind::Movie => parse_movie(&file),
            };
            match parsed {
                Ok(item) => items.push(item),
                Err(e) => warn!(file = %file.display(), "skipping unparseable file: {e}"),
            }
        }
        if items.is_empty() {
            continue;
        }
        debug!(
            directory = %directory.display(),
            items = items.len(),
            "assembled media group"
        );
        groups.push(aggregate_group(
            directory,
            config.extension.clone(),
            items,
        ));
    }

    info!(groups = groups.len(), "scan complete");
    Ok(groups)
}
