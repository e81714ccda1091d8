//! Per-run outcome reporting.
//!
//! The report is the output boundary: the mutated item paths plus one
//! terminal disposition per discovered item, including the items that were
//! skipped for incomplete metadata. Nothing here is persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::media::MediaItem;
use crate::relocate::RelocationOutcome;

/// What happened to one discovered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDisposition {
    /// The relocation protocol ran to a terminal outcome.
    Relocated(RelocationOutcome),
    /// The item never entered relocation because its parsed metadata was
    /// incomplete (empty title).
    SkippedInvalid,
}

impl ItemDisposition {
    /// Short status label for tallies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Relocated(outcome) => outcome.label(),
            Self::SkippedInvalid => "skipped (invalid metadata)",
        }
    }
}

/// One row of the final report.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub source: PathBuf,
    pub custom_name: String,
    pub disposition: ItemDisposition,
}

/// Collected outcomes for a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one item. `None` means the item was skipped as invalid.
    pub fn record(&mut self, item: &MediaItem, outcome: Option<RelocationOutcome>) {
        let disposition = match outcome {
            Some(outcome) => ItemDisposition::Relocated(outcome),
            None => ItemDisposition::SkippedInvalid,
        };
        self.entries.push(ReportEntry {
            source: item.source_path().to_path_buf(),
            custom_name: item.custom_name().to_string(),
            disposition,
        });
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when any item ended in a state that needs human attention.
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|entry| match &entry.disposition {
            ItemDisposition::Relocated(outcome) => outcome.is_failure(),
            ItemDisposition::SkippedInvalid => false,
        })
    }

    /// Outcome counts keyed by status label, in label order.
    pub fn tally(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.entries {
            *counts.entry(entry.disposition.label()).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} items:", self.entries.len())?;
        for entry in &self.entries {
            writeln!(
                f,
                "  {} -> {} [{}]",
                entry.source.display(),
                entry.custom_name,
                entry.disposition.label(),
            )?;
        }
        for (label, count) in self.tally() {
            writeln!(f, "{label}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::metadata::parse_tv;

    #[test]
    fn test_report_records_and_tallies() {
        let item = parse_tv(Path::new("/src/Show - S01E01.mkv")).unwrap();
        let mut report = RunReport::new();
        report.record(
            &item,
            Some(RelocationOutcome::Moved {
                destination: PathBuf::from("/lib/Show/Season 1/Show - S01E01.mkv"),
            }),
        );
        report.record(&item, None);

        assert_eq!(report.len(), 2);
        assert!(!report.has_failures());
        let tally = report.tally();
        assert_eq!(tally.get("moved"), Some(&1));
        assert_eq!(tally.get("skipped (invalid metadata)"), Some(&1));
    }

    #[test]
    fn test_failures_detected() {
        let item = parse_tv(Path::new("/src/Show - S01E01.mkv")).unwrap();
        let mut report = RunReport::new();
        report.record(
            &item,
            Some(RelocationOutcome::IoFailure {
                destination: PathBuf::from("/lib/x.mkv"),
                reason: "disk full".to_string(),
            }),
        );
        assert!(report.has_failures());
    }

    #[test]
    fn test_display_lists_items() {
        let item = parse_tv(Path::new("/src/Show - S01E01.mkv")).unwrap();
        let mut report = RunReport::new();
        report.record(
            &item,
            Some(RelocationOutcome::AlreadyExists {
                destination: PathBuf::from("/lib/x.mkv"),
            }),
        );
        let rendered = report.to_string();
        assert!(rendered.contains("Show - S01E01"));
        assert!(rendered.contains("already exists"));
    }
}
