//! Relocation lifecycle integration tests.
//!
//! These drive the whole pipeline through the public API: scan a seeded
//! source tree, aggregate group names, relocate every item, and verify the
//! terminal outcomes, the on-disk end state, and the checksum invariants
//! of the copy fallback.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use relocator_core::{
    hash_file, scan, ChecksumType, MediaKind, RelocateConfig, RelocationOutcome, Relocator,
    RunConfig, RunReport,
};

/// Seeds a source tree and owns the temp dirs for one test run.
struct TestHarness {
    source: TempDir,
    library: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            source: TempDir::new().expect("failed to create source dir"),
            library: TempDir::new().expect("failed to create library dir"),
        }
    }

    fn seed(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.source.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn config(&self, kind: MediaKind) -> RunConfig {
        RunConfig {
            source: self.source.path().to_path_buf(),
            extension: ".mkv".to_string(),
            kind,
            destination: self.library.path().to_path_buf(),
            relocate: RelocateConfig::default(),
        }
    }

    fn library_path(&self, relative: &str) -> PathBuf {
        self.library.path().join(relative)
    }
}

#[test]
fn scan_and_relocate_tv_tree() {
    let harness = TestHarness::new();
    harness.seed("Show Name - S01E01.mkv", b"one");
    harness.seed("Show Name - S01E02.mkv", b"two");
    harness.seed("Show Name - S02E01.mkv", b"three");

    let config = harness.config(MediaKind::Tv);
    let mut groups = scan(&config).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].canonical_name(), Some("Show Name"));

    let relocator = Relocator::new(config.relocate.clone());
    let mut report = RunReport::new();
    for group in &mut groups {
        for item in group.items_mut() {
            let outcome = relocator.relocate(item, &config.destination);
            report.record(item, Some(outcome));
        }
    }

    assert_eq!(report.len(), 3);
    assert!(!report.has_failures());
    assert!(harness
        .library_path("Show Name/Season 1/Show Name - S01E01.mkv")
        .exists());
    assert!(harness
        .library_path("Show Name/Season 1/Show Name - S01E02.mkv")
        .exists());
    assert!(harness
        .library_path("Show Name/Season 2/Show Name - S02E01.mkv")
        .exists());
}

#[test]
fn majority_vote_names_a_mixed_group() {
    let harness = TestHarness::new();
    harness.seed("Foo - S01E01.mkv", b"a");
    harness.seed("Foo - S01E02.mkv", b"b");
    harness.seed("Foo - S01E03.mkv", b"c");
    harness.seed("Bar - S01E04.mkv", b"d");

    let groups = scan(&harness.config(MediaKind::Tv)).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].canonical_name(), Some("Foo"));
}

#[test]
fn relocation_is_idempotent_and_never_deletes() {
    let harness = TestHarness::new();
    let source = harness.seed("Show - S01E01.mkv", b"bytes");

    let config = harness.config(MediaKind::Tv);
    let relocator = Relocator::new(config.relocate.clone());

    let mut groups = scan(&config).unwrap();
    let item = &mut groups[0].items_mut()[0];
    let first = relocator.relocate(item, &config.destination);
    assert!(matches!(first, RelocationOutcome::Moved { .. }));
    assert!(!source.exists());

    // Relocating the already-placed item is a reported no-op.
    let second = relocator.relocate(item, &config.destination);
    let destination = harness.library_path("Show/Season 1/Show - S01E01.mkv");
    assert_eq!(
        second,
        RelocationOutcome::AlreadyExists {
            destination: destination.clone()
        }
    );
    assert!(destination.exists());
    assert_eq!(fs::read(&destination).unwrap(), b"bytes");
}

#[test]
fn forced_copy_preserves_content_and_leaves_one_copy() {
    let harness = TestHarness::new();
    let contents: &[u8] = b"the payload must arrive bit for bit";
    let source = harness.seed("Movie Title (2020).mkv", contents);

    let mut config = harness.config(MediaKind::Movie);
    // Forcing the fallback exercises the same copy-verify-delete path a
    // cross-device rename failure would take.
    config.relocate = RelocateConfig::default()
        .with_atomic_moves(false)
        .with_buffer_size(8);

    let checksum_before = hash_file(&source, ChecksumType::Md5, 8192).unwrap();

    let mut groups = scan(&config).unwrap();
    let relocator = Relocator::new(config.relocate.clone());
    let outcome = relocator.relocate(&mut groups[0].items_mut()[0], &config.destination);

    let destination = harness.library_path("Movie Title (2020).mkv");
    match outcome {
        RelocationOutcome::FallbackCopied {
            destination: dest,
            checksum,
        } => {
            assert_eq!(dest, destination);
            assert_eq!(checksum, checksum_before);
        }
        other => panic!("expected FallbackCopied, got {other:?}"),
    }

    // Exactly one copy remains and it hashes to the original digest.
    assert!(!source.exists());
    assert_eq!(
        hash_file(&destination, ChecksumType::Md5, 8192).unwrap(),
        checksum_before
    );
}

#[test]
fn one_broken_item_does_not_stop_the_batch() {
    let harness = TestHarness::new();
    harness.seed("Show - S01E01.mkv", b"one");
    let doomed = harness.seed("Show - S01E02.mkv", b"two");
    harness.seed("Show - S01E03.mkv", b"three");

    let config = harness.config(MediaKind::Tv);
    let mut groups = scan(&config).unwrap();

    // Break the middle item between scan and relocation.
    fs::remove_file(&doomed).unwrap();

    let relocator = Relocator::new(config.relocate.clone());
    let outcomes = relocator.relocate_batch(groups[0].items_mut(), &config.destination);

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(matches!(outcomes[1], RelocationOutcome::IoFailure { .. }));
    assert!(outcomes[2].is_success());
    assert!(harness
        .library_path("Show/Season 1/Show - S01E03.mkv")
        .exists());
}

#[test]
fn invalid_items_are_reported_but_never_moved() {
    let harness = TestHarness::new();
    // Parses to an empty title; stays where it is.
    let marker_only = harness.seed("S01E01.mkv", b"x");
    harness.seed("Show - S01E02.mkv", b"y");

    let config = harness.config(MediaKind::Tv);
    let mut groups = scan(&config).unwrap();
    assert_eq!(groups[0].canonical_name(), Some("Show"));

    let relocator = Relocator::new(config.relocate.clone());
    let mut report = RunReport::new();
    for item in groups[0].items_mut() {
        if item.is_valid() {
            let outcome = relocator.relocate(item, &config.destination);
            report.record(item, Some(outcome));
        } else {
            report.record(item, None);
        }
    }

    assert_eq!(report.len(), 2);
    assert!(marker_only.exists());
    assert!(harness
        .library_path("Show/Season 1/Show - S01E02.mkv")
        .exists());
    assert_eq!(report.tally().get("skipped (invalid metadata)"), Some(&1));
}

#[test]
fn group_overview_reads_like_a_rename_plan() {
    let harness = TestHarness::new();
    harness.seed("Show.Name.S01E02.1080p.mkv", b"x");

    let groups = scan(&harness.config(MediaKind::Tv)).unwrap();
    let overview = groups[0].to_string();
    assert!(overview.contains("Show.Name.S01E02.1080p.mkv -> Show Name - S01E02"));
}

#[test]
fn movie_destinations_are_flat_under_the_root() {
    let harness = TestHarness::new();
    harness.seed("Movie.Title.1987.720p.mkv", b"m");

    let config = harness.config(MediaKind::Movie);
    let mut groups = scan(&config).unwrap();
    let relocator = Relocator::new(config.relocate.clone());
    let outcome = relocator.relocate(&mut groups[0].items_mut()[0], &config.destination);

    assert!(outcome.is_success());
    assert_eq!(
        outcome.destination(),
        harness.library_path("Movie Title (1987).mkv")
    );
    assert!(harness.library_path("Movie Title (1987).mkv").exists());
}

#[test]
fn destination_tree_is_created_on_demand() {
    let harness = TestHarness::new();
    harness.seed("Show - S05E01.mkv", b"x");

    let config = harness.config(MediaKind::Tv);
    let deep_root = harness.library.path().join("nested/media/tv");
    let mut groups = scan(&config).unwrap();

    let outcome =
        Relocator::new(config.relocate.clone()).relocate(&mut groups[0].items_mut()[0], &deep_root);
    assert!(outcome.is_success());
    assert!(deep_root.join("Show/Season 5/Show - S05E01.mkv").exists());
}

#[test]
fn already_relocated_source_survives_a_second_full_run() {
    let harness = TestHarness::new();
    harness.seed("Show - S01E01.mkv", b"first run");

    let config = harness.config(MediaKind::Tv);
    let relocator = Relocator::new(config.relocate.clone());

    let mut groups = scan(&config).unwrap();
    for item in groups[0].items_mut() {
        relocator.relocate(item, &config.destination);
    }

    // A new file with the same parsed identity shows up later.
    harness.seed("Show - S01E01.mkv", b"second run");
    let mut groups = scan(&config).unwrap();
    let outcome = relocator.relocate(&mut groups[0].items_mut()[0], &config.destination);

    // Collision: the placed file wins, the newcomer stays put.
    assert!(matches!(outcome, RelocationOutcome::AlreadyExists { .. }));
    let destination = harness.library_path("Show/Season 1/Show - S01E01.mkv");
    assert_eq!(fs::read(destination).unwrap(), b"first run");
    assert_eq!(
        fs::read(harness.source.path().join("Show - S01E01.mkv")).unwrap(),
        b"second run"
    );
}

/// Outcome destinations always live under the configured root.
#[test]
fn outcome_reports_destination_under_root() {
    let harness = TestHarness::new();
    harness.seed("Show - S01E01.mkv", b"x");

    let config = harness.config(MediaKind::Tv);
    let mut groups = scan(&config).unwrap();
    let outcome = Relocator::new(config.relocate.clone())
        .relocate(&mut groups[0].items_mut()[0], &config.destination);

    assert!(outcome.destination().starts_with(harness.library.path()));
}
