mod common;

use common::{day_of_2020, MockRepo};
use pretty_assertions::assert_eq;
use relstat::error::RelstatError;
use relstat::model::DateRange;
use relstat::select::{read_id_list, SelectOptions, VersionSelector, VersionSource};
use std::io::Write;

fn window(since: u32, before: u32) -> DateRange {
    DateRange::new(day_of_2020(since), day_of_2020(before))
}

fn discover(range: DateRange) -> SelectOptions {
    SelectOptions {
        source: VersionSource::Discover {
            range,
            stables: None,
            head: Some("master".to_string()),
        },
        baselines: None,
        extra_version: None,
    }
}

fn explicit(ids: &[&str]) -> SelectOptions {
    SelectOptions {
        source: VersionSource::Explicit(ids.iter().map(|s| s.to_string()).collect()),
        baselines: None,
        extra_version: None,
    }
}

fn releases(records: &[relstat::model::ReleaseRecord]) -> Vec<(&str, &str)> {
    records
        .iter()
        .map(|r| (r.release.as_str(), r.baseline.as_str()))
        .collect()
}

#[test]
fn discovery_excludes_window_boundaries() {
    let repo = MockRepo::new()
        .tag("v1.0", 5)
        .tag("v1.1", 6)
        .tag("v1.2", 9)
        .tag("v1.3", 10);
    let found = VersionSelector::new(&repo)
        .discover(&window(5, 10), None, None)
        .unwrap();
    assert_eq!(found, ["v1.1", "v1.2"]);
}

#[test]
fn discovery_skips_malformed_tags() {
    let repo = MockRepo::new()
        .tag("v1.0", 2)
        .tag("v1.1-rc1", 3)
        .tag("v1.1-rc999", 4)
        .tag("release-1.1", 5)
        .tag("v1.1.1", 6)
        .tag("v1.1", 7);
    let found = VersionSelector::new(&repo)
        .discover(&window(1, 20), None, None)
        .unwrap();
    assert_eq!(found, ["v1.0", "v1.1-rc1", "v1.1"]);
}

#[test]
fn discovery_includes_head_inside_window_only() {
    let inside = MockRepo::new().tag("v1.0", 2).branch("master", 8);
    let records = VersionSelector::new(&inside).select(&discover(window(1, 10))).unwrap();
    assert_eq!(releases(&records), [("v1.0", "v1.0"), ("master", "v1.0")]);

    let outside = MockRepo::new().tag("v1.0", 2).branch("master", 12);
    let records = VersionSelector::new(&outside).select(&discover(window(1, 10))).unwrap();
    assert_eq!(releases(&records), [("v1.0", "v1.0")]);
}

#[test]
fn stable_discovery_ignores_head_and_other_series() {
    let repo = MockRepo::new()
        .tag("4.19", 2)
        .tag("4.20", 3)
        .tag("4.20-rt", 4)
        .tag("5.1", 5)
        .tag("v4.21", 6)
        .branch("master", 7);
    let mut opts = discover(window(1, 10));
    opts.source = VersionSource::Discover {
        range: window(1, 10),
        stables: Some("4".to_string()),
        head: Some("master".to_string()),
    };
    let records = VersionSelector::new(&repo).select(&opts).unwrap();
    assert_eq!(releases(&records), [("4.19", "4.19"), ("4.20", "4.19")]);
}

#[test]
fn releases_are_ordered_by_commit_time_not_version() {
    let repo = MockRepo::new()
        .tag("v2.0", 9)
        .tag("v1.9", 7)
        .tag("v1.10", 3);
    let records = VersionSelector::new(&repo).select(&discover(window(1, 20))).unwrap();
    assert_eq!(
        releases(&records),
        [("v1.10", "v1.10"), ("v1.9", "v1.10"), ("v2.0", "v1.9")]
    );
    assert_eq!(records[0].committed_at, day_of_2020(3));
}

#[test]
fn tags_on_one_commit_order_by_version() {
    let repo = MockRepo::new()
        .tag("v1.1", 3)
        .tag("v1.1-rc2", 3)
        .tag("v1.0", 1)
        .branch("master", 3);
    let records = VersionSelector::new(&repo)
        .select(&explicit(&["master", "v1.1", "v1.1-rc2", "v1.0"]))
        .unwrap();
    assert_eq!(
        releases(&records),
        [("v1.0", "v1.0"), ("v1.1-rc2", "v1.0"), ("v1.1", "v1.1-rc2"), ("master", "v1.1")]
    );
}

#[test]
fn unresolvable_identifiers_are_dropped() {
    let repo = MockRepo::new().tag("v1.0", 2).tag("v1.1", 4);
    let records = VersionSelector::new(&repo)
        .select(&explicit(&["v1.1", "no-such-tag", "v1.0"]))
        .unwrap();
    assert_eq!(releases(&records), [("v1.0", "v1.0"), ("v1.1", "v1.0")]);
}

#[test]
fn commit_times_are_resolved_once_per_identifier() {
    let repo = MockRepo::new().tag("v1.0", 2).tag("v1.1", 4).branch("master", 6);
    VersionSelector::new(&repo).select(&discover(window(1, 10))).unwrap();
    assert_eq!(repo.time_calls.get(), 3);
}

#[test]
fn explicit_baselines_pair_with_sorted_releases() {
    let repo = MockRepo::new().tag("v1.0", 2).tag("v1.1", 4).tag("v0.9", 1);
    let mut opts = explicit(&["v1.1", "v1.0"]);
    opts.baselines = Some(vec!["v0.9".to_string(), "v0.9".to_string()]);
    let records = VersionSelector::new(&repo).select(&opts).unwrap();
    assert_eq!(releases(&records), [("v1.0", "v0.9"), ("v1.1", "v0.9")]);
}

#[test]
fn baseline_count_mismatch_is_fatal_before_any_diff() {
    let repo = MockRepo::new().tag("v1.0", 2).tag("v1.1", 4);
    let mut opts = explicit(&["v1.0", "v1.1"]);
    opts.baselines = Some(vec!["v0.9".to_string()]);

    match VersionSelector::new(&repo).select(&opts) {
        Err(RelstatError::BaselineCount { baselines, releases }) => {
            assert_eq!((baselines, releases), (1, 2));
        }
        other => panic!("expected a baseline count error, got {other:?}"),
    }
    assert_eq!(repo.shortstat_calls.get(), 0);
}

#[test]
fn extra_version_filter_keeps_chronological_baselines() {
    let repo = MockRepo::new()
        .tag("v1.0", 2)
        .tag("v1.1-rc1", 3)
        .tag("v1.1", 4)
        .tag("v1.2-rc1", 5);
    let mut opts = discover(window(1, 10));
    opts.extra_version = Some("rc1".to_string());
    let records = VersionSelector::new(&repo).select(&opts).unwrap();
    assert_eq!(
        releases(&records),
        [("v1.1-rc1", "v1.0"), ("v1.2-rc1", "v1.1")]
    );
}

#[test]
fn empty_selection_is_not_an_error() {
    let repo = MockRepo::new().tag("v1.0", 20);
    let mut opts = discover(window(1, 10));
    opts.baselines = Some(vec!["v0.1".to_string()]);
    let records = VersionSelector::new(&repo).select(&opts).unwrap();
    assert!(records.is_empty());
}

#[test]
fn id_list_files_are_trimmed_and_skip_blank_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "  v1.0\nv1.1  \n\n\tv1.2\n").unwrap();
    let ids = read_id_list(file.path(), "versions").unwrap();
    assert_eq!(ids, ["v1.0", "v1.1", "v1.2"]);
}

#[test]
fn missing_id_list_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_id_list(dir.path().join("missing.txt"), "versions").unwrap_err();
    assert!(matches!(err, RelstatError::VersionsFile { kind: "versions", .. }));
    assert!(err.to_string().starts_with("Wrong versions file"));
}
