//! Tests for writing reports to files.

use std::fs;

use scope_profile::{AggregationStore, Error, LocationKey, REPORT_HEADER};

#[test]
fn dump_writes_sorted_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");

    let store = AggregationStore::new();
    let f = LocationKey::new("a.cpp", 10, "f");
    for duration in [100, 200, 50] {
        store.record_sample(&f, duration);
    }
    store.record_sample(&LocationKey::new("a.cpp", 20, "g"), 500);

    store.dump_report(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "===== Profiling Report =====\n\
         a.cpp:20:g: 500 us, 1 calls\n\
         a.cpp:10:f: 350 us, 3 calls\n"
    );
}

#[test]
fn empty_store_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");

    AggregationStore::new().dump_report(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{REPORT_HEADER}\n"));
}

#[test]
fn dump_replaces_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");
    fs::write(&path, "stale contents that are much longer than the new report\n").unwrap();

    AggregationStore::new().dump_report(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{REPORT_HEADER}\n"));
}

#[test]
fn report_lines_are_in_descending_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.txt");

    let store = AggregationStore::new();
    for (line, total, calls) in [(1, 5, 1), (2, 50, 2), (3, 50, 5), (4, 0, 9), (5, 500, 1)] {
        let key = LocationKey::new("order.rs", line, "f");
        for _ in 1..calls {
            store.record_sample(&key, 0);
        }
        store.record_sample(&key, total);
    }

    store.dump_report(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(REPORT_HEADER));

    let parsed: Vec<(u64, u64)> = lines
        .map(|line| {
            let (_, stats) = line.rsplit_once(": ").unwrap();
            let (total, calls) = stats.split_once(" us, ").unwrap();
            let calls = calls.strip_suffix(" calls").unwrap();
            (total.parse().unwrap(), calls.parse().unwrap())
        })
        .collect();

    assert_eq!(parsed, [(500, 1), (50, 5), (50, 2), (5, 1), (0, 9)]);
}

#[test]
fn unopenable_destination_returns_error_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_directory").join("profile.txt");

    let store = AggregationStore::new();
    let key = LocationKey::new("a.cpp", 10, "f");
    store.record_sample(&key, 100);

    let error = store.dump_report(&path).unwrap_err();

    assert!(matches!(error, Error::OpenDestination { .. }));
    assert!(!path.exists());
    assert_eq!(store.entry(&key).unwrap().total_duration_micros(), 100);
    assert_eq!(store.len(), 1);
}

#[test]
fn directory_as_destination_returns_error() {
    let dir = tempfile::tempdir().unwrap();

    let store = AggregationStore::new();
    store.record_sample(&LocationKey::new("a.cpp", 10, "f"), 100);

    assert!(matches!(
        store.dump_report(dir.path()),
        Err(Error::OpenDestination { .. })
    ));
}
