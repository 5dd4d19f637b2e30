//! End-to-end tests for the parse/validate/commit pipeline.

use scatterlab_core::error::{CoreError, ParseError};
use scatterlab_core::tsd;
use scatterlab_core::Point;

const WELL_SEPARATED: &str = "@a\tred\t0,0\n@b\tblue\t10,10\n";

#[test]
fn valid_input_commits_with_matching_key_sets() {
    let dataset = tsd::parse_dataset(WELL_SEPARATED).unwrap();
    assert_eq!(dataset.len(), 2);

    let label_names: Vec<_> = dataset.labels_view().keys().cloned().collect();
    let location_names: Vec<_> = dataset.locations_view().keys().cloned().collect();
    assert_eq!(label_names, location_names);
    assert_eq!(label_names, vec!["@a", "@b"]);

    let summary = dataset.summary();
    assert_eq!(summary.instances, 2);
    assert_eq!(summary.label_count, 2);
    assert_eq!(
        summary.distinct_labels.iter().collect::<Vec<_>>(),
        vec!["blue", "red"]
    );
}

#[test]
fn duplicate_name_fails_with_line_of_second_occurrence() {
    let report = tsd::parse_dataset("@a\tred\t0,0\n@a\tblue\t1,1\n").unwrap_err();
    let dup = report.first_duplicate().unwrap();
    assert_eq!(dup.line, 2);
    assert_eq!(dup.error, ParseError::DuplicateName { name: "@a".into() });
}

#[test]
fn two_independent_parses_yield_identical_datasets() {
    let first = tsd::parse_dataset(WELL_SEPARATED).unwrap();
    let second = tsd::parse_dataset(WELL_SEPARATED).unwrap();
    assert_eq!(first, second);
}

#[test]
fn failed_parse_leaves_previous_dataset_untouched() {
    let loaded = tsd::parse_dataset(WELL_SEPARATED).unwrap();
    let before = loaded.clone();

    // A rejected load produces no dataset at all; the previously loaded
    // one is whatever the caller still holds.
    assert!(tsd::parse_dataset("@a\tred\t0,0\nbroken line\n").is_err());
    assert_eq!(loaded, before);
}

#[test]
fn report_aggregates_every_bad_line() {
    let input = "no-sentinel\tl\t1,1\n@ok\tl\t2,2\n@bad\tl\tone,two\n@ok\tl\t3,3\n";
    let report = tsd::parse_dataset(input).unwrap_err();
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.malformed_count(), 2);
    assert_eq!(report.first_duplicate().unwrap().line, 4);

    let display = report.to_string();
    assert!(display.contains("3 invalid line(s)"));
    assert!(display.contains("line 4"));
}

#[test]
fn tsd_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("points.tsd");

    let original = tsd::parse_dataset("@p\talpha\t1.5,-2\n@q\tbeta\t3,4\n").unwrap();
    tsd::write_tsd_file(&path, &original).unwrap();

    let reloaded = tsd::read_tsd_file(&path).unwrap();
    assert_eq!(reloaded, original);
    assert_eq!(reloaded.location_of("@p"), Some(Point::new(1.5, -2.0)));
}

#[test]
fn reading_a_bad_file_surfaces_the_aggregated_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tsd");
    std::fs::write(&path, "@a\tl\t0,0\n@a\tl\t1,1\n").unwrap();

    match tsd::read_tsd_file(&path) {
        Err(CoreError::Parse(report)) => {
            assert_eq!(report.first_duplicate().unwrap().line, 2);
        }
        other => panic!("expected parse report, got {other:?}"),
    }
}

#[test]
fn reading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.tsd");
    assert!(matches!(
        tsd::read_tsd_file(&missing),
        Err(CoreError::Io(_))
    ));
}
