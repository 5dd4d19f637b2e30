//! The tab-separated data format.
//!
//! One record per line, fields separated by tabs:
//!
//! ```text
//! <name>\t<label>\t<x>,<y>
//! ```
//!
//! `<name>` must start with `@`; `<x>`/`<y>` are decimal numbers.
//!
//! Parsing is a single well-defined two-phase scan (validate-then-commit):
//!
//! 1. [`validator::find_duplicate_names`] scans every line for repeated
//!    names, so commit can be all-or-nothing with respect to duplicates.
//! 2. [`line::parse_line`] parses each line into a typed [`Record`],
//!    accumulating failures into a [`ParseReport`].
//!
//! Only when both phases find nothing wrong is a [`Dataset`] committed;
//! on any failure the caller's previously-loaded dataset stays untouched.

mod line;
mod report;
mod validator;

use std::path::Path;

use tracing::debug;

use crate::dataset::Dataset;
use crate::error::CoreResult;
use crate::types::Record;

pub use line::parse_line;
pub use report::{LineError, ParseReport};
pub use validator::find_duplicate_names;

/// Yields `(1-based physical line number, line)` for every non-blank line.
///
/// Both scan phases share this view, so line numbers in duplicate errors
/// and malformed-record errors always agree.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty())
}

/// Parses a whole input into a [`Dataset`], or an aggregated [`ParseReport`].
///
/// All-or-nothing: any duplicate name or malformed line anywhere in the
/// input means no dataset is produced.
pub fn parse_dataset(input: &str) -> Result<Dataset, ParseReport> {
    let mut errors = find_duplicate_names(input);

    let mut records: Vec<Record> = Vec::new();
    for (line_number, line) in numbered_lines(input) {
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(error) => errors.push(LineError {
                line: line_number,
                error,
            }),
        }
    }

    if !errors.is_empty() {
        let report = ParseReport::new(errors);
        debug!(errors = report.error_count(), "input rejected");
        return Err(report);
    }

    let mut dataset = Dataset::new();
    for record in records {
        dataset.insert(record);
    }
    debug!(
        instances = dataset.len(),
        labels = dataset.label_count(),
        "dataset committed"
    );
    Ok(dataset)
}

/// Reads and parses a `.tsd` file.
pub fn read_tsd_file(path: impl AsRef<Path>) -> CoreResult<Dataset> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_dataset(&text)?)
}

/// Writes a dataset back out in the `.tsd` line format.
pub fn write_tsd_file(path: impl AsRef<Path>, dataset: &Dataset) -> CoreResult<()> {
    std::fs::write(path, dataset.to_tsd_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::types::Point;

    #[test]
    fn worked_example_parses_to_two_records() {
        let dataset = parse_dataset("@a\tred\t0,0\n@b\tblue\t10,10\n").unwrap();
        let summary = dataset.summary();
        assert_eq!(summary.instances, 2);
        assert_eq!(summary.label_count, 2);
        assert!(summary.distinct_labels.contains("red"));
        assert!(summary.distinct_labels.contains("blue"));
        assert_eq!(dataset.location_of("@b"), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn worked_example_duplicate_fails_on_line_2() {
        let report = parse_dataset("@a\tred\t0,0\n@a\tblue\t1,1\n").unwrap_err();
        let dup = report.first_duplicate().unwrap();
        assert_eq!(dup.line, 2);
        assert_eq!(
            dup.error,
            ParseError::DuplicateName { name: "@a".into() }
        );
    }

    #[test]
    fn key_sets_equal_parsed_names() {
        let dataset = parse_dataset("@x\ta\t1,2\n@y\tb\t3,4\n@z\ta\t5,6\n").unwrap();
        let names: Vec<&String> = dataset.labels_view().keys().collect();
        let location_names: Vec<&String> = dataset.locations_view().keys().collect();
        assert_eq!(names, location_names);
        assert_eq!(names, vec!["@x", "@y", "@z"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let input = "@a\tred\t0,0\n@b\tblue\t10,10\n";
        let first = parse_dataset(input).unwrap();
        let second = parse_dataset(input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn errors_accumulate_across_the_whole_input() {
        let input = "@a\tred\t0,0\nbad\tl\t1,1\n@c\tl\tnope\n@a\tl\t2,2\n";
        let report = parse_dataset(input).unwrap_err();
        // line 2: missing sentinel, line 3: bad pair, line 4: duplicate @a
        assert_eq!(report.error_count(), 3);
        assert_eq!(report.malformed_count(), 2);
        assert_eq!(report.first_duplicate().unwrap().line, 4);
    }

    #[test]
    fn blank_lines_are_ignored_but_numbering_stays_physical() {
        let input = "@a\tred\t0,0\n\n@a\tblue\t1,1\n";
        let report = parse_dataset(input).unwrap_err();
        assert_eq!(report.first_duplicate().unwrap().line, 3);
    }

    #[test]
    fn no_partial_commit_on_failure() {
        let input = "@a\tred\t0,0\nnot-a-record\n";
        assert!(parse_dataset(input).is_err());
        // The caller's dataset is whatever it was before; parse_dataset
        // never hands back a half-filled one.
    }

    #[test]
    fn trailing_newline_is_optional() {
        let with = parse_dataset("@a\tl\t1,1\n").unwrap();
        let without = parse_dataset("@a\tl\t1,1").unwrap();
        assert_eq!(with, without);
    }
}
