//! Duplicate-name validation pass.
//!
//! Runs over the whole input before any record is committed: commit is
//! all-or-nothing with respect to duplicate names, because a later valid
//! record would otherwise silently overwrite an earlier one.

use std::collections::HashSet;

use crate::error::ParseError;

use super::numbered_lines;
use super::report::LineError;

/// Scans every line for repeated record names.
///
/// Returns one [`LineError`] per repeated occurrence, each carrying the
/// 1-based line number of the repetition (the *second* and later sightings,
/// never the first). Line numbering is local to this invocation and follows
/// the same rules as the committing pass: blank lines are skipped.
pub fn find_duplicate_names(input: &str) -> Vec<LineError> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut duplicates = Vec::new();

    for (line_number, line) in numbered_lines(input) {
        let name = line.split('\t').next().unwrap_or(line);
        if !seen.insert(name) {
            duplicates.push(LineError {
                line: line_number,
                error: ParseError::DuplicateName { name: name.into() },
            });
        }
    }

    duplicates
}
