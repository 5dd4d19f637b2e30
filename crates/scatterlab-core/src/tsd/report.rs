//! Aggregated parse reporting.
//!
//! Expected per-line problems are modeled as values and collected across
//! the whole input, so a caller can present one summary instead of one
//! dialog per bad line. Fatal propagation is reserved for genuinely
//! unexpected failures elsewhere in the crate.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// One failed line: 1-based physical line number plus the typed error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    /// 1-based line number in the original input.
    pub line: usize,
    /// What went wrong on that line.
    pub error: ParseError,
}

/// Every problem found while scanning one input.
///
/// Produced only when at least one line failed; an input that yields an
/// empty report yields a `Dataset` instead. Errors appear in ascending
/// line order, duplicates first within equal lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// All accumulated line errors, sorted by line number.
    pub errors: Vec<LineError>,
}

impl ParseReport {
    pub(crate) fn new(mut errors: Vec<LineError>) -> Self {
        errors.sort_by_key(|e| e.line);
        Self { errors }
    }

    /// Total number of failed lines.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The first duplicate-name error, if any, with its 1-based line.
    pub fn first_duplicate(&self) -> Option<&LineError> {
        self.errors
            .iter()
            .find(|e| matches!(e.error, ParseError::DuplicateName { .. }))
    }

    /// Count of malformed-record and invalid-name lines.
    pub fn malformed_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| !matches!(e.error, ParseError::DuplicateName { .. }))
            .count()
    }
}

impl std::error::Error for ParseReport {}

impl std::fmt::Display for ParseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SHOWN: usize = 5;
        write!(f, "{} invalid line(s)", self.error_count())?;
        for e in self.errors.iter().take(SHOWN) {
            write!(f, "; line {}: {}", e.line, e.error)?;
        }
        if self.error_count() > SHOWN {
            write!(f, "; and {} more", self.error_count() - SHOWN)?;
        }
        Ok(())
    }
}
