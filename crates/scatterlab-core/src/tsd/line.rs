//! Per-line parser for the tab-separated data format.
//!
//! One record per line: `<name>\t<label>\t<x>,<y>`. The name must start
//! with the `@` sentinel; `x` and `y` are decimal numbers.

use crate::error::ParseError;
use crate::types::{Point, Record, NAME_SENTINEL};

/// Parses one line into a [`Record`].
///
/// Pure function: no state, no side effects. Field-count problems and
/// unparsable coordinate pairs are [`ParseError::MalformedRecord`]; a name
/// missing the sentinel prefix is [`ParseError::InvalidName`].
pub fn parse_line(line: &str) -> Result<Record, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 3 {
        return Err(ParseError::MalformedRecord {
            reason: format!("expected 3 tab-separated fields, found {}", fields.len()),
        });
    }

    let name = checked_name(fields[0])?;
    let label = fields[1];
    let location = parse_pair(fields[2])?;

    Ok(Record::new(name, label, location))
}

/// Validates the sentinel prefix on a name field.
pub(crate) fn checked_name(name: &str) -> Result<&str, ParseError> {
    if name.starts_with(NAME_SENTINEL) {
        Ok(name)
    } else {
        Err(ParseError::InvalidName { name: name.into() })
    }
}

fn parse_pair(pair: &str) -> Result<Point, ParseError> {
    let tokens: Vec<&str> = pair.split(',').collect();
    if tokens.len() != 2 {
        return Err(ParseError::MalformedRecord {
            reason: format!("expected \"x,y\" coordinate pair, found {pair:?}"),
        });
    }
    let x = parse_coordinate(tokens[0])?;
    let y = parse_coordinate(tokens[1])?;
    Ok(Point::new(x, y))
}

fn parse_coordinate(token: &str) -> Result<f64, ParseError> {
    token
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedRecord {
            reason: format!("coordinate {token:?} is not a number"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_valid_line() {
        let record = parse_line("@a\tl\t3,8.4").unwrap();
        assert_eq!(record.name, "@a");
        assert_eq!(record.label, "l");
        assert_eq!(record.location, Point::new(3.0, 8.4));
    }

    #[test]
    fn negative_and_fractional_coordinates_parse() {
        let record = parse_line("@p\tlbl\t-1.5,0.25").unwrap();
        assert_eq!(record.location, Point::new(-1.5, 0.25));
    }

    #[test]
    fn name_without_sentinel_is_invalid() {
        let err = parse_line("a\tl\t3,3").unwrap_err();
        assert_eq!(err, ParseError::InvalidName { name: "a".into() });
    }

    #[test]
    fn too_few_fields_is_malformed() {
        assert!(matches!(
            parse_line("@a\tl").unwrap_err(),
            ParseError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn too_many_fields_is_malformed() {
        assert!(matches!(
            parse_line("@a\tl\t1,2\textra").unwrap_err(),
            ParseError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn pair_must_have_exactly_two_tokens() {
        assert!(matches!(
            parse_line("@a\tl\t1,2,3").unwrap_err(),
            ParseError::MalformedRecord { .. }
        ));
        assert!(matches!(
            parse_line("@a\tl\t1").unwrap_err(),
            ParseError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        assert!(matches!(
            parse_line("@a\tl\tx,2").unwrap_err(),
            ParseError::MalformedRecord { .. }
        ));
    }
}
