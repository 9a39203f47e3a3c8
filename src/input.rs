//! Parsing of user-entered charge lists and grid parameters.
//!
//! Charges are written one per line as `x y q`, separated by whitespace. Leading
//! and trailing whitespace of the whole text is dropped first; blank lines inside
//! it are ignored but still counted.

use thiserror::Error;

use crate::charges::Charge;
use crate::errors::ValidationError;
use crate::grid::GridSpec;
use crate::math::Scalar;

/// Errors raised while parsing text input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// No charge lines were entered.
    #[error("at least one charge is required")]
    Empty,
    /// A line does not hold exactly three values.
    #[error("line {line}: expected three values (x y q), found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of whitespace-separated values on the line.
        found: usize,
    },
    /// A value on a charge line is not a number.
    #[error("line {line}: x, y and q must be numbers, got `{token}`")]
    NotANumber {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        token: String,
    },
    /// Grid bounds or point count are unusable.
    #[error("grid parameters: {0}")]
    Grid(#[from] GridInputError),
}

/// Reason a set of grid parameters was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridInputError {
    /// A bound is not a number.
    #[error("`{0}` is not a number")]
    NotANumber(String),
    /// The point count is not a whole number.
    #[error("`{0}` is not a whole number")]
    NotAnInteger(String),
    /// Parsed values violate the grid invariants.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

fn parse_number(token: &str, line: usize) -> Result<Scalar, InputError> {
    token.parse().map_err(|_| InputError::NotANumber {
        line,
        token: token.to_owned(),
    })
}

/// Parses one charge per non-blank line.
pub fn parse_charges(text: &str) -> Result<Vec<Charge>, InputError> {
    let mut charges = Vec::new();
    for (idx, raw) in text.trim().lines().enumerate() {
        let line = idx + 1;
        let parts: Vec<&str> = raw.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let [x, y, q] = parts.as_slice() else {
            return Err(InputError::FieldCount {
                line,
                found: parts.len(),
            });
        };
        charges.push(Charge::new(
            parse_number(x, line)?,
            parse_number(y, line)?,
            parse_number(q, line)?,
        ));
    }
    if charges.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(charges)
}

/// Parses grid bounds and point count as typed into a form.
pub fn parse_grid(min: &str, max: &str, count: &str) -> Result<GridSpec, InputError> {
    let bound = |s: &str| {
        let s = s.trim();
        s.parse::<Scalar>()
            .map_err(|_| GridInputError::NotANumber(s.to_owned()))
    };
    let min = bound(min)?;
    let max = bound(max)?;
    let count_text = count.trim();
    let count: i64 = count_text
        .parse()
        .map_err(|_| GridInputError::NotAnInteger(count_text.to_owned()))?;
    // non-positive counts map to 0 so validation reports bounds first
    let count = usize::try_from(count.max(0))
        .map_err(|_| GridInputError::NotAnInteger(count_text.to_owned()))?;
    let grid = GridSpec::new(min, max, count);
    grid.validate().map_err(GridInputError::from)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_charges_and_skips_blank_lines() {
        let charges = parse_charges("0 0 1\n\n  1.5\t-2 -1e-1  \n").unwrap();
        assert_eq!(charges, vec![Charge::new(0.0, 0.0, 1.0), Charge::new(1.5, -2.0, -0.1)]);
    }

    #[test]
    fn reports_line_numbers_including_blank_lines() {
        assert_eq!(
            parse_charges("0 0 1\n\n1 2\n"),
            Err(InputError::FieldCount { line: 3, found: 2 })
        );
        let err = parse_charges("0 0 1\n1 two 3").unwrap_err();
        assert_eq!(
            err,
            InputError::NotANumber {
                line: 2,
                token: "two".into()
            }
        );
        assert_eq!(err.to_string(), "line 2: x, y and q must be numbers, got `two`");
    }

    #[test]
    fn leading_blank_lines_are_not_counted() {
        assert_eq!(
            parse_charges("\n\n  0 0\n1 1 1"),
            Err(InputError::FieldCount { line: 1, found: 2 })
        );
        assert_eq!(
            parse_charges("\n\t\n0 0 1\n\nx 1 1\n\n"),
            Err(InputError::NotANumber {
                line: 3,
                token: "x".into()
            })
        );
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(parse_charges(""), Err(InputError::Empty));
        assert_eq!(parse_charges("\n \n"), Err(InputError::Empty));
        assert_eq!(parse_charges("  \n\t\n"), Err(InputError::Empty));
    }

    #[test]
    fn parses_default_form_values() {
        assert_eq!(parse_grid("-10", " 10 ", "200").unwrap(), GridSpec::default());
    }

    #[test]
    fn grid_errors_are_prefixed() {
        let err = parse_grid("5", "5", "10").unwrap_err();
        assert!(matches!(
            err,
            InputError::Grid(GridInputError::Invalid(ValidationError::InvertedBounds { .. }))
        ));
        assert!(err.to_string().starts_with("grid parameters: "));

        assert_eq!(
            parse_grid("-1", "1", "0"),
            Err(InputError::Grid(GridInputError::Invalid(ValidationError::EmptyGrid)))
        );
        // bounds are reported before the point count
        assert!(matches!(
            parse_grid("5", "5", "0"),
            Err(InputError::Grid(GridInputError::Invalid(ValidationError::InvertedBounds { .. })))
        ));
        assert_eq!(
            parse_grid("-1", "1", "-4"),
            Err(InputError::Grid(GridInputError::Invalid(ValidationError::EmptyGrid)))
        );
        assert_eq!(
            parse_grid("-1", "1", "2.5"),
            Err(InputError::Grid(GridInputError::NotAnInteger("2.5".into())))
        );
        assert_eq!(
            parse_grid("low", "1", "3"),
            Err(InputError::Grid(GridInputError::NotANumber("low".into())))
        );
    }
}
