//! Validation of the scalar and categorical parameters the console and
//! dashboard collect from users.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUserInput {
    #[error("{field} '{value}' is outside the accepted range {min}-{max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: i64,
        max: i64,
    },
    #[error("{field} '{value}' is not a whole number")]
    NotANumber { field: &'static str, value: String },
    #[error("unrecognized {field} '{value}'; expected one of: {}", .accepted.join(", "))]
    UnknownToken {
        field: &'static str,
        value: String,
        accepted: Vec<&'static str>,
    },
}

impl InvalidUserInput {
    pub fn unknown(field: &'static str, value: &str, accepted: &[&'static str]) -> Self {
        Self::UnknownToken {
            field,
            value: value.to_string(),
            accepted: accepted.to_vec(),
        }
    }
}

/// Trim and lowercase; the only coercion applied to user tokens.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parses an integer within `[min, max]`.
pub fn parse_in_range(field: &'static str, raw: &str, min: i64, max: i64) -> Result<i64, InvalidUserInput> {
    let out_of_range = || InvalidUserInput::OutOfRange {
        field,
        value: raw.trim().to_string(),
        min,
        max,
    };
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| InvalidUserInput::NotANumber {
            field,
            value: raw.trim().to_string(),
        })?;
    if value < min || value > max {
        return Err(out_of_range());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_in_range_accepts_bounds() {
        assert_eq!(parse_in_range("mood rating", " 1 ", 1, 10), Ok(1));
        assert_eq!(parse_in_range("mood rating", "10", 1, 10), Ok(10));
    }

    #[test]
    fn parse_in_range_reports_offending_value() {
        let error = parse_in_range("mood rating", "11", 1, 10).expect_err("out of range");
        assert_eq!(
            error.to_string(),
            "mood rating '11' is outside the accepted range 1-10"
        );

        let error = parse_in_range("mood rating", "happy", 1, 10).expect_err("not a number");
        assert_eq!(
            error,
            InvalidUserInput::NotANumber {
                field: "mood rating",
                value: "happy".to_string(),
            }
        );
        assert_eq!(error.to_string(), "mood rating 'happy' is not a whole number");
    }

    #[test]
    fn unknown_token_lists_accepted_values() {
        let error = InvalidUserInput::unknown("texture", "Gooey", &["crispy", "soft"]);
        assert_eq!(
            error.to_string(),
            "unrecognized texture 'Gooey'; expected one of: crispy, soft"
        );
    }
}
