// src/services/numeric.rs
use log::warn;
use std::str::FromStr;

use super::error::LoadError;

/// What to do with a numeric cell that is missing or does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Reject the table with a `LoadError` naming the line and column.
    #[default]
    Strict,
    /// Substitute NaN and keep going; NaN then flows through every sum
    /// and percentage that touches the cell.
    Lenient,
}

impl FromStr for ParsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ParsePolicy::Strict),
            "lenient" => Ok(ParsePolicy::Lenient),
            other => Err(format!("Unknown parse policy '{}'", other)),
        }
    }
}

/// Location of the row being parsed, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub resource: &'a str,
    pub line: u64,
}

pub fn parse_number(
    raw: Option<&str>,
    column: &str,
    ctx: FieldContext,
    policy: ParsePolicy,
) -> Result<f64, LoadError> {
    let raw = match raw {
        Some(raw) => raw.trim(),
        None => {
            return match policy {
                ParsePolicy::Strict => Err(LoadError::MissingColumn {
                    resource: ctx.resource.to_string(),
                    line: ctx.line,
                    column: column.to_string(),
                }),
                ParsePolicy::Lenient => {
                    warn!(
                        "{} line {}: column '{}' missing, using NaN",
                        ctx.resource, ctx.line, column
                    );
                    Ok(f64::NAN)
                }
            };
        }
    };

    match (raw.parse::<f64>(), policy) {
        (Ok(value), ParsePolicy::Strict) if value.is_finite() => Ok(value),
        (Ok(value), ParsePolicy::Lenient) => Ok(value),
        (_, ParsePolicy::Strict) => Err(LoadError::InvalidField {
            resource: ctx.resource.to_string(),
            line: ctx.line,
            column: column.to_string(),
            value: raw.to_string(),
        }),
        (Err(_), ParsePolicy::Lenient) => {
            warn!(
                "{} line {}: '{}' in column '{}' is not a number, using NaN",
                ctx.resource, ctx.line, raw, column
            );
            Ok(f64::NAN)
        }
    }
}

/// Years key every table, so a lenient parse skips the row (`None`)
/// instead of inventing one.
pub fn parse_year(
    raw: Option<&str>,
    column: &str,
    ctx: FieldContext,
    policy: ParsePolicy,
) -> Result<Option<i32>, LoadError> {
    let parsed = raw.map(str::trim).and_then(|raw| raw.parse::<i32>().ok());
    match (parsed, policy) {
        (Some(year), _) => Ok(Some(year)),
        (None, ParsePolicy::Lenient) => {
            warn!("{} line {}: unusable year {:?}, skipping row", ctx.resource, ctx.line, raw);
            Ok(None)
        }
        (None, ParsePolicy::Strict) => match raw {
            None => Err(LoadError::MissingColumn {
                resource: ctx.resource.to_string(),
                line: ctx.line,
                column: column.to_string(),
            }),
            Some(raw) => Err(LoadError::InvalidField {
                resource: ctx.resource.to_string(),
                line: ctx.line,
                column: column.to_string(),
                value: raw.trim().to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: FieldContext<'static> = FieldContext { resource: "test.csv", line: 2 };

    #[test]
    fn strict_rejects_malformed_numbers() {
        assert_eq!(parse_number(Some(" -20.56 "), "x", CTX, ParsePolicy::Strict).unwrap(), -20.56);
        let err = parse_number(Some("abc"), "x", CTX, ParsePolicy::Strict).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { line: 2, .. }));
        assert!(parse_number(Some("NaN"), "x", CTX, ParsePolicy::Strict).is_err());
        assert!(parse_number(Some(""), "x", CTX, ParsePolicy::Strict).is_err());
        let err = parse_number(None, "x", CTX, ParsePolicy::Strict).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { .. }));
    }

    #[test]
    fn lenient_turns_malformed_numbers_into_nan() {
        assert!(parse_number(Some("abc"), "x", CTX, ParsePolicy::Lenient).unwrap().is_nan());
        assert!(parse_number(None, "x", CTX, ParsePolicy::Lenient).unwrap().is_nan());
        assert_eq!(parse_number(Some("1.5"), "x", CTX, ParsePolicy::Lenient).unwrap(), 1.5);
    }

    #[test]
    fn years_are_skipped_or_rejected() {
        assert_eq!(parse_year(Some("2026"), "year", CTX, ParsePolicy::Strict).unwrap(), Some(2026));
        assert_eq!(parse_year(Some("20x6"), "year", CTX, ParsePolicy::Lenient).unwrap(), None);
        assert!(parse_year(Some("20x6"), "year", CTX, ParsePolicy::Strict).is_err());
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("Lenient".parse::<ParsePolicy>().unwrap(), ParsePolicy::Lenient);
        assert_eq!("strict".parse::<ParsePolicy>().unwrap(), ParsePolicy::Strict);
        assert!("loose".parse::<ParsePolicy>().is_err());
    }
}
