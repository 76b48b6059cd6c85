//! Field validation shared by the order and review intake flows.
//!
//! Every helper takes the raw, optional form value and the field name so the
//! resulting [`ValidationError`] can point at the offending field.

use super::errors::ValidationError;

/// Character limit for short text columns (`VARCHAR(255)`).
pub const SHORT_TEXT_MAX_CHARS: usize = 255;

/// Character limit for free-form text columns.
pub const LONG_TEXT_MAX_CHARS: usize = 2000;

/// Require a non-blank text value and trim it.
pub fn require_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Require the field to be present, allowing an empty value.
pub fn require_present_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let Some(raw) = value else {
        return Err(ValidationError::MissingField { field });
    };
    let trimmed = raw.trim();
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Parse a required integer field, rejecting anything that is not a whole
/// number.
pub fn parse_integer(field: &'static str, value: Option<&str>) -> Result<i64, ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Coerce a value to an integer the way legacy form handlers did.
///
/// Leading whitespace and one sign are accepted, then as many ASCII digits as
/// follow. Anything without leading digits becomes `0`. Values beyond the
/// `i64` range saturate.
#[must_use]
pub fn coerce_integer(value: &str) -> i64 {
    let rest = value.trim_start();
    let (negative, digits) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let mut acc: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        };
    }
    acc
}

/// Require an integer to lie within `min..=max`.
pub const fn require_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<i64, ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<(), ValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(ValidationError::TooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test]
    fn require_text_trims() {
        let value = require_text("name", Some("  Alice "), SHORT_TEXT_MAX_CHARS).unwrap();
        assert_eq!(value, "Alice");
    }

    #[test_case(None ; "absent")]
    #[test_case(Some("") ; "empty")]
    #[test_case(Some("   ") ; "blank")]
    fn require_text_rejects_missing(value: Option<&str>) {
        let err = require_text("name", value, SHORT_TEXT_MAX_CHARS).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "name" });
    }

    #[test]
    fn require_text_counts_characters_not_bytes() {
        let value = "é".repeat(SHORT_TEXT_MAX_CHARS);
        assert!(require_text("name", Some(&value), SHORT_TEXT_MAX_CHARS).is_ok());

        let too_long = "é".repeat(SHORT_TEXT_MAX_CHARS + 1);
        let err = require_text("name", Some(&too_long), SHORT_TEXT_MAX_CHARS).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { actual_chars: 256, .. }));
    }

    #[test]
    fn require_present_text_allows_empty() {
        assert_eq!(
            require_present_text("comment", Some(""), LONG_TEXT_MAX_CHARS).unwrap(),
            ""
        );
        assert!(require_present_text("comment", None, LONG_TEXT_MAX_CHARS).is_err());
    }

    #[test_case("5", 5 ; "plain")]
    #[test_case(" 12 ", 12 ; "padded")]
    #[test_case("-3", -3 ; "negative")]
    #[test_case("+8", 8 ; "explicit plus")]
    fn parse_integer_accepts(raw: &str, expected: i64) {
        assert_eq!(parse_integer("quantity", Some(raw)).unwrap(), expected);
    }

    #[test_case("abc" ; "letters")]
    #[test_case("5abc" ; "trailing garbage")]
    #[test_case("2.5" ; "fraction")]
    #[test_case("99999999999999999999" ; "overflow")]
    fn parse_integer_rejects(raw: &str) {
        let err = parse_integer("quantity", Some(raw)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidNumber { field: "quantity", .. }));
    }

    #[test]
    fn parse_integer_missing() {
        assert_eq!(
            parse_integer("rating", None).unwrap_err(),
            ValidationError::MissingField { field: "rating" }
        );
    }

    #[test_case("5", 5 ; "plain")]
    #[test_case("abc", 0 ; "letters")]
    #[test_case("12abc", 12 ; "leading digits")]
    #[test_case("  7", 7 ; "leading whitespace")]
    #[test_case("-4x", -4 ; "negative prefix")]
    #[test_case("", 0 ; "empty")]
    #[test_case("-", 0 ; "bare sign")]
    #[test_case("99999999999999999999", i64::MAX ; "saturates")]
    fn coerce_integer_cases(raw: &str, expected: i64) {
        assert_eq!(coerce_integer(raw), expected);
    }

    #[test]
    fn require_range_bounds_are_inclusive() {
        assert_eq!(require_range("rating", 1, 1, 5).unwrap(), 1);
        assert_eq!(require_range("rating", 5, 1, 5).unwrap(), 5);
        assert!(require_range("rating", 0, 1, 5).is_err());
        assert!(require_range("rating", 6, 1, 5).is_err());
    }

    proptest! {
        #[test]
        fn coerce_agrees_with_strict_parse_on_integers(n in any::<i64>()) {
            let raw = n.to_string();
            prop_assert_eq!(coerce_integer(&raw), n);
            prop_assert_eq!(parse_integer("quantity", Some(&raw)).unwrap(), n);
        }

        #[test]
        fn coerce_never_panics(raw in ".*") {
            let _ = coerce_integer(&raw);
        }
    }
}
