//! Validation errors raised while turning a raw submission into a record.

use std::fmt;

/// A submission was rejected before anything reached the store.
///
/// These errors are independent of infrastructure concerns. Field names are
/// the form field names the caller used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The request was not a form submission (anything other than `POST`).
    NotSubmitted {
        /// HTTP method that was used.
        method: String,
    },

    /// A required field was absent or blank.
    MissingField {
        /// Field name.
        field: &'static str,
    },

    /// A numeric field could not be parsed as an integer.
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw value as submitted.
        value: String,
    },

    /// A numeric field fell outside its allowed range.
    OutOfRange {
        /// Field name.
        field: &'static str,
        /// Parsed value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// A text field exceeded its length limit.
    TooLong {
        /// Field name.
        field: &'static str,
        /// Maximum number of characters.
        max_chars: usize,
        /// Number of characters submitted.
        actual_chars: usize,
    },

    /// The referenced product does not exist in the catalog.
    UnknownProduct {
        /// Product id as submitted.
        product_id: i64,
    },

    /// The form body itself could not be decoded.
    MalformedForm {
        /// Decoder message.
        message: String,
    },
}

impl ValidationError {
    /// The form field this error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumber { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::TooLong { field, .. } => Some(field),
            Self::UnknownProduct { .. } => Some("product_id"),
            Self::NotSubmitted { .. } | Self::MalformedForm { .. } => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSubmitted { method } => {
                write!(f, "Form was not submitted (method {method})")
            }
            Self::MissingField { field } => {
                write!(f, "Missing required field '{field}'")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "Field '{field}' is not a whole number: {value:?}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(f, "Field '{field}' must be between {min} and {max}, got {value}")
            }
            Self::TooLong {
                field,
                max_chars,
                actual_chars,
            } => {
                write!(
                    f,
                    "Field '{field}' is {actual_chars} characters long, limit is {max_chars}"
                )
            }
            Self::UnknownProduct { product_id } => {
                write!(f, "Product {product_id} does not exist")
            }
            Self::MalformedForm { message } => {
                write!(f, "Malformed form body: {message}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
