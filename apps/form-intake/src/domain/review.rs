//! Product reviews.

use serde::{Deserialize, Serialize};

use super::shared::validation::{
    LONG_TEXT_MAX_CHARS, SHORT_TEXT_MAX_CHARS, parse_integer, require_present_text,
    require_range, require_text,
};
use super::shared::{ProductId, ReviewId, ValidationError};

/// Inclusive bounds for the `rating` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingScale {
    min: i64,
    max: i64,
}

impl RatingScale {
    /// The usual one-to-five star scale.
    pub const FIVE_STAR: Self = Self { min: 1, max: 5 };

    /// Create a scale. Returns `None` when `min > max`.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Option<Self> {
        if min > max {
            return None;
        }
        Some(Self { min, max })
    }

    /// Lowest accepted rating.
    #[must_use]
    pub const fn min(self) -> i64 {
        self.min
    }

    /// Highest accepted rating.
    #[must_use]
    pub const fn max(self) -> i64 {
        self.max
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::FIVE_STAR
    }
}

/// Raw review submission. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Reviewed product.
    pub product_id: Option<String>,
    /// Reviewer display name.
    pub user_name: Option<String>,
    /// Rating as typed.
    pub rating: Option<String>,
    /// Free-form comment.
    pub comment: Option<String>,
}

/// A validated review that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Reviewed product.
    pub product_id: ProductId,
    /// Reviewer display name.
    pub user_name: String,
    /// Rating within the configured scale.
    pub rating: i64,
    /// Comment, possibly empty.
    pub comment: String,
}

impl NewReview {
    /// Validate a draft against a rating scale.
    ///
    /// `comment` must be present but may be empty; the other fields must be
    /// non-blank. `product_id` must be a positive integer.
    pub fn validate(draft: &ReviewDraft, scale: RatingScale) -> Result<Self, ValidationError> {
        let product_id = parse_integer("product_id", draft.product_id.as_deref())?;
        let product_id = require_range("product_id", product_id, 1, i64::MAX)?;
        let user_name =
            require_text("user_name", draft.user_name.as_deref(), SHORT_TEXT_MAX_CHARS)?;
        let rating = parse_integer("rating", draft.rating.as_deref())?;
        let rating = require_range("rating", rating, scale.min, scale.max)?;
        let comment =
            require_present_text("comment", draft.comment.as_deref(), LONG_TEXT_MAX_CHARS)?;

        Ok(Self {
            product_id: ProductId::new(product_id),
            user_name,
            rating,
            comment,
        })
    }

    /// Attach the store-generated identifier.
    #[must_use]
    pub fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            product_id: self.product_id,
            user_name: self.user_name,
            rating: self.rating,
            comment: self.comment,
        }
    }
}

/// A stored review. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-generated identifier.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Reviewer display name.
    pub user_name: String,
    /// Rating.
    pub rating: i64,
    /// Comment, possibly empty.
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn draft() -> ReviewDraft {
        ReviewDraft {
            product_id: Some("3".to_string()),
            user_name: Some("bob".to_string()),
            rating: Some("4".to_string()),
            comment: Some("Fits well".to_string()),
        }
    }

    #[test]
    fn validates_complete_draft() {
        let review = NewReview::validate(&draft(), RatingScale::default()).unwrap();
        assert_eq!(review.product_id, ProductId::new(3));
        assert_eq!(review.rating, 4);
        assert_eq!(review.comment, "Fits well");
    }

    #[test]
    fn empty_comment_is_accepted() {
        let mut d = draft();
        d.comment = Some(String::new());

        let review = NewReview::validate(&d, RatingScale::default()).unwrap();
        assert!(review.comment.is_empty());
    }

    #[test]
    fn absent_comment_is_rejected() {
        let mut d = draft();
        d.comment = None;

        let err = NewReview::validate(&d, RatingScale::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "comment" });
    }

    #[test_case("0" ; "below scale")]
    #[test_case("6" ; "above scale")]
    fn rating_outside_scale_is_rejected(rating: &str) {
        let mut d = draft();
        d.rating = Some(rating.to_string());

        let err = NewReview::validate(&d, RatingScale::default()).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "rating", .. }));
    }

    #[test]
    fn custom_scale_is_honored() {
        let mut d = draft();
        d.rating = Some("9".to_string());
        let scale = RatingScale::new(0, 10).unwrap();

        assert_eq!(NewReview::validate(&d, scale).unwrap().rating, 9);
    }

    #[test_case("abc" ; "letters")]
    #[test_case("0" ; "zero")]
    #[test_case("-1" ; "negative")]
    fn product_id_must_be_positive_integer(product_id: &str) {
        let mut d = draft();
        d.product_id = Some(product_id.to_string());

        assert!(NewReview::validate(&d, RatingScale::default()).is_err());
    }

    #[test]
    fn inverted_scale_is_refused() {
        assert!(RatingScale::new(5, 1).is_none());
    }
}
