//! Submit Review Use Case

use std::sync::Arc;

use crate::application::dto::ReviewReceiptDto;
use crate::application::errors::SubmissionError;
use crate::application::ports::DatabaseGatewayPort;
use crate::application::statements;
use crate::domain::review::{NewReview, RatingScale, ReviewDraft};
use crate::domain::shared::{ReviewId, ValidationError};

/// Validates a review submission and stores it as one row.
pub struct SubmitReviewUseCase<G>
where
    G: DatabaseGatewayPort,
{
    gateway: Arc<G>,
    rating_scale: RatingScale,
    verify_product_exists: bool,
}

impl<G> SubmitReviewUseCase<G>
where
    G: DatabaseGatewayPort,
{
    /// Create a new `SubmitReviewUseCase`.
    pub const fn new(gateway: Arc<G>, rating_scale: RatingScale) -> Self {
        Self {
            gateway,
            rating_scale,
            verify_product_exists: false,
        }
    }

    /// Look the product up before inserting.
    #[must_use]
    pub fn with_product_check(mut self, enabled: bool) -> Self {
        self.verify_product_exists = enabled;
        self
    }

    /// Execute the use case.
    pub async fn execute(&self, draft: ReviewDraft) -> Result<ReviewReceiptDto, SubmissionError> {
        let new_review = NewReview::validate(&draft, self.rating_scale)?;

        if self.verify_product_exists {
            let found = self
                .gateway
                .exists(statements::product_exists(new_review.product_id))
                .await?;
            if !found {
                return Err(ValidationError::UnknownProduct {
                    product_id: new_review.product_id.value(),
                }
                .into());
            }
        }

        let outcome = self
            .gateway
            .execute(statements::insert_review(&new_review))
            .await?;

        if outcome.rows_affected != 1 {
            return Err(SubmissionError::storage(format!(
                "review insert affected {} rows",
                outcome.rows_affected
            )));
        }
        let id = outcome
            .generated_id
            .ok_or_else(|| SubmissionError::storage("store returned no review id"))?;

        let review = new_review.into_review(ReviewId::new(id));
        tracing::info!(
            review_id = %review.id,
            product_id = %review.product_id,
            rating = review.rating,
            "Review stored"
        );

        Ok(ReviewReceiptDto::from(&review))
    }
}
