//! Submission handling configuration.

use serde::{Deserialize, Serialize};

use crate::domain::order::QuantityParsing;
use crate::domain::review::RatingScale;

/// Intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// How the order `quantity` field is parsed.
    #[serde(default)]
    pub quantity_parsing: QuantityParsing,
    /// Lowest accepted review rating.
    #[serde(default = "default_rating_min")]
    pub rating_min: i64,
    /// Highest accepted review rating.
    #[serde(default = "default_rating_max")]
    pub rating_max: i64,
    /// Where a stored order redirects to. `?order_id=<id>` is appended.
    #[serde(default = "default_confirmation_path")]
    pub confirmation_path: String,
    /// Check the `products` table before storing a review.
    #[serde(default)]
    pub verify_product_exists: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            quantity_parsing: QuantityParsing::default(),
            rating_min: default_rating_min(),
            rating_max: default_rating_max(),
            confirmation_path: default_confirmation_path(),
            verify_product_exists: false,
        }
    }
}

impl IntakeConfig {
    /// Configured rating scale, or `None` when the bounds are inverted.
    #[must_use]
    pub const fn rating_scale(&self) -> Option<RatingScale> {
        RatingScale::new(self.rating_min, self.rating_max)
    }
}

const fn default_rating_min() -> i64 {
    1
}

const fn default_rating_max() -> i64 {
    5
}

fn default_confirmation_path() -> String {
    "/order-confirmation".to_string()
}
