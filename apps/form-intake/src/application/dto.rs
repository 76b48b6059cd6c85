//! Data Transfer Objects
//!
//! Receipts handed back to the HTTP adapter after a successful submission.

use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::domain::review::Review;
use crate::domain::shared::{OrderId, ReviewId};

/// Receipt for a stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceiptDto {
    /// Store-generated order id.
    pub order_id: OrderId,
    /// Quantity that was stored, after parsing.
    pub quantity: i64,
}

impl From<&Order> for OrderReceiptDto {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            quantity: order.quantity,
        }
    }
}

impl OrderReceiptDto {
    /// Confirmation location for this order under `confirmation_path`.
    #[must_use]
    pub fn confirmation_location(&self, confirmation_path: &str) -> String {
        format!("{confirmation_path}?order_id={}", self.order_id)
    }
}

/// Receipt for a stored review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReceiptDto {
    /// Store-generated review id.
    pub review_id: ReviewId,
    /// Acknowledgment shown to the reviewer.
    pub message: String,
}

impl From<&Review> for ReviewReceiptDto {
    fn from(review: &Review) -> Self {
        Self {
            review_id: review.id,
            message: "Review submitted successfully".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_location_embeds_order_id() {
        let receipt = OrderReceiptDto {
            order_id: OrderId::new(42),
            quantity: 1,
        };
        assert_eq!(
            receipt.confirmation_location("/order-confirmation"),
            "/order-confirmation?order_id=42"
        );
    }

    #[test]
    fn receipt_serializes_id_as_number() {
        let receipt = ReviewReceiptDto {
            review_id: ReviewId::new(7),
            message: "ok".to_string(),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["review_id"], 7);
    }
}
