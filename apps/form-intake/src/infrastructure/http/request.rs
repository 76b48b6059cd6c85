//! HTTP request DTOs.
//!
//! Form fields are all optional at this layer so that a missing field becomes
//! a `MissingField` validation error naming it, rather than a decoder error.

use serde::{Deserialize, Serialize};

use crate::domain::order::OrderDraft;
use crate::domain::review::ReviewDraft;

/// Order form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderForm {
    /// Product name.
    pub product: Option<String>,
    /// Quantity.
    pub quantity: Option<String>,
    /// Customer name.
    pub name: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Customer phone.
    pub phone: Option<String>,
    /// Delivery address.
    pub address: Option<String>,
    /// Cap color.
    pub cap_color: Option<String>,
}

impl From<OrderForm> for OrderDraft {
    fn from(form: OrderForm) -> Self {
        Self {
            product: form.product,
            quantity: form.quantity,
            name: form.name,
            email: form.email,
            phone: form.phone,
            address: form.address,
            cap_color: form.cap_color,
        }
    }
}

/// Review form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    /// Reviewed product id.
    pub product_id: Option<String>,
    /// Reviewer name.
    pub user_name: Option<String>,
    /// Rating.
    pub rating: Option<String>,
    /// Comment.
    pub comment: Option<String>,
}

impl From<ReviewForm> for ReviewDraft {
    fn from(form: ReviewForm) -> Self {
        Self {
            product_id: form.product_id,
            user_name: form.user_name,
            rating: form.rating,
            comment: form.comment,
        }
    }
}
