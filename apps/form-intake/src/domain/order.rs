//! Product orders.
//!
//! An [`OrderDraft`] is what the caller submitted. [`NewOrder::validate`]
//! turns it into a record that can be inserted, and [`NewOrder::into_order`]
//! attaches the identifier the store generated.

use serde::{Deserialize, Serialize};

use super::shared::validation::{
    LONG_TEXT_MAX_CHARS, SHORT_TEXT_MAX_CHARS, coerce_integer, parse_integer, require_range,
    require_text,
};
use super::shared::{OrderId, ValidationError};

/// Upper bound for a single order line.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// How the `quantity` field is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityParsing {
    /// Reject anything that is not a whole number.
    #[default]
    Strict,
    /// Legacy coercion: leading digits are used, anything else becomes `0`.
    Lenient,
}

/// Raw order submission. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    /// Product name.
    pub product: Option<String>,
    /// Quantity as typed by the customer.
    pub quantity: Option<String>,
    /// Customer name.
    pub name: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Customer phone.
    pub phone: Option<String>,
    /// Delivery address.
    pub address: Option<String>,
    /// Selected cap color.
    pub cap_color: Option<String>,
}

/// A validated order that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Product name.
    pub product: String,
    /// Number of items, never negative.
    pub quantity: i64,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Selected cap color.
    pub cap_color: String,
}

impl NewOrder {
    /// Validate a draft.
    ///
    /// All fields are required. Text is trimmed and length-checked; quantity
    /// is parsed according to `quantity_parsing` and must be within
    /// `0..=MAX_QUANTITY`.
    pub fn validate(
        draft: &OrderDraft,
        quantity_parsing: QuantityParsing,
    ) -> Result<Self, ValidationError> {
        let product = require_text("product", draft.product.as_deref(), SHORT_TEXT_MAX_CHARS)?;
        let quantity = parse_quantity(draft.quantity.as_deref(), quantity_parsing)?;
        let name = require_text("name", draft.name.as_deref(), SHORT_TEXT_MAX_CHARS)?;
        let email = require_text("email", draft.email.as_deref(), SHORT_TEXT_MAX_CHARS)?;
        let phone = require_text("phone", draft.phone.as_deref(), SHORT_TEXT_MAX_CHARS)?;
        let address = require_text("address", draft.address.as_deref(), LONG_TEXT_MAX_CHARS)?;
        let cap_color =
            require_text("cap_color", draft.cap_color.as_deref(), SHORT_TEXT_MAX_CHARS)?;

        Ok(Self {
            product,
            quantity,
            name,
            email,
            phone,
            address,
            cap_color,
        })
    }

    /// Attach the store-generated identifier.
    #[must_use]
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            product: self.product,
            quantity: self.quantity,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            cap_color: self.cap_color,
        }
    }
}

/// A stored order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Store-generated identifier.
    pub id: OrderId,
    /// Product name.
    pub product: String,
    /// Number of items.
    pub quantity: i64,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone.
    pub phone: String,
    /// Delivery address.
    pub address: String,
    /// Selected cap color.
    pub cap_color: String,
}

fn parse_quantity(raw: Option<&str>, parsing: QuantityParsing) -> Result<i64, ValidationError> {
    let quantity = match parsing {
        QuantityParsing::Strict => parse_integer("quantity", raw)?,
        // The field still has to be present; only its content is coerced.
        QuantityParsing::Lenient => {
            coerce_integer(raw.ok_or(ValidationError::MissingField { field: "quantity" })?)
        }
    };
    require_range("quantity", quantity, 0, MAX_QUANTITY)
}
