//! SQL statements issued by the intake use cases.
//!
//! `?` placeholders are understood by both MySQL and SQLite. Caller data is
//! always bound, never formatted into the SQL text.

use crate::application::ports::Statement;
use crate::domain::order::NewOrder;
use crate::domain::review::NewReview;
use crate::domain::shared::ProductId;

const INSERT_ORDER: &str = "INSERT INTO orders (product, quantity, name, email, phone, address, cap_color) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

const INSERT_REVIEW: &str =
    "INSERT INTO reviews (product_id, user_name, rating, comment) VALUES (?, ?, ?, ?)";

const PRODUCT_EXISTS: &str = "SELECT 1 FROM products WHERE id = ? LIMIT 1";

/// Insert one order row.
#[must_use]
pub fn insert_order(order: &NewOrder) -> Statement {
    Statement::new(INSERT_ORDER)
        .bind(order.product.as_str())
        .bind(order.quantity)
        .bind(order.name.as_str())
        .bind(order.email.as_str())
        .bind(order.phone.as_str())
        .bind(order.address.as_str())
        .bind(order.cap_color.as_str())
}

/// Insert one review row.
#[must_use]
pub fn insert_review(review: &NewReview) -> Statement {
    Statement::new(INSERT_REVIEW)
        .bind(review.product_id.value())
        .bind(review.user_name.as_str())
        .bind(review.rating)
        .bind(review.comment.as_str())
}

/// Look up a catalog product.
#[must_use]
pub fn product_exists(product_id: ProductId) -> Statement {
    Statement::new(PRODUCT_EXISTS).bind(product_id.value())
}
