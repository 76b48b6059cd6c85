//! Application Use Cases
//!
//! One use case per intake flow. Each validates, writes one row and returns a
//! receipt.

mod submit_order;
mod submit_review;

pub use submit_order::SubmitOrderUseCase;
pub use submit_review::SubmitReviewUseCase;
