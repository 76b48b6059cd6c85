//! Shared Domain Types
//!
//! Identifiers, validation errors and the field validation helpers used by
//! both intake flows.

pub mod errors;
pub mod identifiers;
pub mod validation;

pub use errors::ValidationError;
pub use identifiers::{OrderId, ProductId, ReviewId};
