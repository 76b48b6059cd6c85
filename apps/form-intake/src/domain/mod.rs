//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Drafts**: untrusted submissions exactly as they arrived
//! - **Records**: validated rows ready to be stored, and stored rows with their id
//! - **Validation**: field presence, numeric parsing and range checks
//!
//! # Bounded Contexts
//!
//! - [`order`]: product orders
//! - [`review`]: product reviews

pub mod order;
pub mod review;
pub mod shared;
