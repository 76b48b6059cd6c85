//! HTTP adapter.
//!
//! Inbound adapter exposing the form endpoints. Handlers decode the form,
//! delegate to a use case and map the outcome to a redirect, an
//! acknowledgment or an [`ApiError`](crate::error::ApiError).

mod controller;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use request::*;
pub use response::*;
