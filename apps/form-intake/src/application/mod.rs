//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: the database gateway the use cases write through
//! - **Use Cases**: order and review submission
//! - **DTOs**: receipts returned to the HTTP adapter

pub mod dto;
pub mod errors;
pub mod ports;
pub mod statements;
pub mod use_cases;

pub use dto::*;
pub use errors::SubmissionError;
pub use ports::*;
pub use use_cases::*;
