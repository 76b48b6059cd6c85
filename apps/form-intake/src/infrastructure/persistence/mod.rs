//! Persistence Adapters
//!
//! Implementations of the database gateway port.

pub mod in_memory;
pub mod sql_gateway;

pub use in_memory::InMemoryGateway;
pub use sql_gateway::SqlGateway;
