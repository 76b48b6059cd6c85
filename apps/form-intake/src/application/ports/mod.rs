//! Application Ports
//!
//! Driven ports the use cases depend on. Adapters live in
//! `infrastructure::persistence`.

mod database_gateway_port;

pub use database_gateway_port::{
    DatabaseGatewayPort, ExecuteOutcome, GatewayError, SqlValue, Statement,
};

#[cfg(test)]
pub use database_gateway_port::MockDatabaseGatewayPort;
