//! Infrastructure Layer
//!
//! This module contains the adapters for the ports defined in the
//! application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: `SQLx` gateway (MySQL, SQLite) and an in-memory gateway
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: form endpoints and health check
//!
//! - **Wiring**
//!   - `config/`: dependency injection container

pub mod config;
pub mod http;
pub mod persistence;
