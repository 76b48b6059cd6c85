// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access
    )
)]

//! Form Intake - order and review submission service
//!
//! Accepts form-encoded order and review submissions, validates every field
//! and writes exactly one row per accepted submission through a
//! parameterized statement.
//!
//! # Architecture (Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Submission drafts, validated records, validation rules
//!   - `order`: Order draft, quantity parsing policy
//!   - `review`: Review draft, rating scale
//!   - `shared`: Identifiers, `ValidationError`, field helpers
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `DatabaseGatewayPort`
//!   - `use_cases`: `SubmitOrder`, `SubmitReview`
//!   - `statements`: Parameterized SQL
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `persistence`: `SQLx` gateway (MySQL, SQLite) and an in-memory gateway
//!   - `http`: Axum router for `/orders`, `/reviews`, `/health`
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Hexagonal Architecture Layers
// =============================================================================

/// Domain layer - Core business rules with no infrastructure dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// HTTP error codes and responses.
pub mod error;

/// Tracing and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::order::{NewOrder, Order, OrderDraft, QuantityParsing};
pub use domain::review::{NewReview, RatingScale, Review, ReviewDraft};
pub use domain::shared::{OrderId, ProductId, ReviewId, ValidationError};

// Application re-exports
pub use application::dto::{OrderReceiptDto, ReviewReceiptDto};
pub use application::ports::{DatabaseGatewayPort, ExecuteOutcome, GatewayError, Statement};
pub use application::use_cases::{SubmitOrderUseCase, SubmitReviewUseCase};
pub use application::SubmissionError;

// Infrastructure re-exports
pub use infrastructure::config::Container;
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryGateway, SqlGateway};

pub use config::{Config, ConfigError, load_config};
pub use error::{ApiError, ErrorCode};
