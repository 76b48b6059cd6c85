//! Dependency Injection Container
//!
//! Wires the gateway and the intake configuration into use cases and the
//! HTTP state.

use std::sync::Arc;

use crate::application::ports::DatabaseGatewayPort;
use crate::application::use_cases::{SubmitOrderUseCase, SubmitReviewUseCase};
use crate::config::IntakeConfig;
use crate::infrastructure::http::AppState;

/// Dependency injection container.
pub struct Container<G>
where
    G: DatabaseGatewayPort + 'static,
{
    gateway: Arc<G>,
    intake: IntakeConfig,
}

impl<G> Container<G>
where
    G: DatabaseGatewayPort + 'static,
{
    /// Create a new container.
    pub const fn new(gateway: Arc<G>, intake: IntakeConfig) -> Self {
        Self { gateway, intake }
    }

    /// Get the database gateway.
    pub fn gateway(&self) -> Arc<G> {
        Arc::clone(&self.gateway)
    }

    /// Create a `SubmitOrderUseCase`.
    pub fn submit_order_use_case(&self) -> SubmitOrderUseCase<G> {
        SubmitOrderUseCase::new(Arc::clone(&self.gateway), self.intake.quantity_parsing)
    }

    /// Create a `SubmitReviewUseCase`.
    ///
    /// Falls back to the five-star scale if the configured bounds are
    /// inverted; `validate_config` rejects that case before it gets here.
    pub fn submit_review_use_case(&self) -> SubmitReviewUseCase<G> {
        SubmitReviewUseCase::new(
            Arc::clone(&self.gateway),
            self.intake.rating_scale().unwrap_or_default(),
        )
        .with_product_check(self.intake.verify_product_exists)
    }

    /// Build the HTTP state.
    pub fn app_state(&self, version: impl Into<String>) -> AppState<G> {
        AppState {
            submit_order: Arc::new(self.submit_order_use_case()),
            submit_review: Arc::new(self.submit_review_use_case()),
            gateway: self.gateway(),
            confirmation_path: self.intake.confirmation_path.clone(),
            version: version.into(),
        }
    }
}
