//! HTTP Controller (Driver Adapter)
//!
//! Axum router for the form endpoints. Each request runs under its own
//! `request_id` span.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};

use crate::application::SubmissionError;
use crate::application::ports::DatabaseGatewayPort;
use crate::application::use_cases::{SubmitOrderUseCase, SubmitReviewUseCase};
use crate::domain::shared::ValidationError;
use crate::error::ApiError;

use super::request::{OrderForm, ReviewForm};
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<G>
where
    G: DatabaseGatewayPort,
{
    /// Use case for order submissions.
    pub submit_order: Arc<SubmitOrderUseCase<G>>,
    /// Use case for review submissions.
    pub submit_review: Arc<SubmitReviewUseCase<G>>,
    /// Gateway, for health checks.
    pub gateway: Arc<G>,
    /// Where stored orders redirect to.
    pub confirmation_path: String,
    /// Application version.
    pub version: String,
}

impl<G> Clone for AppState<G>
where
    G: DatabaseGatewayPort,
{
    fn clone(&self) -> Self {
        Self {
            submit_order: Arc::clone(&self.submit_order),
            submit_review: Arc::clone(&self.submit_review),
            gateway: Arc::clone(&self.gateway),
            confirmation_path: self.confirmation_path.clone(),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<G>(state: AppState<G>) -> Router
where
    G: DatabaseGatewayPort + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/orders", post(submit_order).fallback(not_submitted))
        .route("/reviews", post(submit_review).fallback(not_submitted))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<G>(State(state): State<AppState<G>>) -> impl IntoResponse
where
    G: DatabaseGatewayPort,
{
    let database_up = match state.gateway.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the store");
            false
        }
    };

    let status = if database_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(HealthResponse::from_ping(database_up, &state.version)))
}

/// Order submission endpoint. Redirects to the confirmation view.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn submit_order<G>(
    State(state): State<AppState<G>>,
    form: Result<Form<OrderForm>, FormRejection>,
) -> Result<Redirect, ApiError>
where
    G: DatabaseGatewayPort,
{
    let Form(form) = form.map_err(malformed_form)?;
    let receipt = state
        .submit_order
        .execute(form.into())
        .await
        .map_err(reject)?;

    Ok(Redirect::to(
        &receipt.confirmation_location(&state.confirmation_path),
    ))
}

/// Review submission endpoint. Acknowledges with plain text.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn submit_review<G>(
    State(state): State<AppState<G>>,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    G: DatabaseGatewayPort,
{
    let Form(form) = form.map_err(malformed_form)?;
    let receipt = state
        .submit_review
        .execute(form.into())
        .await
        .map_err(reject)?;

    Ok((StatusCode::CREATED, receipt.message))
}

/// Anything but `POST` on a form endpoint.
async fn not_submitted(method: Method) -> ApiError {
    tracing::info!(%method, "Rejected non-submission request");
    ApiError::method_not_allowed(method.as_str())
}

fn malformed_form(rejection: FormRejection) -> ApiError {
    tracing::info!(error = %rejection, "Rejected malformed form");
    ValidationError::MalformedForm {
        message: rejection.body_text(),
    }
    .into()
}

/// Log a failed submission and convert it for the caller.
fn reject(err: SubmissionError) -> ApiError {
    match &err {
        SubmissionError::Validation(e) => {
            tracing::info!(error = %e, field = e.field(), "Submission rejected");
        }
        SubmissionError::Connection { message } => {
            tracing::error!(error = %message, "Store unavailable");
        }
        SubmissionError::Storage { message, timed_out } => {
            tracing::error!(error = %message, timed_out, "Storage failed");
        }
    }
    err.into()
}
