//! Form Intake Binary
//!
//! Serves the order and review form endpoints.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin form-intake
//! ```
//!
//! # Environment Variables
//!
//! - `FORM_INTAKE_CONFIG`: Path to the YAML config (default: `config.yaml`)
//! - `RUST_LOG`: Log filter, overrides `observability.logging.level`
//! - `OTEL_ENABLED`: Export spans over OTLP when `true`
//!
//! Any `${VAR}` referenced from the config file (for example the database
//! password) can be supplied through the environment or a `.env` file.

use std::sync::Arc;

use form_intake::config::{Config, load_config};
use form_intake::infrastructure::config::Container;
use form_intake::infrastructure::http::create_router;
use form_intake::infrastructure::persistence::SqlGateway;
use form_intake::telemetry::init_telemetry;
use tokio::net::TcpListener;
use tokio::signal;

/// Default config path when `FORM_INTAKE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();

    let config_path =
        std::env::var("FORM_INTAKE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(Some(&config_path))?;

    let _telemetry = init_telemetry(&config.observability.logging);

    tracing::info!(config_path = %config_path, "Starting Form Intake");
    log_config(&config);

    let gateway = Arc::new(SqlGateway::connect_lazy(&config.database)?);

    if config.database.auto_migrate {
        // A store that is down now is reported here and again per request.
        if let Err(e) = gateway.migrate().await {
            tracing::error!(error = %e, "Schema migration failed");
        }
    }

    let container = Container::new(Arc::clone(&gateway), config.intake.clone());
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let http_addr = config.server.listen_address();

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /orders");
    tracing::info!("  POST /reviews");

    let listener = TcpListener::bind(&http_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;
    tracing::info!("Form Intake stopped");
    Ok(())
}

/// Log the loaded configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        driver = ?config.database.driver,
        database = %config.database.database,
        quantity_parsing = ?config.intake.quantity_parsing,
        rating_min = config.intake.rating_min,
        rating_max = config.intake.rating_max,
        verify_product_exists = config.intake.verify_product_exists,
        "Configuration loaded"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
