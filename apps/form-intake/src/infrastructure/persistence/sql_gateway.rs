//! SQL database gateway.
//!
//! Implements [`DatabaseGatewayPort`] over a `SQLx` `Any` pool so the same
//! adapter serves MySQL in production and SQLite files in tests. The pool is
//! built lazily: a store that is down at startup surfaces as per-request
//! connection errors instead of a boot failure.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::mysql::MySqlConnectOptions;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Any, AnyPool, ConnectOptions, Connection};
use tracing::{debug, info, warn};

use crate::application::ports::{
    DatabaseGatewayPort, ExecuteOutcome, GatewayError, SqlValue, Statement,
};
use crate::config::{DatabaseConfig, DatabaseDriver};

/// Table definitions for one SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Mysql,
    Sqlite,
}

impl Dialect {
    const fn schema(self) -> &'static [&'static str] {
        match self {
            Self::Mysql => &[
                r"
                CREATE TABLE IF NOT EXISTS orders (
                    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    product VARCHAR(255) NOT NULL,
                    quantity BIGINT NOT NULL,
                    name VARCHAR(255) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    phone VARCHAR(255) NOT NULL,
                    address TEXT NOT NULL,
                    cap_color VARCHAR(255) NOT NULL
                )",
                r"
                CREATE TABLE IF NOT EXISTS reviews (
                    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    product_id BIGINT NOT NULL,
                    user_name VARCHAR(255) NOT NULL,
                    rating BIGINT NOT NULL,
                    comment TEXT NOT NULL
                )",
                r"
                CREATE TABLE IF NOT EXISTS products (
                    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    name VARCHAR(255) NOT NULL
                )",
            ],
            Self::Sqlite => &[
                r"
                CREATE TABLE IF NOT EXISTS orders (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    product TEXT NOT NULL,
                    quantity INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    address TEXT NOT NULL,
                    cap_color TEXT NOT NULL
                )",
                r"
                CREATE TABLE IF NOT EXISTS reviews (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    product_id INTEGER NOT NULL,
                    user_name TEXT NOT NULL,
                    rating INTEGER NOT NULL,
                    comment TEXT NOT NULL
                )",
                r"
                CREATE TABLE IF NOT EXISTS products (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL
                )",
            ],
        }
    }
}

impl From<DatabaseDriver> for Dialect {
    fn from(driver: DatabaseDriver) -> Self {
        match driver {
            DatabaseDriver::Mysql => Self::Mysql,
            DatabaseDriver::Sqlite => Self::Sqlite,
        }
    }
}

/// Gateway over a pooled `SQLx` connection.
#[derive(Debug, Clone)]
pub struct SqlGateway {
    pool: AnyPool,
    dialect: Dialect,
    statement_timeout: Duration,
}

impl SqlGateway {
    /// Build a lazily connecting gateway from configuration.
    ///
    /// No connection is opened here.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Connection` if the connection options cannot be
    /// assembled.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, GatewayError> {
        sqlx::any::install_default_drivers();

        let options = connect_options(config)?;
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
            .connect_lazy_with(options);

        info!(
            driver = ?config.driver,
            host = %config.host,
            database = %config.database,
            max_connections = config.max_connections,
            "Database pool configured"
        );

        Ok(Self::with_pool(
            pool,
            config.driver,
            Duration::from_millis(config.statement_timeout_ms),
        ))
    }

    /// Create a gateway with an existing pool (for testing).
    #[must_use]
    pub fn with_pool(pool: AnyPool, driver: DatabaseDriver, statement_timeout: Duration) -> Self {
        Self {
            pool,
            dialect: driver.into(),
            statement_timeout,
        }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Create the `orders`, `reviews` and `products` tables if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be acquired or a DDL statement
    /// fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        let mut conn = self.acquire().await?;
        for ddl in self.dialect.schema() {
            sqlx::query::<Any>(ddl)
                .execute(&mut *conn)
                .await
                .map_err(statement_error)?;
        }
        info!(dialect = ?self.dialect, "Schema ready");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn acquire(&self) -> Result<PoolConnection<Any>, GatewayError> {
        self.pool.acquire().await.map_err(|e| {
            warn!(error = %e, "Failed to acquire database connection");
            GatewayError::Connection {
                message: e.to_string(),
            }
        })
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.statement_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl DatabaseGatewayPort for SqlGateway {
    async fn execute(&self, statement: Statement) -> Result<ExecuteOutcome, GatewayError> {
        let mut conn = self.acquire().await?;
        let (sql, params) = statement.into_parts();
        let query = bind_all(sqlx::query::<Any>(sql), params);

        // The write only becomes visible at commit. A statement that outlives
        // its timeout is rolled back when the transaction drops.
        let mut tx = conn.begin().await.map_err(statement_error)?;
        let result = tokio::time::timeout(self.statement_timeout, query.execute(&mut *tx))
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.timeout_ms(), "Statement timed out, rolling back");
                GatewayError::Timeout {
                    timeout_ms: self.timeout_ms(),
                }
            })?
            .map_err(statement_error)?;
        tx.commit().await.map_err(statement_error)?;

        debug!(
            rows_affected = result.rows_affected(),
            generated_id = ?result.last_insert_id(),
            "Statement committed"
        );

        Ok(ExecuteOutcome {
            rows_affected: result.rows_affected(),
            generated_id: result.last_insert_id(),
        })
    }

    async fn exists(&self, statement: Statement) -> Result<bool, GatewayError> {
        let mut conn = self.acquire().await?;
        let (sql, params) = statement.into_parts();
        let query = bind_all(sqlx::query::<Any>(sql), params);

        let row = tokio::time::timeout(self.statement_timeout, query.fetch_optional(&mut *conn))
            .await
            .map_err(|_| GatewayError::Timeout {
                timeout_ms: self.timeout_ms(),
            })?
            .map_err(statement_error)?;

        Ok(row.is_some())
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        let mut conn = self.acquire().await?;
        tokio::time::timeout(self.statement_timeout, conn.ping())
            .await
            .map_err(|_| GatewayError::Timeout {
                timeout_ms: self.timeout_ms(),
            })?
            .map_err(|e| GatewayError::Connection {
                message: e.to_string(),
            })
    }
}

fn bind_all<'q>(
    query: sqlx::query::Query<'q, Any, sqlx::any::AnyArguments<'q>>,
    params: Vec<SqlValue>,
) -> sqlx::query::Query<'q, Any, sqlx::any::AnyArguments<'q>> {
    params.into_iter().fold(query, |query, value| match value {
        SqlValue::Integer(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
    })
}

fn statement_error(err: sqlx::Error) -> GatewayError {
    GatewayError::Statement {
        message: err.to_string(),
    }
}

fn connect_options(config: &DatabaseConfig) -> Result<AnyConnectOptions, GatewayError> {
    let options = match config.driver {
        DatabaseDriver::Mysql => {
            let url = MySqlConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user)
                .password(&config.password)
                .database(&config.database)
                .to_url_lossy();
            AnyConnectOptions::from_url(&url)
        }
        DatabaseDriver::Sqlite => {
            let url = SqliteConnectOptions::new()
                .filename(&config.database)
                .create_if_missing(true)
                .to_url_lossy();
            AnyConnectOptions::from_url(&url)
        }
    };

    options.map_err(|e| GatewayError::Connection {
        message: format!("invalid connection options: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_dialect_creates_three_tables() {
        for dialect in [Dialect::Mysql, Dialect::Sqlite] {
            let schema = dialect.schema();
            assert_eq!(schema.len(), 3);
            assert!(schema.iter().all(|ddl| ddl.contains("IF NOT EXISTS")));
        }
    }

    #[test]
    fn mysql_schema_uses_auto_increment() {
        assert!(Dialect::Mysql.schema()[0].contains("AUTO_INCREMENT"));
        assert!(Dialect::Sqlite.schema()[0].contains("AUTOINCREMENT"));
    }

    #[test]
    fn mysql_options_build_from_config() {
        sqlx::any::install_default_drivers();
        let config = DatabaseConfig {
            password: "p@ss word".to_string(),
            ..DatabaseConfig::default()
        };

        assert!(connect_options(&config).is_ok());
    }

    #[test]
    fn sqlite_options_build_from_path() {
        sqlx::any::install_default_drivers();
        let config = DatabaseConfig::sqlite("/tmp/form-intake-test.db");

        assert!(connect_options(&config).is_ok());
    }

    #[test]
    fn sqlite_path_with_url_delimiters_survives() {
        sqlx::any::install_default_drivers();
        let path = "/tmp/intake #1?v=2.db";
        let config = DatabaseConfig::sqlite(path);

        let options = connect_options(&config).unwrap();
        let sqlite = SqliteConnectOptions::try_from(&options).unwrap();

        assert_eq!(sqlite.get_filename(), std::path::Path::new(path));
        assert!(options.database_url.as_str().contains("mode=rwc"));
    }
}
