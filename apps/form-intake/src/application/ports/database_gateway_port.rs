//! Database Gateway Port (Driven Port)
//!
//! Interface for the relational store. Each call acquires one connection,
//! runs one parameterized statement and releases the connection again,
//! whatever the outcome.

use async_trait::async_trait;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// 64-bit signed integer.
    Integer(i64),
    /// UTF-8 text.
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A parameterized SQL statement.
///
/// The SQL text is fixed at compile time and uses `?` placeholders; caller
/// data only ever travels through [`Statement::bind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: &'static str,
    params: Vec<SqlValue>,
}

impl Statement {
    /// Start a statement with no bound parameters.
    #[must_use]
    pub const fn new(sql: &'static str) -> Self {
        Self {
            sql,
            params: Vec::new(),
        }
    }

    /// Bind the next placeholder.
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// SQL text.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        self.sql
    }

    /// Bound parameters in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Split into SQL text and parameters.
    #[must_use]
    pub fn into_parts(self) -> (&'static str, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

/// Result of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOutcome {
    /// Rows inserted or changed.
    pub rows_affected: u64,
    /// Identifier generated for the inserted row, when the store reports one.
    pub generated_id: Option<i64>,
}

/// Gateway error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// No connection could be acquired.
    #[error("Store connection error: {message}")]
    Connection {
        /// Driver message.
        message: String,
    },

    /// The statement was sent but failed.
    #[error("Statement failed: {message}")]
    Statement {
        /// Driver message.
        message: String,
    },

    /// The statement did not finish in time.
    #[error("Statement timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured statement timeout.
        timeout_ms: u64,
    },
}

/// Port for the relational store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseGatewayPort: Send + Sync {
    /// Execute one write statement.
    async fn execute(&self, statement: Statement) -> Result<ExecuteOutcome, GatewayError>;

    /// Run a query and report whether it returned at least one row.
    async fn exists(&self, statement: Statement) -> Result<bool, GatewayError>;

    /// Check that a connection can be acquired and used.
    async fn ping(&self) -> Result<(), GatewayError>;
}
