//! In-memory database gateway for testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::application::ports::{
    DatabaseGatewayPort, ExecuteOutcome, GatewayError, SqlValue, Statement,
};

/// In-memory implementation of `DatabaseGatewayPort`.
///
/// Records every executed statement and hands out increasing ids. Suitable
/// for testing and development. Not for production use.
#[derive(Debug)]
pub struct InMemoryGateway {
    executed: Mutex<Vec<Statement>>,
    products: Mutex<HashSet<i64>>,
    next_id: AtomicI64,
    available: AtomicBool,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGateway {
    /// Create an empty, reachable gateway.
    #[must_use]
    pub fn new() -> Self {
        Self {
            executed: Mutex::new(Vec::new()),
            products: Mutex::new(HashSet::new()),
            next_id: AtomicI64::new(1),
            available: AtomicBool::new(true),
        }
    }

    /// Gateway whose `products` lookup knows these ids.
    #[must_use]
    pub fn with_products(ids: impl IntoIterator<Item = i64>) -> Self {
        let gateway = Self::new();
        gateway
            .products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(ids);
        gateway
    }

    /// Gateway that behaves like an unreachable store.
    #[must_use]
    pub fn unavailable() -> Self {
        let gateway = Self::new();
        gateway.set_available(false);
        gateway
    }

    /// Toggle reachability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<Statement> {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of rows written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(GatewayError::Connection {
                message: "in-memory store is unavailable".to_string(),
            })
        }
    }
}

#[async_trait]
impl DatabaseGatewayPort for InMemoryGateway {
    async fn execute(&self, statement: Statement) -> Result<ExecuteOutcome, GatewayError> {
        self.check_available()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(statement);
        Ok(ExecuteOutcome {
            rows_affected: 1,
            generated_id: Some(id),
        })
    }

    async fn exists(&self, statement: Statement) -> Result<bool, GatewayError> {
        self.check_available()?;
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(statement.params().iter().any(|param| match param {
            SqlValue::Integer(id) => products.contains(id),
            SqlValue::Text(_) => false,
        }))
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.check_available()
    }
}
