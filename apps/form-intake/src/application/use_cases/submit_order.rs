//! Submit Order Use Case

use std::sync::Arc;

use crate::application::dto::OrderReceiptDto;
use crate::application::errors::SubmissionError;
use crate::application::ports::DatabaseGatewayPort;
use crate::application::statements;
use crate::domain::order::{NewOrder, OrderDraft, QuantityParsing};
use crate::domain::shared::OrderId;

/// Validates an order submission and stores it as one row.
pub struct SubmitOrderUseCase<G>
where
    G: DatabaseGatewayPort,
{
    gateway: Arc<G>,
    quantity_parsing: QuantityParsing,
}

impl<G> SubmitOrderUseCase<G>
where
    G: DatabaseGatewayPort,
{
    /// Create a new `SubmitOrderUseCase`.
    pub const fn new(gateway: Arc<G>, quantity_parsing: QuantityParsing) -> Self {
        Self {
            gateway,
            quantity_parsing,
        }
    }

    /// Execute the use case.
    ///
    /// Nothing is written when validation fails. The store is called once and
    /// never retried.
    pub async fn execute(&self, draft: OrderDraft) -> Result<OrderReceiptDto, SubmissionError> {
        let new_order = NewOrder::validate(&draft, self.quantity_parsing)?;

        let outcome = self
            .gateway
            .execute(statements::insert_order(&new_order))
            .await?;

        if outcome.rows_affected != 1 {
            return Err(SubmissionError::storage(format!(
                "order insert affected {} rows",
                outcome.rows_affected
            )));
        }
        let id = outcome
            .generated_id
            .ok_or_else(|| SubmissionError::storage("store returned no order id"))?;

        let order = new_order.into_order(OrderId::new(id));
        tracing::info!(
            order_id = %order.id,
            product = %order.product,
            quantity = order.quantity,
            "Order stored"
        );

        Ok(OrderReceiptDto::from(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ExecuteOutcome, GatewayError, MockDatabaseGatewayPort};
    use crate::domain::shared::ValidationError;

    fn draft() -> OrderDraft {
        OrderDraft {
            product: Some("Baseball cap".to_string()),
            quantity: Some("5".to_string()),
            name: Some("Alice".to_string()),
            email: Some("alice@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            address: Some("1 Main St".to_string()),
            cap_color: Some("blue".to_string()),
        }
    }

    fn inserted(id: i64) -> ExecuteOutcome {
        ExecuteOutcome {
            rows_affected: 1,
            generated_id: Some(id),
        }
    }

    #[tokio::test]
    async fn valid_order_returns_generated_id() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway
            .expect_execute()
            .withf(|statement| statement.sql().starts_with("INSERT INTO orders"))
            .times(1)
            .returning(|_| Ok(inserted(42)));

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        let receipt = use_case.execute(draft()).await.unwrap();

        assert_eq!(receipt.order_id, OrderId::new(42));
        assert_eq!(receipt.quantity, 5);
    }

    #[tokio::test]
    async fn missing_field_never_reaches_store() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway.expect_execute().never();

        let mut d = draft();
        d.email = None;

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        let err = use_case.execute(d).await.unwrap_err();

        assert_eq!(
            err,
            SubmissionError::Validation(ValidationError::MissingField { field: "email" })
        );
    }

    #[tokio::test]
    async fn lenient_parsing_stores_zero_for_letters() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway.expect_execute().times(1).returning(|_| Ok(inserted(1)));

        let mut d = draft();
        d.quantity = Some("abc".to_string());

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Lenient);
        assert_eq!(use_case.execute(d).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn connection_failure_is_connection_error() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway.expect_execute().times(1).returning(|_| {
            Err(GatewayError::Connection {
                message: "connection refused".to_string(),
            })
        });

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        let err = use_case.execute(draft()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Connection { .. }));
    }

    #[tokio::test]
    async fn statement_timeout_is_storage_error() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway
            .expect_execute()
            .times(1)
            .returning(|_| Err(GatewayError::Timeout { timeout_ms: 100 }));

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        let err = use_case.execute(draft()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Storage { timed_out: true, .. }));
    }

    #[tokio::test]
    async fn missing_generated_id_is_storage_error() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway.expect_execute().times(1).returning(|_| {
            Ok(ExecuteOutcome {
                rows_affected: 1,
                generated_id: None,
            })
        });

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        let err = use_case.execute(draft()).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Storage { timed_out: false, .. }));
    }

    #[tokio::test]
    async fn zero_rows_affected_is_storage_error() {
        let mut gateway = MockDatabaseGatewayPort::new();
        gateway.expect_execute().times(1).returning(|_| {
            Ok(ExecuteOutcome {
                rows_affected: 0,
                generated_id: Some(3),
            })
        });

        let use_case = SubmitOrderUseCase::new(Arc::new(gateway), QuantityParsing::Strict);
        assert!(use_case.execute(draft()).await.is_err());
    }
}
