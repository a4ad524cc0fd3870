//! Payment history service.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::normalized;
use crate::domain::entities::Payment;
use crate::domain::gateways::{PaymentGateway, PaymentQuery};
use crate::domain::page::Page;
use crate::error::AppError;

pub struct PaymentService<G: PaymentGateway> {
    gateway: Arc<G>,
}

impl<G: PaymentGateway> PaymentService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists payments with paging defaults applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the date range is inverted.
    pub async fn list(
        &self,
        access: &str,
        query: &PaymentQuery,
    ) -> Result<Page<Payment>, AppError> {
        if let (Some(from), Some(to)) = (query.from, query.to)
            && from > to
        {
            return Err(AppError::bad_request(
                "Date range start is after its end",
                json!({ "from": from.to_string(), "to": to.to_string() }),
            ));
        }

        let query = PaymentQuery {
            page: normalized(&query.page),
            ..query.clone()
        };
        self.gateway.list(access, &query).await
    }

    /// Fetches a single payment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    pub async fn get(&self, access: &str, id: &str) -> Result<Payment, AppError> {
        self.gateway.get(access, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::MockPaymentGateway;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_inverted_date_range_rejected_without_network() {
        let service = PaymentService::new(Arc::new(MockPaymentGateway::new()));

        let query = PaymentQuery {
            from: NaiveDate::from_ymd_opt(2026, 2, 1),
            to: NaiveDate::from_ymd_opt(2026, 1, 1),
            ..Default::default()
        };

        let err = service.list("token", &query).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
