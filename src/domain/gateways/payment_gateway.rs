//! Gateway trait for payment history.

use crate::domain::entities::{Payment, PaymentStatus};
use crate::domain::gateways::PageQuery;
use crate::domain::page::Page;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Filters for the backend's `GET /payment` listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentQuery {
    pub page: PageQuery,
    pub status: Option<PaymentStatus>,
    pub member_id: Option<String>,
    /// Inclusive date range on the payment date.
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PaymentQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        self.page.push_pairs(&mut pairs);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(ref member_id) = self.member_id {
            pairs.push(("memberId", member_id.clone()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.to_string()));
        }
        pairs
    }
}

/// Gateway interface for the backend's `/payment` endpoints.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpPaymentGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Lists payments matching the query.
    async fn list(&self, access: &str, query: &PaymentQuery) -> Result<Page<Payment>, AppError>;

    /// Fetches a single payment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown ids.
    async fn get(&self, access: &str, id: &str) -> Result<Payment, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_pairs_use_iso_dates() {
        let query = PaymentQuery {
            from: NaiveDate::from_ymd_opt(2026, 1, 1),
            to: NaiveDate::from_ymd_opt(2026, 1, 31),
            ..Default::default()
        };
        let pairs = query.to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("from", "2026-01-01".to_string()),
                ("to", "2026-01-31".to_string()),
            ]
        );
    }
}
