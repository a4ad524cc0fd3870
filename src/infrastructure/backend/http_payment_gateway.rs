//! REST implementation of the payment gateway.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::Payment;
use crate::domain::gateways::{PaymentGateway, PaymentQuery};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::infrastructure::backend::client::BackendClient;

/// Payment gateway over the backend's `/payment` endpoints.
pub struct HttpPaymentGateway {
    client: Arc<BackendClient>,
}

impl HttpPaymentGateway {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn list(&self, access: &str, query: &PaymentQuery) -> Result<Page<Payment>, AppError> {
        let envelope = self
            .client
            .get_json::<Vec<Payment>>("/payment", &query.to_pairs(), Some(access))
            .await?;
        Ok(envelope.into_page()?)
    }

    async fn get(&self, access: &str, id: &str) -> Result<Payment, AppError> {
        let envelope = self
            .client
            .get_json::<Payment>(&format!("/payment/{id}"), &[], Some(access))
            .await?;
        Ok(envelope.into_data()?)
    }
}
