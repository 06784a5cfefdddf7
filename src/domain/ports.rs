use super::credentials::Project;
use super::invoice::{InvoiceRequest, InvoiceResult};
use super::transfer::{TransferRequest, TransferResult};
use crate::error::Result;
use async_trait::async_trait;

/// Key-value lookup of named secrets, scoped by region.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, name: &str, region: &str) -> Result<String>;
}

/// An authenticated session against the payment API.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    async fn create_transfers(
        &self,
        transfers: Vec<TransferRequest>,
    ) -> Result<Vec<TransferResult>>;
    async fn create_invoices(&self, invoices: Vec<InvoiceRequest>) -> Result<Vec<InvoiceResult>>;
}

pub type SecretStoreBox = Box<dyn SecretStore>;
pub type PaymentClientBox = Box<dyn PaymentClient>;

/// Opens a fresh payment session for a project.
pub type PaymentClientFactory = Box<dyn Fn(Project) -> Result<PaymentClientBox> + Send + Sync>;
