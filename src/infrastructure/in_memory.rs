use crate::domain::invoice::{InvoiceRequest, InvoiceResult};
use crate::domain::ports::{PaymentClient, SecretStore};
use crate::domain::transfer::{TransferRequest, TransferResult};
use crate::error::{PayhookError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A map-backed secret store. Regions are ignored.
///
/// Keeps a log of every lookup so callers can check what was read.
#[derive(Default, Clone)]
pub struct InMemorySecretStore {
    secrets: HashMap<String, String>,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl InMemorySecretStore {
    /// Creates a new, empty in-memory secret store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }

    /// Names looked up so far, in order.
    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn get_secret(&self, name: &str, _region: &str) -> Result<String> {
        self.lookups.write().await.push(name.to_string());
        self.secrets
            .get(name)
            .cloned()
            .ok_or_else(|| PayhookError::secret_access(name, "secret not found"))
    }
}

/// A payment client that keeps everything it is sent in memory.
///
/// Clones share the same records, so a clone handed to the code under test
/// can be inspected afterwards. Ids are sequential.
#[derive(Default, Clone)]
pub struct InMemoryPaymentClient {
    transfers: Arc<RwLock<Vec<TransferRequest>>>,
    invoices: Arc<RwLock<Vec<InvoiceRequest>>>,
    batches: Arc<RwLock<Vec<usize>>>,
    next_id: Arc<AtomicU64>,
    failure: Option<String>,
}

impl InMemoryPaymentClient {
    /// Creates a new, empty in-memory payment client.
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub async fn transfers(&self) -> Vec<TransferRequest> {
        self.transfers.read().await.clone()
    }

    pub async fn invoices(&self) -> Vec<InvoiceRequest> {
        self.invoices.read().await.clone()
    }

    /// Size of each invoice batch received, in order.
    pub async fn invoice_batches(&self) -> Vec<usize> {
        self.batches.read().await.clone()
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(PayhookError::PaymentApi {
                status: 400,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> String {
        (self.next_id.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentClient {
    async fn create_transfers(
        &self,
        transfers: Vec<TransferRequest>,
    ) -> Result<Vec<TransferResult>> {
        self.check_failure()?;
        let results = transfers
            .iter()
            .map(|_| TransferResult {
                id: self.next_id(),
                status: Some("created".to_string()),
            })
            .collect();
        self.transfers.write().await.extend(transfers);
        Ok(results)
    }

    async fn create_invoices(&self, invoices: Vec<InvoiceRequest>) -> Result<Vec<InvoiceResult>> {
        self.check_failure()?;
        let results = invoices
            .iter()
            .map(|_| InvoiceResult {
                id: self.next_id(),
                status: Some("created".to_string()),
            })
            .collect();
        self.batches.write().await.push(invoices.len());
        self.invoices.write().await.extend(invoices);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amount::Amount;
    use crate::domain::transfer::Recipient;

    #[tokio::test]
    async fn test_in_memory_secret_store() {
        let store = InMemorySecretStore::new().with_secret("PROJECT_ID", "1");

        assert_eq!(store.get_secret("PROJECT_ID", "any").await.unwrap(), "1");
        assert!(matches!(
            store.get_secret("PRIVATE_KEY", "any").await,
            Err(PayhookError::SecretAccess { .. })
        ));
        assert_eq!(store.lookups().await, vec!["PROJECT_ID", "PRIVATE_KEY"]);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let client = InMemoryPaymentClient::new();
        let handle = client.clone();
        let transfer = TransferRequest::new(Amount::new(10).unwrap(), Recipient::stark_bank());

        let first = client.create_transfers(vec![transfer.clone()]).await.unwrap();
        let second = handle.create_transfers(vec![transfer]).await.unwrap();

        assert_eq!(first[0].id, "1");
        assert_eq!(second[0].id, "2");
        assert_eq!(client.transfers().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failing_client_records_nothing() {
        let client = InMemoryPaymentClient::failing("invalid account");
        let transfer = TransferRequest::new(Amount::new(10).unwrap(), Recipient::stark_bank());

        let err = client.create_transfers(vec![transfer]).await.unwrap_err();
        assert!(err.to_string().contains("invalid account"));
        assert!(client.transfers().await.is_empty());
    }
}
