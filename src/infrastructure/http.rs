//! Payment API client over HTTPS.
//!
//! Requests are authenticated per project with three headers:
//! `Access-Id` (`project/<id>`), `Access-Time` (unix seconds) and
//! `Access-Signature`, the base64 HMAC-SHA256 of
//! `<access-id>:<access-time>:<body>` keyed with the project private key.

use crate::domain::credentials::Project;
use crate::domain::invoice::{InvoiceRequest, InvoiceResult};
use crate::domain::ports::{PaymentClient, PaymentClientBox, PaymentClientFactory};
use crate::domain::transfer::{TransferRequest, TransferResult};
use crate::error::{PayhookError, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;

/// Timeout for payment API calls (seconds)
const API_TIMEOUT_SECS: u64 = 30;
const API_VERSION: &str = "v2";

type HmacSha256 = Hmac<Sha256>;

#[derive(Serialize)]
struct TransferBatch<'a> {
    transfers: &'a [TransferRequest],
}

#[derive(Deserialize)]
struct TransferBatchResponse {
    transfers: Vec<TransferResult>,
}

#[derive(Serialize)]
struct InvoiceBatch<'a> {
    invoices: &'a [InvoiceRequest],
}

#[derive(Deserialize)]
struct InvoiceBatchResponse {
    invoices: Vec<InvoiceResult>,
}

#[derive(Deserialize)]
struct ApiErrors {
    errors: Vec<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    message: String,
}

pub struct HttpPaymentClient {
    project: Project,
    base_url: String,
    http: Client,
}

impl HttpPaymentClient {
    /// Connects to the base URL of the project's environment.
    pub fn new(project: Project) -> Result<Self> {
        let base_url = project.environment.base_url();
        Self::with_base_url(project, base_url)
    }

    pub fn with_base_url(project: Project, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            project,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// A factory opening an `HttpPaymentClient` per project.
    pub fn factory() -> PaymentClientFactory {
        Box::new(|project| Ok(Box::new(HttpPaymentClient::new(project)?) as PaymentClientBox))
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, resource)
    }

    fn sign(&self, access_time: &str, body: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.project.private_key.as_bytes())
            .map_err(|e| PayhookError::Config(format!("invalid private key: {e}")))?;
        mac.update(format!("{}:{}:{}", self.project.access_id(), access_time, body).as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }

    async fn post<P: Serialize, T: DeserializeOwned>(&self, resource: &str, payload: &P) -> Result<T> {
        let body = serde_json::to_string(payload)?;
        let access_time = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&access_time, &body)?;

        debug!(resource, project = %self.project.id, "POST payment API");
        let response = self
            .http
            .post(self.url(resource))
            .header(CONTENT_TYPE, "application/json")
            .header("Access-Id", self.project.access_id())
            .header("Access-Time", access_time)
            .header("Access-Signature", signature)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(PayhookError::PaymentApi {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Flattens an `{"errors": [...]}` body; anything else is returned as is.
fn error_message(text: &str) -> String {
    match serde_json::from_str::<ApiErrors>(text) {
        Ok(api) if !api.errors.is_empty() => api
            .errors
            .iter()
            .map(|e| {
                if e.code.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.code, e.message)
                }
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => text.to_string(),
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn create_transfers(
        &self,
        transfers: Vec<TransferRequest>,
    ) -> Result<Vec<TransferResult>> {
        let response: TransferBatchResponse = self
            .post("transfer", &TransferBatch {
                transfers: &transfers,
            })
            .await?;
        Ok(response.transfers)
    }

    async fn create_invoices(&self, invoices: Vec<InvoiceRequest>) -> Result<Vec<InvoiceResult>> {
        let response: InvoiceBatchResponse = self
            .post("invoice", &InvoiceBatch {
                invoices: &invoices,
            })
            .await?;
        Ok(response.invoices)
    }
}
