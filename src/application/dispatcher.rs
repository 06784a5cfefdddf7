use crate::application::secrets::resolve_secrets;
use crate::config::DispatcherConfig;
use crate::domain::credentials::{Environment, Project, SECRET_NAMES};
use crate::domain::event::InboundEvent;
use crate::domain::ports::{PaymentClientFactory, SecretStoreBox};
use crate::domain::transfer::TransferRequest;
use crate::domain::webhook::{Rejection, WebhookRequest, WebhookResponse};
use crate::error::Result;
use serde_json::Value;
use tracing::{error, info, warn};

/// Turns inbound invoice events into outbound transfers.
///
/// Each call to [`WebhookDispatcher::handle`] resolves its own credentials and
/// opens its own payment session; nothing is shared between invocations.
/// Sessions always target the sandbox environment.
pub struct WebhookDispatcher {
    secret_store: SecretStoreBox,
    connect: PaymentClientFactory,
    config: DispatcherConfig,
}

impl WebhookDispatcher {
    /// Creates a new `WebhookDispatcher`.
    ///
    /// # Arguments
    ///
    /// * `secret_store` - Where `PRIVATE_KEY` and `PROJECT_ID` are read from.
    /// * `connect` - Opens a payment session for the resolved project.
    /// * `config` - Secret region and transfer recipient.
    pub fn new(
        secret_store: SecretStoreBox,
        connect: PaymentClientFactory,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            secret_store,
            connect,
            config,
        }
    }

    /// Handles one inbound request. Every failure becomes a response.
    pub async fn handle(&self, request: WebhookRequest) -> WebhookResponse {
        match self.dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("An error occurred during the handling of the event: {}", e);
                WebhookResponse::server_error(&e.to_string())
            }
        }
    }

    async fn dispatch(&self, request: WebhookRequest) -> Result<WebhookResponse> {
        let credentials =
            resolve_secrets(self.secret_store.as_ref(), &SECRET_NAMES, &self.config.region)
                .await?;
        let project = Project::from_credentials(Environment::Sandbox, &credentials)?;
        let client = (self.connect)(project)?;

        let Some(payload) = request.payload() else {
            return Ok(reject(Rejection::BodyMissing));
        };

        let received: Value = serde_json::from_str(payload)?;
        info!("Received body: {}", received);
        let event = InboundEvent::from_json(&received)?;

        let amount = match event.nominal_amount() {
            Ok(amount) => amount,
            Err(rejection) => return Ok(reject(rejection)),
        };

        let transfer = TransferRequest::new(amount, self.config.recipient.clone());
        let transfers = client.create_transfers(vec![transfer]).await?;
        let ids: Vec<String> = transfers.into_iter().map(|t| t.id).collect();
        info!(%amount, transfers = ?ids, "Transfer executed");

        Ok(WebhookResponse::received(&received, &ids))
    }
}

fn reject(rejection: Rejection) -> WebhookResponse {
    warn!("{}", rejection);
    WebhookResponse::rejected(rejection)
}
