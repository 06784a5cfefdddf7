use payhook::application::dispatcher::WebhookDispatcher;
use payhook::config::DispatcherConfig;
use payhook::domain::credentials::{PRIVATE_KEY, PROJECT_ID};
use payhook::domain::ports::PaymentClientBox;
use payhook::domain::webhook::WebhookRequest;
use payhook::infrastructure::in_memory::{InMemoryPaymentClient, InMemorySecretStore};
use serde_json::Value;

pub fn secret_store() -> InMemorySecretStore {
    InMemorySecretStore::new()
        .with_secret(PRIVATE_KEY, "test-private-key")
        .with_secret(PROJECT_ID, "5656565656565656")
}

pub fn dispatcher(store: InMemorySecretStore, client: &InMemoryPaymentClient) -> WebhookDispatcher {
    let client = client.clone();
    WebhookDispatcher::new(
        Box::new(store),
        Box::new(move |_| Ok(Box::new(client.clone()) as PaymentClientBox)),
        DispatcherConfig::default(),
    )
}

pub fn request(payload: Value) -> WebhookRequest {
    WebhookRequest::new(payload.to_string())
}
