use crate::domain::credentials::Credentials;
use crate::domain::ports::SecretStore;
use crate::error::Result;
use tracing::error;

/// Resolves every secret in `names` from `store`.
///
/// Lookups run in order and stop at the first failure; no partial result is
/// returned. Nothing is cached, every call reads the store again.
pub async fn resolve_secrets(
    store: &dyn SecretStore,
    names: &[&str],
    region: &str,
) -> Result<Credentials> {
    let mut credentials = Credentials::new();
    for name in names {
        match store.get_secret(name, region).await {
            Ok(value) => credentials.insert(*name, value),
            Err(e) => {
                error!(secret = %name, region, "Failed to retrieve secret: {}", e);
                return Err(e);
            }
        }
    }
    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::{PRIVATE_KEY, PROJECT_ID, SECRET_NAMES};
    use crate::error::PayhookError;
    use crate::infrastructure::in_memory::InMemorySecretStore;

    #[tokio::test]
    async fn test_resolves_all_names() {
        let store = InMemorySecretStore::new()
            .with_secret(PRIVATE_KEY, "key")
            .with_secret(PROJECT_ID, "42");

        let credentials = resolve_secrets(&store, &SECRET_NAMES, "us-west-2")
            .await
            .unwrap();

        assert_eq!(credentials.len(), 2);
        assert_eq!(credentials.get(PRIVATE_KEY).unwrap(), "key");
        assert_eq!(credentials.get(PROJECT_ID).unwrap(), "42");
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let store = InMemorySecretStore::new().with_secret(PROJECT_ID, "42");

        let err = resolve_secrets(&store, &SECRET_NAMES, "us-west-2")
            .await
            .unwrap_err();

        assert!(matches!(err, PayhookError::SecretAccess { ref name, .. } if name == PRIVATE_KEY));
        assert_eq!(store.lookups().await, vec![PRIVATE_KEY.to_string()]);
    }

    #[tokio::test]
    async fn test_every_call_reads_the_store() {
        let store = InMemorySecretStore::new()
            .with_secret(PRIVATE_KEY, "key")
            .with_secret(PROJECT_ID, "42");

        resolve_secrets(&store, &SECRET_NAMES, "us-west-2").await.unwrap();
        resolve_secrets(&store, &SECRET_NAMES, "us-west-2").await.unwrap();

        assert_eq!(store.lookups().await.len(), 4);
    }
}
