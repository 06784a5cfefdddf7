use crate::domain::ports::SecretStore;
use crate::error::{PayhookError, Result};
use async_trait::async_trait;

/// Reads secrets from process environment variables.
///
/// The variable name is the secret name, optionally prefixed. Regions are
/// accepted for interface compatibility and ignored.
#[derive(Debug, Default, Clone)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn variable(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn get_secret(&self, name: &str, _region: &str) -> Result<String> {
        let variable = self.variable(name);
        std::env::var(&variable)
            .map_err(|e| PayhookError::secret_access(name, format!("{variable}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_variable_is_a_secret_error() {
        let store = EnvSecretStore::with_prefix("PAYHOOK_TEST_UNSET_");

        let err = store.get_secret("PRIVATE_KEY", "us-west-2").await.unwrap_err();
        assert!(matches!(err, PayhookError::SecretAccess { .. }));
        assert!(err.to_string().contains("PAYHOOK_TEST_UNSET_PRIVATE_KEY"));
    }

    #[tokio::test]
    async fn test_reads_unprefixed_variable() {
        // PATH is set in every test environment.
        let store = EnvSecretStore::new();
        let value = store.get_secret("PATH", "us-west-2").await.unwrap();
        assert_eq!(value, std::env::var("PATH").unwrap());
    }

    #[tokio::test]
    async fn test_prefix_is_prepended_to_secret_name() {
        let store = EnvSecretStore::with_prefix("PA");
        assert_eq!(store.variable("TH"), "PATH");

        let value = store.get_secret("TH", "us-west-2").await.unwrap();
        assert_eq!(value, std::env::var("PATH").unwrap());
    }
}
