use crate::domain::ports::SecretStore;
use crate::error::{PayhookError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;

/// Secrets kept in a JSON file shaped `{"<region>": {"<name>": "<value>"}}`.
///
/// The file is read on every lookup, so edits are picked up immediately.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, HashMap<String, String>>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn get_secret(&self, name: &str, region: &str) -> Result<String> {
        let mut regions = self.load().await.map_err(|e| {
            PayhookError::secret_access(name, format!("{}: {}", self.path.display(), e))
        })?;

        let mut secrets = regions
            .remove(region)
            .ok_or_else(|| PayhookError::secret_access(name, format!("unknown region {region}")))?;

        secrets
            .remove(name)
            .ok_or_else(|| PayhookError::secret_access(name, format!("not found in {region}")))
    }
}
