use crate::error::{PayhookError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
pub const PROJECT_ID: &str = "PROJECT_ID";

/// Secrets the dispatcher resolves on every invocation, in lookup order.
pub const SECRET_NAMES: [&str; 2] = [PRIVATE_KEY, PROJECT_ID];

/// Secret values keyed by secret name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: HashMap<String, String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| PayhookError::secret_access(name, "secret was not resolved"))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();
        f.debug_struct("Credentials").field("names", &names).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Remote API environment. The dispatcher and the issuer both run against
/// `Sandbox`; `Production` exists so the HTTP client can address the live API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://sandbox.api.starkbank.com",
            Environment::Production => "https://api.starkbank.com",
        }
    }
}

/// Authenticated identity used to call the payment API.
///
/// Built per invocation and handed to the client explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct Project {
    pub environment: Environment,
    pub id: String,
    pub private_key: String,
}

impl Project {
    pub fn new(
        environment: Environment,
        id: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            id: id.into(),
            private_key: private_key.into(),
        }
    }

    pub fn from_credentials(environment: Environment, credentials: &Credentials) -> Result<Self> {
        Ok(Self::new(
            environment,
            credentials.get(PROJECT_ID)?,
            credentials.get(PRIVATE_KEY)?,
        ))
    }

    /// Value of the `Access-Id` header.
    pub fn access_id(&self) -> String {
        format!("project/{}", self.id)
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("environment", &self.environment)
            .field("id", &self.id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
