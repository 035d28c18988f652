use std::collections::HashSet;

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// A secret as returned by the store: its name and string payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSecret {
    pub name: String,
    pub value: String,
}

/// Anything that can look up a secret value by identifier
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret_value(&self, id: &str) -> Result<FetchedSecret>;
}

#[async_trait]
impl SecretStore for Client {
    async fn get_secret_value(&self, id: &str) -> Result<FetchedSecret> {
        let response = Client::get_secret_value(self)
            .secret_id(id)
            .send()
            .await
            .map_err(|e| Error::Fetch {
                id: id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let value = response
            .secret_string()
            .ok_or_else(|| Error::MissingSecretString { id: id.to_string() })?;

        // An ARN lookup reports the friendly name; fall back to what was asked for
        let name = response.name().unwrap_or(id);

        Ok(FetchedSecret {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Secret values keyed by dotted name, in the order they were fetched
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlatMapping {
    entries: Vec<(String, String)>,
}

impl FlatMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Keys are unique within a mapping.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.get(&key).is_some() {
            return Err(Error::DuplicateKey { key });
        }
        self.entries.push((key, value.into()));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turn a secret name into its flat key: `db/password` becomes `db.password`
pub fn flat_key(name: &str) -> String {
    name.replace('/', ".")
}

/// Fetch every secret in `ids`, one request at a time and in order.
///
/// A repeated identifier is fetched once, at its first position. The first
/// failure aborts the whole batch.
pub async fn fetch_secrets<S>(store: &S, ids: &[String]) -> Result<FlatMapping>
where
    S: SecretStore + ?Sized,
{
    let mut mapping = FlatMapping::new();
    let mut seen = HashSet::new();

    for id in ids {
        if !seen.insert(id.as_str()) {
            debug!(secret = %id, "Skipping repeated secret");
            continue;
        }
        info!(secret = %id, "Fetching secret");
        let secret = store.get_secret_value(id).await?;
        let key = flat_key(&secret.name);
        debug!(secret = %id, key = %key, "Fetched secret");
        mapping.insert(key, secret.value)?;
    }

    Ok(mapping)
}
