pub mod error;
pub mod fetch;
pub mod nested;
pub mod output;
pub mod properties;
pub mod region;

use std::path::PathBuf;

pub use error::{Error, Result};
pub use fetch::{fetch_secrets, flat_key, FetchedSecret, FlatMapping, SecretStore};
pub use nested::{unflatten, Node, Table};
pub use output::{render, write_secrets, OutputFormat};
pub use region::resolve_region;

/// Configuration for writing a secrets file
pub struct SecretsFileConfig {
    pub secret_names: Vec<String>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
}

/// Fetches secrets from a store and writes them out as a single file
pub struct SecretsInit<S> {
    store: S,
}

impl<S: SecretStore> SecretsInit<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch every configured secret, then write `<output_dir>/secrets.<tag>`
    pub async fn write_secrets_file(&self, config: &SecretsFileConfig) -> Result<PathBuf> {
        let secrets = fetch_secrets(&self.store, &config.secret_names).await?;
        write_secrets(&secrets, &config.output_dir, &config.format)
    }
}

/// Split the comma-separated secret list, dropping blank entries
pub fn parse_secret_names(arg: &str) -> Vec<String> {
    arg.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
