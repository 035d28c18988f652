use thiserror::Error;

/// Errors raised while fetching secrets or writing the secrets file
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to fetch secret '{id}': {message}")]
    Fetch { id: String, message: String },

    #[error("secret '{id}' does not contain a string value")]
    MissingSecretString { id: String },

    #[error("secret key '{key}' appears more than once")]
    DuplicateKey { key: String },

    #[error("secret key '{key}' conflicts with another key at the same path")]
    KeyConflict { key: String },

    #[error("could not determine AWS region from instance metadata")]
    RegionUnavailable,

    #[error("property '{key}' contains {ch:?}, which cannot be written to a properties file")]
    Unrepresentable { key: String, ch: char },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json serialize error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialize error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml serialize error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
