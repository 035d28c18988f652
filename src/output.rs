use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::Result;
use crate::fetch::FlatMapping;
use crate::nested::unflatten;
use crate::properties;

/// How the secrets file is encoded, chosen by its format tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
    Toml,
    Properties,
    /// Any other tag: one value per line, keys dropped
    Plain(String),
}

impl OutputFormat {
    /// The tag as given, which doubles as the file extension
    pub fn tag(&self) -> &str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
            OutputFormat::Properties => "properties",
            OutputFormat::Plain(tag) => tag,
        }
    }

    pub fn file_name(&self) -> String {
        format!("secrets.{}", self.tag())
    }
}

impl FromStr for OutputFormat {
    type Err = Infallible;

    fn from_str(tag: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match tag {
            "yaml" => OutputFormat::Yaml,
            "json" => OutputFormat::Json,
            "toml" => OutputFormat::Toml,
            "properties" => OutputFormat::Properties,
            other => OutputFormat::Plain(other.to_string()),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Encode the secrets in the given format
pub fn render(flat: &FlatMapping, format: &OutputFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Yaml => {
            let body = serde_yaml::to_string(&unflatten(flat)?)?;
            format!("---\n{}", body).into_bytes()
        }
        OutputFormat::Json => serde_json::to_vec(&unflatten(flat)?)?,
        OutputFormat::Toml => toml::to_string(&unflatten(flat)?)?.into_bytes(),
        OutputFormat::Properties => properties::encode(flat, true)?,
        OutputFormat::Plain(_) => flat
            .values()
            .flat_map(|v| [v, "\n"])
            .collect::<String>()
            .into_bytes(),
    };
    Ok(bytes)
}

/// Write `<output_dir>/secrets.<tag>`, replacing any existing file.
///
/// The directory must already exist.
pub fn write_secrets(
    flat: &FlatMapping,
    output_dir: &Path,
    format: &OutputFormat,
) -> Result<PathBuf> {
    let file_path = output_dir.join(format.file_name());
    let content = render(flat, format)?;
    debug!(path = %file_path.display(), bytes = content.len(), "Rendered secrets");

    fs::write(&file_path, content)?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&file_path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&file_path, perms)?;
    }

    info!(
        path = %file_path.display(),
        format = %format,
        count = flat.len(),
        "Wrote secrets file"
    );
    Ok(file_path)
}
