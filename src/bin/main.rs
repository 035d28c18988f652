use std::path::PathBuf;

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::Client;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use secrets_init::{
    parse_secret_names, resolve_region, OutputFormat, SecretsFileConfig, SecretsInit,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "secrets-init")]
#[command(about = "Fetch AWS secrets and write them to a single file")]
struct Cli {
    /// Comma-separated secret names, e.g. db/password,db/user
    secrets: Option<String>,

    /// Directory to write the secrets file into (must exist)
    output_dir: Option<PathBuf>,

    /// Output format: yaml, json, toml, properties; anything else writes one value per line
    format: Option<String>,

    /// AWS region (defaults to the region reported by instance metadata)
    region: Option<String>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env("SECRETS_INIT_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("secrets_init=debug")
        } else {
            EnvFilter::new("secrets_init=info")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let secret_names = parse_secret_names(cli.secrets.as_deref().unwrap_or_default());
    if secret_names.is_empty() {
        println!("No secrets to be mounted, exiting");
        return Ok(());
    }

    let (Some(output_dir), Some(format)) = (cli.output_dir, cli.format) else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "an output directory and a format are required when secrets are given",
            )
            .exit();
    };

    let region = resolve_region(cli.region)
        .await
        .context("Failed to resolve AWS region")?;
    info!(region = %region, "Using AWS region");

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .load()
        .await;

    let client = Client::new(&config);
    let secrets_init = SecretsInit::new(client);

    let file_config = SecretsFileConfig {
        secret_names,
        output_dir,
        format: format.parse::<OutputFormat>()?,
    };

    let path = secrets_init
        .write_secrets_file(&file_config)
        .await
        .context("Failed to write secrets file")?;

    println!("Secrets file created: {}", path.display());
    Ok(())
}
