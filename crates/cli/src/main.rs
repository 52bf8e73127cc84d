//! AliCloud Security CLI - Main Entry Point
//!
//! Manages VisionOne connected AliCloud accounts directly against the CAM
//! API, using the same client and settings as the Terraform provider.

use alicloudsecurity_common::{region_endpoint, CamClient, CamConfig, EndpointType};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::account;

/// VisionOne AliCloud Security CLI
#[derive(Parser)]
#[command(name = "alicloudsecurity")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// VisionOne API key
    #[arg(long, env = "VISIONONE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// VisionOne region (au, eu, in, jp, sg, uae, us)
    #[arg(long, env = "VISIONONE_REGION", global = true)]
    region: Option<String>,

    /// Base URL of the VisionOne API, derived from the region when unset
    #[arg(long, env = "VISIONONE_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Endpoint type (automation, express)
    #[arg(long, env = "VISIONONE_ENDPOINT_TYPE", default_value_t = EndpointType::Automation, global = true)]
    endpoint_type: EndpointType,

    /// VisionOne business (tenant) ID
    #[arg(long, env = "VISIONONE_BUSINESS_ID", global = true)]
    business_id: Option<String>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connected accounts
    #[command(subcommand)]
    Account(account::AccountCommands),

    /// Show version information
    Version,
}

impl Cli {
    fn cam_config(&self) -> Result<CamConfig> {
        let api_key = self
            .api_key
            .clone()
            .context("Missing VisionOne API Key: pass --api-key or set VISIONONE_API_KEY")?;
        let region = self
            .region
            .clone()
            .context("Missing VisionOne Region: pass --region or set VISIONONE_REGION")?;
        let business_id = self
            .business_id
            .clone()
            .context("Missing VisionOne Business ID: pass --business-id or set VISIONONE_BUSINESS_ID")?;

        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => region_endpoint(&region)?.to_string(),
        };

        Ok(CamConfig::new(
            endpoint,
            self.endpoint_type.as_str(),
            api_key,
            business_id,
            region,
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Account(ref cmd) => {
            let config = cli.cam_config()?;
            tracing::debug!(?config, "Using VisionOne settings");
            let client = CamClient::new(config).context("Unable to create VisionOne API client")?;
            account::execute(cmd.clone(), client, cli.format).await?;
        }
        Commands::Version => {
            println!("alicloudsecurity v{}", env!("CARGO_PKG_VERSION"));
            println!("CAM client v{}", alicloudsecurity_common::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_endpoint_derived_from_region() {
        let cli = Cli::try_parse_from([
            "alicloudsecurity",
            "--api-key",
            "k",
            "--region",
            "jp",
            "--business-id",
            "t",
            "account",
            "get",
            "a1",
        ])
        .unwrap();

        let config = cli.cam_config().unwrap();
        assert_eq!(config.endpoint, "https://api.xdr.trendmicro.co.jp");
        assert_eq!(config.endpoint_type, "automation");
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let cli = Cli::try_parse_from([
            "alicloudsecurity",
            "account",
            "delete",
            "a1",
            "--api-key",
            "k",
            "--region",
            "nowhere",
            "--business-id",
            "t",
            "--endpoint",
            "http://localhost:8080",
            "--endpoint-type",
            "express",
        ])
        .unwrap();

        let config = cli.cam_config().unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.endpoint_type, "express");
    }
}
