pub mod cli;
pub mod client;
pub mod dashboard;
pub mod formatters;
pub mod logging;
pub mod models;

use anyhow::Result;
use cli::{ConnectionArgs, OutputFormat, ShowArgs};
use client::{Endpoint, HttpSnapshotClient, SnapshotSource};
use tracing::info;

/// Fetches one snapshot and prints it in the requested format.
pub async fn show_status(args: &ShowArgs, connection: &ConnectionArgs) -> Result<()> {
    let client = HttpSnapshotClient::new(&connection.url, connection.timeout())?;
    let endpoint = if args.update {
        Endpoint::Update
    } else {
        Endpoint::Status
    };

    let snapshot = client.fetch(endpoint).await?;
    info!(%endpoint, spaces = snapshot.spaces.len(), "fetched snapshot");

    if snapshot.spaces.is_empty() {
        println!("The backend reported no parking spaces.");
    }

    match args.format {
        OutputFormat::Table => {
            println!("{}", formatters::format_table(&snapshot));
        }
        OutputFormat::Csv => {
            print!("{}", formatters::format_csv(&snapshot)?);
        }
        OutputFormat::Json => {
            println!("{}", formatters::format_json(&snapshot)?);
        }
        OutputFormat::Markdown => {
            println!("{}", formatters::format_markdown(&snapshot, args.summary));
        }
    }

    // Markdown carries its own summary row
    if args.summary && args.format != OutputFormat::Markdown {
        formatters::print_summary(&snapshot);
    }

    Ok(())
}

/// Queries `/health` and prints the backend's answer.
pub async fn check_health(connection: &ConnectionArgs) -> Result<()> {
    let client = HttpSnapshotClient::new(&connection.url, connection.timeout())?;
    let health = client.health().await?;
    info!(status = %health.status, "health check");

    if health.message.is_empty() {
        println!("{}: {}", client.base_url(), health.status);
    } else {
        println!("{}: {} ({})", client.base_url(), health.status, health.message);
    }

    if health.status != "healthy" {
        anyhow::bail!("backend reported status `{}`", health.status);
    }
    Ok(())
}
