use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use dogsync_core::{AppConfig, EnvDiagnostics};
use dogsync_shopify::{prepare, DogSync, PreparedSync, ShopifyAdminClient, TracingObserver};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dogsync-cli")]
#[command(about = "Replay form submissions into Shopify and inspect configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sync one saved webhook payload.
    Sync {
        /// Path to the JSON payload as delivered by the form webhook.
        #[arg(long)]
        file: PathBuf,
        /// Print the mapped record and product payload without calling Shopify.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print a redacted view of the Shopify settings.
    CheckEnv,
}

#[derive(Serialize)]
struct DryRunReport<'a> {
    record: &'a dogsync_core::DogRecord,
    handle: &'a str,
    product: &'a dogsync_core::ProductPayload,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dogsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync { file, dry_run } => run_sync(&config, &file, dry_run).await,
        Commands::CheckEnv => {
            let report = EnvDiagnostics::from_settings(&config.shopify);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

async fn run_sync(config: &AppConfig, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let raw = read_payload(file)?;

    if dry_run {
        let prepared = prepare(&raw, &TracingObserver)?;
        println!("{}", serde_json::to_string_pretty(&dry_run_report(&prepared))?);
        return Ok(());
    }

    let credentials = config.shopify.resolve()?;
    let client = ShopifyAdminClient::new(
        &credentials,
        config.shopify_timeout_secs,
        &config.user_agent,
    )?;
    let outcome = DogSync::new(client).run(&raw).await?;

    tracing::info!(handle = %outcome.handle, action = %outcome.action, "sync complete");
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn read_payload(file: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read payload file {}", file.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("payload file {} is not valid JSON", file.display()))
}

fn dry_run_report(prepared: &PreparedSync) -> DryRunReport<'_> {
    DryRunReport {
        record: &prepared.record,
        handle: &prepared.handle,
        product: &prepared.payload,
    }
}

#[cfg(test)]
mod tests;
