use std::path::PathBuf;

use anyhow::{Context, Error, Result};
use clap::{Parser, Subcommand};
use fcm_batch::{BatchSender, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fcm-batch", about = "Send Firebase Cloud Messaging batches")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send every message in a JSON array file as one batch
    Send {
        /// File holding an array of `{"message": {...}}` documents
        payloads: PathBuf,
    },
    /// Print a fresh OAuth2 access token
    Token,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Command::Send { payloads } => send(config, payloads).await,
        Command::Token => {
            let sender = BatchSender::from_config(config)?;
            println!("{}", sender.get_access_token().await?);
            Ok(())
        }
    }
}

async fn send(config: Config, payloads: PathBuf) -> Result<(), Error> {
    let content = tokio::fs::read_to_string(&payloads)
        .await
        .with_context(|| format!("Failed to read {}", payloads.display()))?;

    let mut sender = BatchSender::from_config(config)?;
    sender.add_custom_payloads_from_json(&content)?;

    info!(payload_count = sender.len(), "Sending batch from file");

    let response = sender.send().await?;

    println!("{}", response.status);
    println!("{}", response.text());

    Ok(())
}
