//! bililoader - Bilibili media resolver
//!
//! Resolves a video or short link into stream URLs and metadata and prints the
//! result as JSON.

use anyhow::{Context, Result};
use bililoader::extractor::{BilibiliExtractor, ExtractorRegistry};
use bililoader::utils::ResolverSettings;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bililoader", about = "Resolve a Bilibili video into stream URLs")]
struct Args {
    /// Video page or b23.tv short link
    url: String,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the desktop user agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print compact JSON
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the descriptor
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut settings = ResolverSettings::load_or_default(args.config.as_deref())?;
    if let Some(user_agent) = args.user_agent {
        settings.desktop_user_agent = user_agent;
    }
    if let Some(timeout) = args.timeout {
        settings.timeout_secs = timeout;
    }

    let bilibili = BilibiliExtractor::new(settings).context("Failed to initialize extractor")?;
    let registry = ExtractorRegistry::new(vec![Arc::new(bilibili)]);

    let meta = registry.extract_info(&args.url).await?;
    info!(
        "Resolved {:?}: {} audio, {} video candidates",
        meta.title,
        meta.audios.len(),
        meta.videos.len()
    );

    let json = if args.compact {
        serde_json::to_string(&meta)?
    } else {
        serde_json::to_string_pretty(&meta)?
    };
    println!("{}", json);

    Ok(())
}
