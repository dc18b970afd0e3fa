use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use validator::Validate;

use crawl_cli::{CannedFetcher, ConfigLoader, CrawlConfig, HttpFetcher, crawl, sink};

#[derive(Parser)]
#[command(name = "crawl-cli")]
#[command(about = "Bounded-depth concurrent web crawler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a live site over HTTP
    Crawl {
        /// Start URL (may come from --config instead)
        url: Option<String>,

        /// Maximum link-hop depth (1 = start page only)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Config file (json, yaml or toml); flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// User-Agent header sent with each request
        #[arg(long)]
        user_agent: Option<String>,

        /// Per-request timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Crawl the built-in sample site with the canned fetcher
    Demo {
        /// Maximum link-hop depth
        #[arg(short, long, default_value_t = 4)]
        depth: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl { url, depth, config, user_agent, timeout_ms } => {
            let mut settings = match &config {
                Some(path) => ConfigLoader::load(path)?,
                None => CrawlConfig::default(),
            };
            if let Some(url) = url {
                settings.start_url = url;
            }
            if let Some(depth) = depth {
                settings.max_depth = depth;
            }
            if let Some(user_agent) = user_agent {
                settings.user_agent = user_agent;
            }
            if let Some(timeout_ms) = timeout_ms {
                settings.timeout_ms = timeout_ms;
            }
            settings.validate().context("Invalid crawl settings")?;

            tracing::info!(
                "Starting crawl: {} (depth {})",
                settings.start_url,
                settings.max_depth
            );
            let fetcher = HttpFetcher::new(
                &settings.user_agent,
                Duration::from_millis(settings.timeout_ms),
            )?;
            let stream = crawl(&settings.start_url, settings.max_depth, Arc::new(fetcher));
            let lines = sink::render(stream).await;
            tracing::info!("Crawl finished: {} lines", lines);
        }
        Commands::Demo { depth } => {
            tracing::info!("Starting demo crawl over the canned sample site (depth {})", depth);
            let fetcher = Arc::new(CannedFetcher::sample_site());
            let stream = crawl("https://example.com/", depth, fetcher);
            let lines = sink::render(stream).await;
            tracing::info!("Demo finished: {} lines", lines);
        }
    }

    Ok(())
}
