//! ogtags CLI
//!
//! Runs the Open Graph tag service, or extracts tags from a single page.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ogtags_api::{ApiConfig, ApiServer};
use ogtags_core::PageFetcher;
use ogtags_fetch::{FetcherConfig, HttpPageFetcher};

/// ogtags - Open Graph tags with a TTL cache
#[derive(Parser)]
#[command(name = "ogtags")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
        /// Cache store address (`memory://` for an in-process store)
        #[arg(long, env = "REDIS_URL")]
        redis_url: Option<String>,
    },

    /// Fetch a page once and print its tags, bypassing the cache
    Fetch {
        /// Page URL
        url: String,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "ogtags=debug,tower_http=debug,info"
    } else {
        "ogtags=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind, redis_url } => cmd_serve(port, &bind, redis_url).await,
        Commands::Fetch { url, pretty } => cmd_fetch(&url, pretty).await,
    }
}

/// Run the API server
async fn cmd_serve(port: u16, bind: &str, redis_url: Option<String>) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(url) = redis_url {
        config.redis_url = url;
    }
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("invalid bind address {bind}:{port}"))?;

    println!("{}", "Starting ogtags API server...".cyan().bold());
    println!("   {} {}", "Cache store:".green(), config.redis_url);

    let server = ApiServer::connect(config.clone())
        .await
        .with_context(|| format!("failed to connect to cache store at {}", config.redis_url))?;

    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/get_tags?url=...", "Lookup:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    server.run(addr).await?;

    Ok(())
}

/// Fetch a page and print its tags
async fn cmd_fetch(url: &str, pretty: bool) -> Result<()> {
    let config = ApiConfig::from_env();
    let fetcher = HttpPageFetcher::with_config(FetcherConfig {
        timeout: config.fetch_timeout,
    })?;

    let tags = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("can't fetch tags from {url}"))?;

    let json = if pretty {
        serde_json::to_string_pretty(&tags)?
    } else {
        tags.to_json()?
    };
    println!("{json}");

    Ok(())
}
