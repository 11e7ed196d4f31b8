use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use yokatlas_core::{detect_backend, ProgramService, SurfacePreference};
use yokatlas_mcp::{default_registry, run_stdio, McpServer};

mod api;
mod config;

use config::{Overrides, ServerConfig};

/// Bind address for HTTP mode
const HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "yokatlas-mcp-server")]
#[command(about = "MCP server for YÖK Atlas program details and search", long_about = None)]
struct Args {
    /// Serve MCP over stdin/stdout instead of HTTP
    #[arg(long)]
    stdio: bool,

    /// Path to configuration file
    #[arg(short, long, default_value = "yokatlas.toml")]
    config: PathBuf,

    /// Port to listen on in HTTP mode
    #[arg(short, long, env = "PORT", default_value = "8000")]
    port: u16,

    /// Base URL of the YÖK Atlas provider service
    #[arg(long, env = "YOKATLAS_PROVIDER_URL")]
    provider_url: Option<String>,

    /// Bearer token for the provider service
    #[arg(long, env = "YOKATLAS_PROVIDER_API_KEY", hide_env_values = true)]
    provider_api_key: Option<String>,

    /// Search API surface: auto, smart or legacy
    #[arg(long)]
    search_surface: Option<SurfacePreference>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn init_tracing(format: LogFormat, debug: bool) {
    let default_filter = if debug {
        "yokatlas=debug,tower_http=debug"
    } else {
        "yokatlas=info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // stdout carries protocol frames in stdio mode, so logs always go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format, args.debug);

    tracing::info!("Starting YÖK Atlas MCP server");

    let config = ServerConfig::load(&args.config)?.apply(Overrides {
        provider_url: args.provider_url,
        api_key: args.provider_api_key,
        search_surface: args.search_surface,
    });

    let client = Arc::new(config.build_client()?);
    tracing::info!(provider = %client.base_url(), "Using provider");

    let backend = detect_backend(client.clone(), config.provider.search_surface)
        .await
        .context("Failed to select a search API surface")?;
    let search_surface = backend.surface();
    tracing::info!(surface = %search_surface, "Search surface selected");

    let service = ProgramService::new(client, backend);
    let mcp = McpServer::new(default_registry(service))
        .with_server_info("YOKATLAS API Server", env!("CARGO_PKG_VERSION"));
    tracing::info!("Registered {} tools", mcp.registry().len());

    if args.stdio {
        run_stdio(mcp).await?;
    } else {
        let addr = format!("{}:{}", HOST, args.port);
        tracing::info!("Starting HTTP server on {}", addr);
        api::serve(&addr, api::AppState { mcp, search_surface }).await?;
    }

    Ok(())
}
