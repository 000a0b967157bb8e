//! live-market-data: MCP server for live stock market data

mod args;

use anyhow::Context;
use clap::Parser;
use market_data::{MarketDataProvider, YahooProvider, market_tools};
use market_mcp::McpServer;
use market_mcp::transport::serve_stdio;
use market_tools::ToolRegistry;
use market_utils::Config;
use std::sync::Arc;
use tracing::info;

use crate::args::Args;

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut app = Config::default().with_env();
    if let Some(format) = args.log_format {
        app.log_format = format;
    }
    market_utils::init_tracing(app.log_format, DEFAULT_LOG_FILTER);

    let config = Arc::new(args.market_config().context("Invalid configuration")?);

    info!(
        version = %app.version,
        timeout_secs = config.request_timeout.as_secs(),
        "Starting {}",
        app.app_name
    );

    let provider = Arc::new(
        YahooProvider::new(&config).context("Failed to create market data provider")?,
    );
    info!(provider = provider.name(), "Market data provider ready");
    let registry = ToolRegistry::new().with_tools(market_tools(provider, config));
    let server = McpServer::new(Arc::new(registry), &app);

    serve_stdio(&server).await.context("MCP session failed")?;

    info!("Shutting down");
    Ok(())
}
