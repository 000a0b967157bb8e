//! Command-line arguments

use clap::Parser;
use market_data::config::MarketConfigBuilder;
use market_data::{MarketConfig, Result};
use market_utils::LogFormat;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "live-market-data")]
#[command(version, about = "MCP server for live stock market data from Yahoo Finance", long_about = None)]
pub struct Args {
    /// JSON configuration file (camelCase keys)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// User agent sent to Yahoo Finance
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log output format on stderr (pretty or json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Args {
    /// Resolve market configuration: defaults, then file, then environment, then flags
    pub fn market_config(&self) -> Result<MarketConfig> {
        self.market_config_with_env(|key| std::env::var(key).ok())
    }

    fn market_config_with_env(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<MarketConfig> {
        let mut builder = match &self.config {
            Some(path) => MarketConfigBuilder::from_file(path)?,
            None => MarketConfig::builder(),
        };

        builder = builder.with_env_from(lookup)?;

        if let Some(secs) = self.timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        builder.build()
    }
}
