//! Market data tools exposed to MCP hosts

pub mod batch;
pub mod history;
pub mod snapshot;
pub mod stock_news;

pub use batch::{CompareStocksTool, MultipleQuotesTool};
pub use history::PriceHistoryTool;
pub use snapshot::{InfoTool, InfoView};
pub use stock_news::StockNewsTool;

use market_core::{Error, Result, Symbol};
use market_tools::Tool;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::MarketConfig;
use crate::provider::MarketDataProvider;

/// Build every market data tool over a shared provider
pub fn market_tools(
    provider: Arc<dyn MarketDataProvider>,
    config: Arc<MarketConfig>,
) -> Vec<Arc<dyn Tool>> {
    let mut tools: Vec<Arc<dyn Tool>> = InfoView::ALL
        .into_iter()
        .map(|view| Arc::new(InfoTool::new(view, provider.clone())) as Arc<dyn Tool>)
        .collect();

    tools.push(Arc::new(PriceHistoryTool::new(provider.clone())));
    tools.push(Arc::new(StockNewsTool::new(provider.clone(), config.clone())));
    tools.push(Arc::new(MultipleQuotesTool::new(
        provider.clone(),
        config.clone(),
    )));
    tools.push(Arc::new(CompareStocksTool::new(provider, config)));

    tools
}

/// Arguments of the single-symbol tools
#[derive(Debug, Deserialize)]
pub(crate) struct SymbolParams {
    pub symbol: Symbol,
}

/// Arguments of the batch tools
///
/// Entries stay raw so that one bad entry only fails its own slot.
#[derive(Debug, Deserialize)]
pub(crate) struct SymbolsParams {
    pub symbols: Vec<Value>,
}

/// Decode tool arguments, reporting failures as invalid arguments
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| Error::InvalidArguments(e.to_string()))
}

/// Slot reported for a symbol that failed inside a batch
pub(crate) fn error_slot(symbol: &impl Serialize, err: &Error) -> Value {
    json!({
        "symbol": symbol,
        "error": err.to_string(),
    })
}
