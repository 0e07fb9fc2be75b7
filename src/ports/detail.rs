use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Chain, TokenDetail};

/// Detail enrichment error type
#[derive(Error, Debug)]
pub enum DetailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Detail API returned status {0}")]
    Status(u16),

    #[error("Data parsing error: {0}")]
    Parse(String),

    #[error("Chain not supported by this provider: {0}")]
    UnsupportedChain(Chain),
}

/// Per-token market metrics (liquidity, 1h volume)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DetailProvider: Send + Sync {
    /// Fetch metrics for one token. One request per call, no caching.
    async fn fetch_detail(&self, chain: Chain, address: &str) -> Result<TokenDetail, DetailError>;
}
