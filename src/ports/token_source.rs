use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Chain, Token};

/// Listing source error type
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listing API returned status {0}")]
    Status(u16),

    #[error("Listing API error: {0}")]
    Api(String),

    #[error("Data parsing error: {0}")]
    Parse(String),
}

/// Source of recently created tokens for one chain
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Chain this source lists
    fn chain(&self) -> Chain;

    /// Fetch up to `limit` recently created tokens, newest first
    async fn fetch_recent_tokens(&self, limit: usize) -> Result<Vec<Token>, SourceError>;
}
