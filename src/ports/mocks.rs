//! In-memory port implementations for tests and offline runs.
//!
//! Each records the calls it receives so tests can assert on fan-out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{Chain, Token, TokenDetail};

use super::detail::{DetailError, DetailProvider};
use super::scoring::ScoringStrategy;
use super::token_source::{SourceError, TokenSource};

/// Token source returning a fixed listing (or a fixed failure)
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    chain: Chain,
    tokens: Vec<Token>,
    fail_status: Option<u16>,
    calls: Arc<Mutex<Vec<usize>>>,
}

impl StaticTokenSource {
    pub fn new(chain: Chain, tokens: Vec<Token>) -> Self {
        Self {
            chain,
            tokens,
            fail_status: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Source whose every fetch fails with the given HTTP status
    pub fn failing(chain: Chain, status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new(chain, Vec::new())
        }
    }

    /// Requested limits, one entry per fetch
    pub fn get_calls(&self) -> Vec<usize> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    fn chain(&self) -> Chain {
        self.chain
    }

    async fn fetch_recent_tokens(&self, limit: usize) -> Result<Vec<Token>, SourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(limit);
        }
        if let Some(status) = self.fail_status {
            return Err(SourceError::Status(status));
        }
        Ok(self.tokens.iter().take(limit).cloned().collect())
    }
}

/// Detail provider backed by an address map. Unknown addresses fail with 404.
#[derive(Debug, Clone, Default)]
pub struct StaticDetailProvider {
    details: HashMap<String, TokenDetail>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl StaticDetailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the detail for an address
    pub fn with_detail(mut self, address: &str, liquidity_usd: f64, volume_1h_usd: f64) -> Self {
        self.details.insert(
            address.to_string(),
            TokenDetail::new(liquidity_usd, volume_1h_usd),
        );
        self
    }

    /// Addresses requested so far, in call order
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DetailProvider for StaticDetailProvider {
    async fn fetch_detail(&self, _chain: Chain, address: &str) -> Result<TokenDetail, DetailError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(address.to_string());
        }
        self.details
            .get(address)
            .copied()
            .ok_or(DetailError::Status(404))
    }
}

/// Deterministic scoring
#[derive(Debug, Clone, Copy)]
pub struct FixedScoring {
    pub dyor: u8,
    pub sentiment: u8,
}

impl FixedScoring {
    pub fn new(dyor: u8, sentiment: u8) -> Self {
        Self { dyor, sentiment }
    }
}

impl ScoringStrategy for FixedScoring {
    fn dyor_score(&self, _token: &Token, _detail: &TokenDetail) -> u8 {
        self.dyor
    }

    fn sentiment_score(&self, _token: &Token) -> u8 {
        self.sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_source() {
        let tokens = vec![
            Token::new(Chain::Solana, "a", None, None, 1),
            Token::new(Chain::Solana, "b", None, None, 2),
        ];
        let source = StaticTokenSource::new(Chain::Solana, tokens);

        let fetched = source.fetch_recent_tokens(1).await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].address, "a");
        assert_eq!(source.get_calls(), vec![1]);
    }

    #[tokio::test]
    async fn test_failing_token_source() {
        let source = StaticTokenSource::failing(Chain::Ethereum, 503);
        let result = source.fetch_recent_tokens(50).await;
        assert!(matches!(result, Err(SourceError::Status(503))));
    }

    #[tokio::test]
    async fn test_static_detail_provider() {
        let provider = StaticDetailProvider::new().with_detail("a", 60_000.0, 30_000.0);

        let detail = provider.fetch_detail(Chain::Solana, "a").await.unwrap();
        assert_eq!(detail.liquidity_usd, 60_000.0);

        let missing = provider.fetch_detail(Chain::Solana, "b").await;
        assert!(matches!(missing, Err(DetailError::Status(404))));
        assert_eq!(provider.get_calls(), vec!["a".to_string(), "b".to_string()]);
    }
}
