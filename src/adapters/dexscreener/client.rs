//! DexScreener Client
//!
//! Public, unauthenticated. Used for Ethereum liquidity and 1h volume since
//! Etherscan has no market data.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::{Chain, TokenDetail};
use crate::ports::{DetailError, DetailProvider};

use super::types::TokenPairsResponse;

/// Configuration for the DexScreenerClient
#[derive(Debug, Clone)]
pub struct DexScreenerConfig {
    /// Base URL; the token address is appended as a path segment
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.dexscreener.com/latest/dex/tokens".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http: Client,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    fn token_url(&self, address: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), address)
    }
}

#[async_trait]
impl DetailProvider for DexScreenerClient {
    async fn fetch_detail(&self, chain: Chain, address: &str) -> Result<TokenDetail, DetailError> {
        let response = self.http.get(self.token_url(address)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetailError::Status(status.as_u16()));
        }

        let body: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| DetailError::Parse(e.to_string()))?;

        let detail = body.detail_for(chain);
        debug!(
            %chain,
            address,
            liquidity = detail.liquidity_usd,
            volume_1h = detail.volume_1h_usd,
            "DexScreener detail"
        );
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_url() {
        let client = DexScreenerClient::new(DexScreenerConfig {
            api_url: "https://api.dexscreener.com/latest/dex/tokens/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.token_url("0xabc"),
            "https://api.dexscreener.com/latest/dex/tokens/0xabc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let client = DexScreenerClient::new(DexScreenerConfig {
            api_url: "http://127.0.0.1:9/tokens".to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap();

        let result = client.fetch_detail(Chain::Ethereum, "0xabc").await;
        assert!(matches!(result, Err(DetailError::Http(_))));
    }
}
