//! Birdeye Client
//!
//! Solana listings (newest first) and per-token liquidity / 1h volume.
//! Authenticates with the `x-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ApiKey;
use crate::domain::{Chain, Token, TokenDetail};
use crate::ports::{DetailError, DetailProvider, SourceError, TokenSource};

use super::types::{TokenInfoResponse, TokenListResponse};

const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for the BirdeyeClient
#[derive(Debug, Clone)]
pub struct BirdeyeConfig {
    pub token_list_url: String,
    pub token_info_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for BirdeyeConfig {
    fn default() -> Self {
        Self {
            token_list_url: "https://public-api.birdeye.so/public/tokenlist".to_string(),
            token_info_url: "https://public-api.birdeye.so/public/token_list/info".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Birdeye public API
#[derive(Debug, Clone)]
pub struct BirdeyeClient {
    config: BirdeyeConfig,
    api_key: ApiKey,
    http: Client,
}

impl BirdeyeClient {
    pub fn new(config: BirdeyeConfig, api_key: ApiKey) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// Newest-first listing request, `limit` tokens from the start
    fn token_list_request(&self, limit: usize) -> Result<reqwest::Request, reqwest::Error> {
        self.http
            .get(&self.config.token_list_url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(&token_list_params(limit))
            .build()
    }
}

fn token_list_params(limit: usize) -> [(&'static str, String); 4] {
    [
        ("sort_by", "created".to_string()),
        ("sort_type", "desc".to_string()),
        ("offset", "0".to_string()),
        ("limit", limit.to_string()),
    ]
}

#[async_trait]
impl TokenSource for BirdeyeClient {
    fn chain(&self) -> Chain {
        Chain::Solana
    }

    async fn fetch_recent_tokens(&self, limit: usize) -> Result<Vec<Token>, SourceError> {
        let request = self.token_list_request(limit)?;
        let response = self.http.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: TokenListResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        let tokens = body.into_tokens();
        debug!(count = tokens.len(), "Birdeye listing fetched");
        Ok(tokens)
    }
}

#[async_trait]
impl DetailProvider for BirdeyeClient {
    async fn fetch_detail(&self, chain: Chain, address: &str) -> Result<TokenDetail, DetailError> {
        if chain != Chain::Solana {
            return Err(DetailError::UnsupportedChain(chain));
        }

        let response = self
            .http
            .get(&self.config.token_info_url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .query(&[("token_address", address)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetailError::Status(status.as_u16()));
        }

        let body: TokenInfoResponse = response
            .json()
            .await
            .map_err(|e| DetailError::Parse(e.to_string()))?;

        Ok(body.into_detail())
    }
}
