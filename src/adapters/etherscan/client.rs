//! Etherscan Client
//!
//! Ethereum listings derived from the newest ERC-20 transfers.
//! Authenticates with the `apikey` query parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ApiKey;
use crate::domain::{Chain, Token};
use crate::ports::{SourceError, TokenSource};

use super::types::{tokens_from_transfers, EtherscanResponse, TokenTransfer};

/// Configuration for the EtherscanClient
#[derive(Debug, Clone)]
pub struct EtherscanConfig {
    pub api_url: String,
    /// Restrict transfers to one account
    pub watch_address: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for EtherscanConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.etherscan.io/api".to_string(),
            watch_address: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for the Etherscan account API
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    config: EtherscanConfig,
    api_key: ApiKey,
    http: Client,
}

impl EtherscanClient {
    pub fn new(config: EtherscanConfig, api_key: ApiKey) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// Query parameters for a newest-first `tokentx` page
    fn token_tx_params(&self, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("module", "account".to_string()),
            ("action", "tokentx".to_string()),
            ("startblock", "0".to_string()),
            ("endblock", "999999999".to_string()),
            ("sort", "desc".to_string()),
            ("page", "1".to_string()),
            ("offset", limit.to_string()),
        ];
        if let Some(address) = self.config.watch_address.as_deref() {
            params.push(("address", address.to_string()));
        }
        params.push(("apikey", self.api_key.expose().to_string()));
        params
    }
}

#[async_trait]
impl TokenSource for EtherscanClient {
    fn chain(&self) -> Chain {
        Chain::Ethereum
    }

    async fn fetch_recent_tokens(&self, limit: usize) -> Result<Vec<Token>, SourceError> {
        let response = self
            .http
            .get(&self.config.api_url)
            .query(&self.token_tx_params(limit))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let body: EtherscanResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        if !body.is_ok() {
            return Err(SourceError::Api(body.error_message()));
        }

        let transfers: Vec<TokenTransfer> = serde_json::from_value(body.result)
            .map_err(|e| SourceError::Parse(e.to_string()))?;
        let transfer_count = transfers.len();

        let tokens = tokens_from_transfers(transfers);
        debug!(transfers = transfer_count, tokens = tokens.len(), "Etherscan transfers scanned");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(watch_address: Option<&str>) -> EtherscanClient {
        let config = EtherscanConfig {
            watch_address: watch_address.map(str::to_string),
            ..Default::default()
        };
        EtherscanClient::new(config, ApiKey::new("eth-key")).unwrap()
    }

    #[test]
    fn test_token_tx_params() {
        let params = client(None).token_tx_params(50);

        assert!(params.contains(&("action", "tokentx".to_string())));
        assert!(params.contains(&("sort", "desc".to_string())));
        assert!(params.contains(&("offset", "50".to_string())));
        assert!(params.contains(&("apikey", "eth-key".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "address"));
    }

    #[test]
    fn test_token_tx_params_with_watch_address() {
        let params = client(Some("0xwatch")).token_tx_params(10);
        assert!(params.contains(&("address", "0xwatch".to_string())));
    }

    #[test]
    fn test_chain() {
        assert_eq!(client(None).chain(), Chain::Ethereum);
    }
}
