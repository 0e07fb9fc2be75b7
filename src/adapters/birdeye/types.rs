//! Birdeye Response Types
//!
//! Only the fields the dashboard reads. Everything is optional: missing
//! values are defaulted rather than rejected.

use serde::Deserialize;

use crate::domain::{Chain, Token, TokenDetail};

/// `/public/tokenlist` response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenListResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<TokenListData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenListData {
    #[serde(default)]
    pub tokens: Vec<ListedToken>,
}

/// One listing entry
#[derive(Debug, Clone, Deserialize)]
pub struct ListedToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Creation time, epoch milliseconds
    #[serde(default)]
    pub created: Option<f64>,
}

impl ListedToken {
    /// Convert to a domain token. Entries without an address are unusable.
    pub fn into_token(self) -> Option<Token> {
        let address = self.address.filter(|a| !a.trim().is_empty())?;
        let created_at_millis = self
            .created
            .filter(|c| c.is_finite())
            .map(|c| c as i64)
            .unwrap_or(0);
        Some(Token::new(
            Chain::Solana,
            address.trim(),
            self.symbol,
            self.name,
            created_at_millis,
        ))
    }
}

impl TokenListResponse {
    /// Listing tokens in response order (newest first)
    pub fn into_tokens(self) -> Vec<Token> {
        self.data
            .unwrap_or_default()
            .tokens
            .into_iter()
            .filter_map(ListedToken::into_token)
            .collect()
    }
}

/// `/public/token_list/info` response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfoResponse {
    #[serde(default)]
    pub data: Option<TokenInfoData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenInfoData {
    #[serde(default)]
    pub liquidity: Option<f64>,
    #[serde(default)]
    pub volume: Option<VolumeWindows>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolumeWindows {
    #[serde(default)]
    pub h1: Option<f64>,
}

impl TokenInfoResponse {
    pub fn into_detail(self) -> TokenDetail {
        let data = self.data.unwrap_or_default();
        TokenDetail::new(
            data.liquidity.unwrap_or(0.0),
            data.volume.and_then(|v| v.h1).unwrap_or(0.0),
        )
    }
}
