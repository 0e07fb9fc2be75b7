//! Token Model
//!
//! Transient entities that flow through one refresh run:
//! - `Token`: a listing discovered by a source adapter
//! - `TokenDetail`: market metrics fetched per token
//! - `QualifiedToken`: a token that passed every gate, ready to render

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder symbol for listings without one
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";
/// Placeholder name for listings without one
pub const UNKNOWN_NAME: &str = "Unknown Token";

/// Supported blockchains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    /// All chains, in the order their listings are evaluated
    pub const ALL: [Chain; 2] = [Chain::Solana, Chain::Ethereum];

    /// Human-readable chain name
    pub fn display_name(&self) -> &'static str {
        match self {
            Chain::Solana => "Solana",
            Chain::Ethereum => "Ethereum",
        }
    }

    /// CSS class of the chain badge on a token card
    pub fn badge_class(&self) -> &'static str {
        match self {
            Chain::Solana => "bg-primary",
            Chain::Ethereum => "bg-warning",
        }
    }

    /// Outbound chart link for a token address
    pub fn chart_url(&self, address: &str) -> String {
        match self {
            Chain::Solana => format!("https://birdeye.so/token/{}", address),
            Chain::Ethereum => format!("https://etherscan.io/token/{}", address),
        }
    }

    /// Chain identifier used by DexScreener pair data
    pub fn dexscreener_id(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown chain '{0}' (expected 'solana' or 'ethereum')")]
pub struct ParseChainError(pub String);

impl FromStr for Chain {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana" | "sol" => Ok(Chain::Solana),
            "ethereum" | "eth" => Ok(Chain::Ethereum),
            other => Err(ParseChainError(other.to_string())),
        }
    }
}

/// A recently created token discovered by a source adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Contract / mint address, unique within a chain
    pub address: String,
    pub symbol: String,
    pub name: String,
    /// Creation time in epoch milliseconds
    pub created_at_millis: i64,
    pub chain: Chain,
}

impl Token {
    /// Build a token, substituting placeholders for blank symbol or name
    pub fn new(
        chain: Chain,
        address: impl Into<String>,
        symbol: Option<String>,
        name: Option<String>,
        created_at_millis: i64,
    ) -> Self {
        Self {
            address: address.into(),
            symbol: non_blank(symbol).unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            name: non_blank(name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            created_at_millis,
            chain,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Market metrics for a token, refetched on every run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenDetail {
    pub liquidity_usd: f64,
    pub volume_1h_usd: f64,
}

impl TokenDetail {
    /// Build a detail, clamping negative or non-finite values to zero
    pub fn new(liquidity_usd: f64, volume_1h_usd: f64) -> Self {
        Self {
            liquidity_usd: non_negative(liquidity_usd),
            volume_1h_usd: non_negative(volume_1h_usd),
        }
    }

    /// Detail used when enrichment fails
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.liquidity_usd == 0.0 && self.volume_1h_usd == 0.0
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// A token admitted to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedToken {
    pub token: Token,
    pub detail: TokenDetail,
    /// Age in hours, rounded to one decimal
    pub age_hours: f64,
    pub dyor_score: u8,
    pub sentiment_score: u8,
    /// Presentation-only label
    pub influencer: String,
}

impl QualifiedToken {
    pub fn chain(&self) -> Chain {
        self.token.chain
    }

    pub fn address(&self) -> &str {
        &self.token.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_from_str() {
        assert_eq!("solana".parse::<Chain>(), Ok(Chain::Solana));
        assert_eq!(" ETH ".parse::<Chain>(), Ok(Chain::Ethereum));
        assert!("bsc".parse::<Chain>().is_err());
    }

    #[test]
    fn test_chain_presentation() {
        assert_eq!(Chain::Solana.to_string(), "Solana");
        assert_eq!(Chain::Ethereum.badge_class(), "bg-warning");
        assert_eq!(
            Chain::Solana.chart_url("Mint111"),
            "https://birdeye.so/token/Mint111"
        );
        assert_eq!(
            Chain::Ethereum.chart_url("0xabc"),
            "https://etherscan.io/token/0xabc"
        );
    }

    #[test]
    fn test_chain_serde_lowercase() {
        let json = serde_json::to_string(&Chain::Ethereum).unwrap();
        assert_eq!(json, "\"ethereum\"");
    }

    #[test]
    fn test_token_placeholders() {
        let token = Token::new(Chain::Solana, "addr", None, Some("  ".into()), 0);
        assert_eq!(token.symbol, UNKNOWN_SYMBOL);
        assert_eq!(token.name, UNKNOWN_NAME);

        let token = Token::new(Chain::Solana, "addr", Some("BONK".into()), Some("Bonk".into()), 5);
        assert_eq!(token.symbol, "BONK");
        assert_eq!(token.name, "Bonk");
        assert_eq!(token.created_at_millis, 5);
    }

    #[test]
    fn test_detail_clamps_bad_values() {
        let detail = TokenDetail::new(-5.0, f64::NAN);
        assert!(detail.is_zero());

        let detail = TokenDetail::new(60_000.0, 30_000.0);
        assert_eq!(detail.liquidity_usd, 60_000.0);
        assert!(!detail.is_zero());
    }
}
