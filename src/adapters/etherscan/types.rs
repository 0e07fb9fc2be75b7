//! Etherscan Response Types
//!
//! `tokentx` returns token transfers, not listings. Tokens are derived by
//! scanning transfers newest first and keeping the first transfer seen per
//! contract.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Chain, Token};

/// Generic Etherscan envelope. `result` is an array on success and a string
/// message on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct EtherscanResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Value,
}

impl EtherscanResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// Human-readable failure reason
    pub fn error_message(&self) -> String {
        match &self.result {
            Value::String(detail) if !detail.is_empty() => {
                format!("{} ({})", self.message, detail)
            }
            _ => self.message.clone(),
        }
    }
}

/// One ERC-20 transfer
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTransfer {
    #[serde(rename = "contractAddress", default)]
    pub contract_address: Option<String>,
    #[serde(rename = "tokenSymbol", default)]
    pub token_symbol: Option<String>,
    #[serde(rename = "tokenName", default)]
    pub token_name: Option<String>,
    /// Block time, epoch seconds as a decimal string
    #[serde(rename = "timeStamp", default)]
    pub time_stamp: Option<String>,
}

impl TokenTransfer {
    fn created_at_millis(&self) -> i64 {
        self.time_stamp
            .as_deref()
            .and_then(|ts| ts.trim().parse::<i64>().ok())
            .map(|secs| secs.saturating_mul(1000))
            .unwrap_or(0)
    }
}

/// Distinct tokens from a transfer list, first occurrence wins.
///
/// Addresses are compared case-insensitively and stored lowercase.
pub fn tokens_from_transfers(transfers: Vec<TokenTransfer>) -> Vec<Token> {
    let mut seen_addresses = HashSet::new();
    let mut tokens = Vec::new();

    for transfer in transfers {
        let address = match transfer.contract_address.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a.to_ascii_lowercase(),
            _ => continue,
        };
        if !seen_addresses.insert(address.clone()) {
            continue;
        }

        let created_at_millis = transfer.created_at_millis();
        tokens.push(Token::new(
            Chain::Ethereum,
            address,
            transfer.token_symbol,
            transfer.token_name,
            created_at_millis,
        ));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_SYMBOL;

    fn transfer(address: &str, symbol: &str, ts: &str) -> TokenTransfer {
        TokenTransfer {
            contract_address: Some(address.to_string()),
            token_symbol: Some(symbol.to_string()),
            token_name: Some(format!("{} Token", symbol)),
            time_stamp: Some(ts.to_string()),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let transfers = vec![
            transfer("0xAAA", "NEW", "1700000300"),
            transfer("0xbbb", "MID", "1700000200"),
            transfer("0xaaa", "OLD", "1700000100"),
        ];

        let tokens = tokens_from_transfers(transfers);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].address, "0xaaa");
        assert_eq!(tokens[0].symbol, "NEW");
        assert_eq!(tokens[0].created_at_millis, 1_700_000_300_000);
        assert_eq!(tokens[1].symbol, "MID");
        assert!(tokens.iter().all(|t| t.chain == Chain::Ethereum));
    }

    #[test]
    fn test_transfers_without_contract_skipped() {
        let mut no_contract = transfer("", "X", "1");
        no_contract.contract_address = None;
        let tokens = tokens_from_transfers(vec![no_contract, transfer("  ", "Y", "1")]);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_bad_timestamp_defaults_to_zero() {
        let mut t = transfer("0x1", "", "not-a-number");
        t.token_symbol = None;
        let tokens = tokens_from_transfers(vec![t]);
        assert_eq!(tokens[0].created_at_millis, 0);
        assert_eq!(tokens[0].symbol, UNKNOWN_SYMBOL);
    }

    #[test]
    fn test_parse_success_envelope() {
        let json = r#"{
            "status": "1",
            "message": "OK",
            "result": [
                {"contractAddress": "0xdAC17F958D2ee523a2206206994597C13D831ec7",
                 "tokenSymbol": "USDT", "tokenName": "Tether USD",
                 "timeStamp": "1700000000", "blockNumber": "1"}
            ]
        }"#;

        let response: EtherscanResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_ok());

        let transfers: Vec<TokenTransfer> = serde_json::from_value(response.result).unwrap();
        let tokens = tokens_from_transfers(transfers);
        assert_eq!(tokens[0].address, "0xdac17f958d2ee523a2206206994597c13d831ec7");
        assert_eq!(tokens[0].name, "Tether USD");
    }

    #[test]
    fn test_parse_error_envelope() {
        let json = r#"{"status": "0", "message": "NOTOK", "result": "Invalid API Key"}"#;
        let response: EtherscanResponse = serde_json::from_str(json).unwrap();

        assert!(!response.is_ok());
        assert_eq!(response.error_message(), "NOTOK (Invalid API Key)");
    }
}
