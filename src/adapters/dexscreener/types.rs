//! DexScreener response types

use serde::Deserialize;

use crate::domain::{Chain, TokenDetail};

/// `/latest/dex/tokens/{address}` response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPairsResponse {
    /// `null` when the token has no pools
    #[serde(default)]
    pub pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub liquidity: Option<PairLiquidity>,
    #[serde(default)]
    pub volume: Option<PairVolume>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairVolume {
    #[serde(default)]
    pub h1: Option<f64>,
}

impl TokenPairsResponse {
    /// Sum liquidity and 1h volume across every pool on `chain`
    pub fn detail_for(&self, chain: Chain) -> TokenDetail {
        let chain_id = chain.dexscreener_id();
        let (liquidity, volume) = self
            .pairs
            .iter()
            .flatten()
            .filter(|pair| pair.chain_id == chain_id)
            .fold((0.0, 0.0), |(liq, vol), pair| {
                let pair_liq = pair.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0);
                let pair_vol = pair.volume.as_ref().and_then(|v| v.h1).unwrap_or(0.0);
                (liq + pair_liq, vol + pair_vol)
            });

        TokenDetail::new(liquidity, volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sums_pools_on_matching_chain() {
        let json = r#"{
            "schemaVersion": "1.0.0",
            "pairs": [
                {"chainId": "ethereum", "dexId": "uniswap", "pairAddress": "0x1",
                 "liquidity": {"usd": 40000.5}, "volume": {"h1": 12000, "h24": 90000}},
                {"chainId": "ethereum", "dexId": "sushiswap", "pairAddress": "0x2",
                 "liquidity": {"usd": 20000}, "volume": {"h1": 18000}},
                {"chainId": "bsc", "dexId": "pancakeswap", "pairAddress": "0x3",
                 "liquidity": {"usd": 999999}, "volume": {"h1": 999999}}
            ]
        }"#;

        let response: TokenPairsResponse = serde_json::from_str(json).unwrap();
        let detail = response.detail_for(Chain::Ethereum);

        assert_relative_eq!(detail.liquidity_usd, 60000.5);
        assert_relative_eq!(detail.volume_1h_usd, 30000.0);
    }

    #[test]
    fn test_null_pairs_is_zero() {
        let response: TokenPairsResponse =
            serde_json::from_str(r#"{"schemaVersion": "1.0.0", "pairs": null}"#).unwrap();
        assert!(response.detail_for(Chain::Ethereum).is_zero());
    }

    #[test]
    fn test_missing_metrics_count_as_zero() {
        let json = r#"{"pairs": [{"chainId": "ethereum", "liquidity": {"usd": 5000}}]}"#;
        let response: TokenPairsResponse = serde_json::from_str(json).unwrap();
        let detail = response.detail_for(Chain::Ethereum);

        assert_relative_eq!(detail.liquidity_usd, 5000.0);
        assert_relative_eq!(detail.volume_1h_usd, 0.0);
    }
}
