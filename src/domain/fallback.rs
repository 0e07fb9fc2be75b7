//! Sample Feed
//!
//! Fixed demo tokens shown when a run qualifies nothing, so the page is never
//! blank. Whether this kicks in is controlled by `FallbackPolicy`, and every run
//! reports which feed it rendered.

use serde::{Deserialize, Serialize};

use super::token::{Chain, QualifiedToken, Token, TokenDetail};

/// What to show when nothing qualifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Show the fixed sample set
    #[default]
    Sample,
    /// Show an empty section
    None,
}

/// Which data ended up on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Feed {
    /// At least one token qualified this run
    Live,
    /// Nothing qualified, sample tokens substituted
    Fallback,
    /// Nothing qualified and fallback disabled
    Empty,
}

impl Feed {
    /// Label shown in the page's `feed` slot
    pub fn label(&self) -> &'static str {
        match self {
            Feed::Live => "Live data",
            Feed::Fallback => "Sample data",
            Feed::Empty => "No qualifying tokens",
        }
    }
}

struct SampleEntry {
    symbol: &'static str,
    name: &'static str,
    age_hours: f64,
    liquidity_usd: f64,
    volume_1h_usd: f64,
    dyor_score: u8,
    sentiment_score: u8,
    influencer: &'static str,
    address: &'static str,
    chain: Chain,
}

static SAMPLE_ENTRIES: [SampleEntry; 6] = [
    SampleEntry {
        symbol: "SPEPE",
        name: "Super Pepe",
        age_hours: 6.5,
        liquidity_usd: 58_000.0,
        volume_1h_usd: 31_000.0,
        dyor_score: 85,
        sentiment_score: 77,
        influencer: "SolWhaleAlpha",
        address: "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU",
        chain: Chain::Solana,
    },
    SampleEntry {
        symbol: "MDOGE",
        name: "Moon Doge",
        age_hours: 8.2,
        liquidity_usd: 72_000.0,
        volume_1h_usd: 45_000.0,
        dyor_score: 75,
        sentiment_score: 68,
        influencer: "CryptoGems",
        address: "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R",
        chain: Chain::Solana,
    },
    SampleEntry {
        symbol: "FLOKI",
        name: "Floki Moon",
        age_hours: 10.1,
        liquidity_usd: 65_000.0,
        volume_1h_usd: 28_000.0,
        dyor_score: 70,
        sentiment_score: 65,
        influencer: "BSCWhale",
        address: "6XU36wCxWobLx5Rtsb58kmgAJKVYmMVqy4SHXxENAyAe",
        chain: Chain::Solana,
    },
    SampleEntry {
        symbol: "PEPE2",
        name: "Pepe 2.0",
        age_hours: 5.3,
        liquidity_usd: 85_000.0,
        volume_1h_usd: 52_000.0,
        dyor_score: 82,
        sentiment_score: 75,
        influencer: "EthWhale",
        address: "0x6982508145454ce325ddbe47a25d4ec3d2311933",
        chain: Chain::Ethereum,
    },
    SampleEntry {
        symbol: "WOJAK",
        name: "Wojak Finance",
        age_hours: 7.8,
        liquidity_usd: 67_000.0,
        volume_1h_usd: 38_000.0,
        dyor_score: 68,
        sentiment_score: 72,
        influencer: "ETHMoonshots",
        address: "0x25f8087ead173b73d6e8b84329989a8eea16cf73",
        chain: Chain::Ethereum,
    },
    SampleEntry {
        symbol: "MOON",
        name: "MoonCoin",
        age_hours: 9.5,
        liquidity_usd: 59_000.0,
        volume_1h_usd: 27_000.0,
        dyor_score: 65,
        sentiment_score: 63,
        influencer: "DeFiGuru",
        address: "0x68749665ff8d2d112fa859aa293f07a622782f38",
        chain: Chain::Ethereum,
    },
];

/// Sample tokens for the enabled chains, in chain order.
///
/// Creation times are back-dated from `now_secs` so the stored age matches the
/// displayed one.
pub fn sample_tokens(chains: &[Chain], now_secs: f64) -> Vec<QualifiedToken> {
    chains
        .iter()
        .flat_map(|chain| SAMPLE_ENTRIES.iter().filter(move |entry| entry.chain == *chain))
        .map(|entry| {
            let created_at_millis = ((now_secs - entry.age_hours * 3600.0) * 1000.0) as i64;
            QualifiedToken {
                token: Token::new(
                    entry.chain,
                    entry.address,
                    Some(entry.symbol.to_string()),
                    Some(entry.name.to_string()),
                    created_at_millis,
                ),
                detail: TokenDetail::new(entry.liquidity_usd, entry.volume_1h_usd),
                age_hours: entry.age_hours,
                dyor_score: entry.dyor_score,
                sentiment_score: entry.sentiment_score,
                influencer: entry.influencer.to_string(),
            }
        })
        .collect()
}
