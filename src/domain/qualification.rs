//! Qualification Gates
//!
//! Pure threshold checks that decide whether a token is admitted to the
//! dashboard, plus the per-chain quota that bounds the result set.
//!
//! Gate order (applied by the refresh pipeline):
//! 1. Age (no network needed)
//! 2. Liquidity and 1h volume (after enrichment)
//! 3. DYOR score, then sentiment score

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::token::{Chain, Token, TokenDetail};

/// Default maximum token age in hours
pub const DEFAULT_MAX_AGE_HOURS: f64 = 12.0;

/// Default minimum liquidity in USD
pub const DEFAULT_MIN_LIQUIDITY_USD: f64 = 50_000.0;

/// Default minimum 1-hour volume in USD
pub const DEFAULT_MIN_VOLUME_1H_USD: f64 = 25_000.0;

/// Default minimum DYOR score
pub const DEFAULT_MIN_DYOR_SCORE: u8 = 60;

/// Default minimum sentiment score
pub const DEFAULT_MIN_SENTIMENT_SCORE: u8 = 60;

/// Default number of qualified tokens shown per chain
pub const DEFAULT_MAX_PER_CHAIN: usize = 3;

/// Why a candidate was turned away
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("too old: {age_hours:.1}h > {max_hours:.1}h")]
    TooOld { age_hours: f64, max_hours: f64 },

    #[error("liquidity ${current:.0} < ${minimum:.0}")]
    LowLiquidity { current: f64, minimum: f64 },

    #[error("1h volume ${current:.0} < ${minimum:.0}")]
    LowVolume { current: f64, minimum: f64 },

    #[error("DYOR score {score} < {minimum}")]
    LowDyorScore { score: u8, minimum: u8 },

    #[error("sentiment score {score} < {minimum}")]
    LowSentiment { score: u8, minimum: u8 },
}

/// Threshold set applied to every candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationCriteria {
    pub max_age_hours: f64,
    pub min_liquidity_usd: f64,
    pub min_volume_1h_usd: f64,
    pub min_dyor_score: u8,
    pub min_sentiment_score: u8,
    pub max_per_chain: usize,
}

impl Default for QualificationCriteria {
    fn default() -> Self {
        Self {
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            min_liquidity_usd: DEFAULT_MIN_LIQUIDITY_USD,
            min_volume_1h_usd: DEFAULT_MIN_VOLUME_1H_USD,
            min_dyor_score: DEFAULT_MIN_DYOR_SCORE,
            min_sentiment_score: DEFAULT_MIN_SENTIMENT_SCORE,
            max_per_chain: DEFAULT_MAX_PER_CHAIN,
        }
    }
}

impl QualificationCriteria {
    /// Age gate. Returns the unrounded age in hours when the token is fresh enough.
    pub fn check_age(&self, token: &Token, now_secs: f64) -> Result<f64, Rejection> {
        let age = age_hours(token.created_at_millis, now_secs);
        if age > self.max_age_hours {
            return Err(Rejection::TooOld {
                age_hours: age,
                max_hours: self.max_age_hours,
            });
        }
        Ok(age)
    }

    /// Liquidity then volume gate
    pub fn check_market(&self, detail: &TokenDetail) -> Result<(), Rejection> {
        if detail.liquidity_usd < self.min_liquidity_usd {
            return Err(Rejection::LowLiquidity {
                current: detail.liquidity_usd,
                minimum: self.min_liquidity_usd,
            });
        }
        if detail.volume_1h_usd < self.min_volume_1h_usd {
            return Err(Rejection::LowVolume {
                current: detail.volume_1h_usd,
                minimum: self.min_volume_1h_usd,
            });
        }
        Ok(())
    }

    pub fn check_dyor(&self, score: u8) -> Result<(), Rejection> {
        if score < self.min_dyor_score {
            return Err(Rejection::LowDyorScore {
                score,
                minimum: self.min_dyor_score,
            });
        }
        Ok(())
    }

    pub fn check_sentiment(&self, score: u8) -> Result<(), Rejection> {
        if score < self.min_sentiment_score {
            return Err(Rejection::LowSentiment {
                score,
                minimum: self.min_sentiment_score,
            });
        }
        Ok(())
    }
}

/// Token age in hours: `(now - created_at_millis / 1000) / 3600`
pub fn age_hours(created_at_millis: i64, now_secs: f64) -> f64 {
    (now_secs - created_at_millis as f64 / 1000.0) / 3600.0
}

/// Round to one decimal place for display
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-chain bounded counter.
///
/// A chain is saturated once it holds `limit` qualified tokens. The pass is
/// over once every tracked chain is saturated.
#[derive(Debug, Clone)]
pub struct ChainQuota {
    limit: usize,
    counts: BTreeMap<Chain, usize>,
}

impl ChainQuota {
    pub fn new(chains: &[Chain], limit: usize) -> Self {
        let counts = chains.iter().map(|c| (*c, 0)).collect();
        Self { limit, counts }
    }

    /// Whether the chain can take no more tokens. Untracked chains are always full.
    pub fn is_full(&self, chain: Chain) -> bool {
        self.counts
            .get(&chain)
            .map_or(true, |count| *count >= self.limit)
    }

    pub fn record(&mut self, chain: Chain) {
        if let Some(count) = self.counts.get_mut(&chain) {
            *count += 1;
        }
    }

    /// Free slots left for the chain, zero for untracked chains
    pub fn remaining(&self, chain: Chain) -> usize {
        self.counts
            .get(&chain)
            .map_or(0, |count| self.limit.saturating_sub(*count))
    }

    pub fn count(&self, chain: Chain) -> usize {
        self.counts.get(&chain).copied().unwrap_or(0)
    }

    pub fn all_saturated(&self) -> bool {
        self.counts.values().all(|count| *count >= self.limit)
    }
}

/// Outcome counters for one qualification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualificationStats {
    pub candidates: usize,
    pub too_old: usize,
    pub quota_skipped: usize,
    pub enriched: usize,
    pub low_liquidity: usize,
    pub low_volume: usize,
    pub low_dyor: usize,
    pub low_sentiment: usize,
    pub qualified: usize,
}

impl QualificationStats {
    pub fn record_rejection(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::TooOld { .. } => self.too_old += 1,
            Rejection::LowLiquidity { .. } => self.low_liquidity += 1,
            Rejection::LowVolume { .. } => self.low_volume += 1,
            Rejection::LowDyorScore { .. } => self.low_dyor += 1,
            Rejection::LowSentiment { .. } => self.low_sentiment += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.too_old + self.low_liquidity + self.low_volume + self.low_dyor + self.low_sentiment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NOW: f64 = 1_700_000_000.0;

    fn token_aged(hours: f64) -> Token {
        let created = ((NOW - hours * 3600.0) * 1000.0) as i64;
        Token::new(Chain::Solana, "addr", Some("TEST".into()), None, created)
    }

    #[test]
    fn test_age_hours_formula() {
        let created_ms = ((NOW - 5400.0) * 1000.0) as i64;
        assert_relative_eq!(age_hours(created_ms, NOW), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(6.54), 6.5);
        assert_eq!(round_to_tenth(6.56), 6.6);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }

    #[test]
    fn test_age_gate() {
        let criteria = QualificationCriteria::default();
        assert!(criteria.check_age(&token_aged(11.9), NOW).is_ok());
        assert!(criteria.check_age(&token_aged(12.0), NOW).is_ok());
        assert!(matches!(
            criteria.check_age(&token_aged(12.5), NOW),
            Err(Rejection::TooOld { .. })
        ));
    }

    #[test]
    fn test_missing_creation_time_is_too_old() {
        let criteria = QualificationCriteria::default();
        let token = Token::new(Chain::Ethereum, "0x1", None, None, 0);
        assert!(criteria.check_age(&token, NOW).is_err());
    }

    #[test]
    fn test_market_gates() {
        let criteria = QualificationCriteria::default();
        assert!(criteria.check_market(&TokenDetail::new(50_000.0, 25_000.0)).is_ok());
        assert!(matches!(
            criteria.check_market(&TokenDetail::new(49_999.0, 99_000.0)),
            Err(Rejection::LowLiquidity { .. })
        ));
        assert!(matches!(
            criteria.check_market(&TokenDetail::new(80_000.0, 24_999.0)),
            Err(Rejection::LowVolume { .. })
        ));
        assert!(matches!(
            criteria.check_market(&TokenDetail::zero()),
            Err(Rejection::LowLiquidity { .. })
        ));
    }

    #[test]
    fn test_score_gates() {
        let criteria = QualificationCriteria::default();
        assert!(criteria.check_dyor(60).is_ok());
        assert!(criteria.check_dyor(59).is_err());
        assert!(criteria.check_sentiment(100).is_ok());
        assert!(criteria.check_sentiment(10).is_err());
    }

    #[test]
    fn test_chain_quota() {
        let mut quota = ChainQuota::new(&[Chain::Solana, Chain::Ethereum], 2);
        assert!(!quota.is_full(Chain::Solana));

        quota.record(Chain::Solana);
        quota.record(Chain::Solana);
        assert!(quota.is_full(Chain::Solana));
        assert!(!quota.all_saturated());

        quota.record(Chain::Ethereum);
        quota.record(Chain::Ethereum);
        assert!(quota.all_saturated());
        assert_eq!(quota.count(Chain::Ethereum), 2);
    }

    #[test]
    fn test_untracked_chain_is_full() {
        let quota = ChainQuota::new(&[Chain::Solana], 3);
        assert!(quota.is_full(Chain::Ethereum));
        assert_eq!(quota.remaining(Chain::Ethereum), 0);
    }

    #[test]
    fn test_quota_remaining() {
        let mut quota = ChainQuota::new(&[Chain::Solana], 3);
        assert_eq!(quota.remaining(Chain::Solana), 3);

        quota.record(Chain::Solana);
        assert_eq!(quota.remaining(Chain::Solana), 2);

        quota.record(Chain::Solana);
        quota.record(Chain::Solana);
        quota.record(Chain::Solana);
        assert_eq!(quota.remaining(Chain::Solana), 0);
    }

    #[test]
    fn test_stats_record_rejection() {
        let mut stats = QualificationStats::default();
        stats.record_rejection(&Rejection::LowVolume { current: 1.0, minimum: 2.0 });
        stats.record_rejection(&Rejection::LowDyorScore { score: 1, minimum: 60 });
        assert_eq!(stats.low_volume, 1);
        assert_eq!(stats.low_dyor, 1);
        assert_eq!(stats.rejected(), 2);
    }

    #[test]
    fn test_rejection_display() {
        let r = Rejection::TooOld { age_hours: 13.26, max_hours: 12.0 };
        assert_eq!(r.to_string(), "too old: 13.3h > 12.0h");
    }
}
