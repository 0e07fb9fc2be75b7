//! Scoring Adapter
//!
//! `PlaceholderScoring` is a stub: it ignores its inputs and draws scores
//! from a fixed band so that most tokens pass the default thresholds. Replace
//! it with a real model by implementing `ScoringStrategy`.

use rand::Rng;

use crate::domain::{Token, TokenDetail};
use crate::ports::{ScoringStrategy, MAX_SCORE};

/// Lowest score the placeholder ever returns
pub const PLACEHOLDER_BASE: u8 = 60;
/// DYOR spread above the base
pub const DYOR_SPREAD: u8 = 25;
/// Sentiment spread above the base
pub const SENTIMENT_SPREAD: u8 = 20;

/// Random scores in `[60, 85]` (DYOR) and `[60, 80]` (sentiment)
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScoring;

impl PlaceholderScoring {
    pub fn new() -> Self {
        Self
    }

    fn draw(spread: u8) -> u8 {
        let bump = rand::thread_rng().gen_range(0..=spread);
        PLACEHOLDER_BASE.saturating_add(bump).min(MAX_SCORE)
    }
}

impl ScoringStrategy for PlaceholderScoring {
    fn dyor_score(&self, _token: &Token, _detail: &TokenDetail) -> u8 {
        Self::draw(DYOR_SPREAD)
    }

    fn sentiment_score(&self, _token: &Token) -> u8 {
        Self::draw(SENTIMENT_SPREAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Chain;

    #[test]
    fn test_scores_stay_in_band() {
        let scoring = PlaceholderScoring::new();
        let token = Token::new(Chain::Solana, "addr", None, None, 0);
        let detail = TokenDetail::zero();

        for _ in 0..500 {
            let dyor = scoring.dyor_score(&token, &detail);
            assert!((60..=85).contains(&dyor), "dyor out of band: {}", dyor);

            let sentiment = scoring.sentiment_score(&token);
            assert!((60..=80).contains(&sentiment), "sentiment out of band: {}", sentiment);
        }
    }
}
