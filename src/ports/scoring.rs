use crate::domain::{Token, TokenDetail};

/// Upper bound of every score
pub const MAX_SCORE: u8 = 100;

/// Scoring strategy for qualification.
///
/// Implementations return scores in `[0, 100]`; the pipeline clamps anything
/// larger. Swapping the strategy never touches the filter.
#[cfg_attr(test, mockall::automock)]
pub trait ScoringStrategy: Send + Sync {
    /// "Do Your Own Research" trust score
    fn dyor_score(&self, token: &Token, detail: &TokenDetail) -> u8;

    /// Social attention score
    fn sentiment_score(&self, token: &Token) -> u8;
}
