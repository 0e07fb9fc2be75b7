//! Domain Layer - Core types and rules for the meme radar
//!
//! Pure types and logic with no I/O. All upstream access goes through the
//! ports layer.
//!
//! - `token`: chains, raw tokens, market detail, qualified tokens
//! - `qualification`: thresholds, rejection reasons, per-chain quota
//! - `influencer`: display-only influencer rosters
//! - `fallback`: sample feed and feed tagging

pub mod fallback;
pub mod influencer;
pub mod qualification;
pub mod token;

pub use fallback::{sample_tokens, FallbackPolicy, Feed};
pub use qualification::{ChainQuota, QualificationCriteria, QualificationStats, Rejection};
pub use token::{
    Chain, ParseChainError, QualifiedToken, Token, TokenDetail, UNKNOWN_NAME, UNKNOWN_SYMBOL,
};
